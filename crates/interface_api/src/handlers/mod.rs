//! Request handlers

pub mod accounts;
pub mod entries;
pub mod funds;
pub mod health;
pub mod reconciliation;
