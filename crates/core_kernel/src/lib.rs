//! Core Kernel - Foundational types for the congregation ledger
//!
//! This crate provides the fundamental building blocks used across all
//! domain modules:
//! - Money types with precise decimal arithmetic
//! - Fiscal period types for trial balance reporting
//! - Organisation/branch scoping for multi-tenant records
//! - Strongly-typed identifiers

pub mod error;
pub mod fiscal;
pub mod identifiers;
pub mod money;
pub mod scope;

pub use error::CoreError;
pub use fiscal::{FiscalError, FiscalPeriod};
pub use identifiers::{
    AccountId, BranchId, ContributionTypeId, FundId, FundMappingId, JournalEntryId,
    JournalLineId, OperatorId, OrganisationId, ReconciliationSessionId,
};
pub use money::{Currency, Money, MoneyError};
pub use scope::Scope;
