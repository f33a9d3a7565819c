//! Reconciliation Domain - Bank Statement Matching
//!
//! Periodic comparison of an account's book balance against a bank
//! statement:
//!
//! - a session snapshots the book balance and the posted lines eligible
//!   for clearing
//! - the operator toggles lines cleared; adjusted balance and difference
//!   recompute synchronously
//! - saving requires the difference to be within one minor currency
//!   unit; otherwise the mismatch is reported with the exact difference
//! - a Reconciled session is immutable and its cleared lines never
//!   reappear as candidates

pub mod engine;
pub mod error;
pub mod session;
pub mod store;

pub use engine::ReconciliationService;
pub use error::ReconciliationError;
pub use session::{ClearedCandidate, ReconciliationSession, SessionStatus};
pub use store::{PostedLineSource, ReconciliationStore};
