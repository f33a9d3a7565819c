//! Storage adapters
//!
//! In-memory implementations of the domain storage ports, used by the
//! reference deployment and the test suites. Each adapter serializes its
//! mutations through a single `tokio::sync::RwLock`, which is what makes
//! the ports' atomic check-and-increment contracts hold.

pub mod funds;
pub mod ledger;
pub mod reconciliation;

pub use funds::InMemoryFundStore;
pub use ledger::InMemoryLedgerStore;
pub use reconciliation::{InMemoryReconciliationStore, LedgerLineSource};
