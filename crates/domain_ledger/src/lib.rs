//! Ledger Domain - Double-Entry Journal and Trial Balance
//!
//! This crate implements the accounting core of the congregation ledger:
//! the chart of accounts, the journal entry lifecycle, and trial balance
//! computation.
//!
//! # Double-Entry Principles
//!
//! Every journal entry creates balanced debits and credits:
//! - Debits increase asset/expense accounts
//! - Credits increase liability/equity/revenue accounts
//! - The sum of all debits must equal the sum of all credits, at every
//!   lifecycle status
//!
//! # Lifecycle
//!
//! Entries are created as drafts, posted (immutable contents from then
//! on), and compensated by reversal or void. History is never destroyed:
//! void marks, reversal appends.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{JournalService, NewJournalEntry};
//!
//! let draft = NewJournalEntry::new(scope, date, "Sunday offering", operator)
//!     .debit(bank_account, amount)
//!     .credit(offering_income, amount);
//!
//! let entry = service.create(draft).await?;
//! let posted = service.post(entry.id, entry.version).await?;
//! ```

pub mod account;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod store;
pub mod trial_balance;

pub use account::{Account, AccountRegistry, AccountType, CongregationChartOfAccounts};
pub use entry::{EntryStatus, JournalEntry, JournalLine, NewJournalEntry, Side};
pub use error::LedgerError;
pub use ledger::{JournalService, ReversalPair};
pub use store::{LedgerStore, PostedLine};
pub use trial_balance::{TrialBalance, TrialBalanceCalculator, TrialBalanceRow};
