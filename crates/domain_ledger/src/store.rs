//! Storage port for the ledger domain
//!
//! The domain prescribes a consistency contract, not a storage engine:
//! every mutation of a versioned record is a single atomic
//! check-and-increment against the backing store. Adapters implement this
//! trait (in-memory for tests and the reference deployment, SQL for a
//! production deployment) and must uphold that contract.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{AccountId, FiscalPeriod, JournalEntryId, Scope};

use crate::account::Account;
use crate::entry::{JournalEntry, JournalLine};
use crate::error::LedgerError;

/// A posted journal line flattened with its entry context
///
/// The read model consumed by the trial balance calculator and the
/// reconciliation engine: only lines from Posted, non-Void entries ever
/// appear here.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// Entry the line belongs to
    pub entry_id: JournalEntryId,
    /// Accounting date of the entry
    pub entry_date: NaiveDate,
    /// Scope of the entry
    pub scope: Scope,
    /// The line itself
    pub line: JournalLine,
}

/// Storage port for accounts and journal entries
///
/// # Contract
///
/// - `insert_entry` persists an entry and all its lines atomically.
/// - `update_entry` compares `expected_version` with the stored version
///   inside one critical section; on match it stores the mutation with
///   `version = expected_version + 1`, on mismatch it returns
///   `LedgerError::Conflict` carrying the current version and mutates
///   nothing.
/// - `insert_reversal` links a reversal pair in one atomic operation:
///   it re-checks that the original is still Posted and unreversed,
///   inserts the reversal entry, and stamps `reversed_by` on the
///   original (bumping its version).
#[async_trait]
pub trait LedgerStore: Send + Sync + 'static {
    /// Persists a new account
    ///
    /// Rejects with `Validation` when the code is already used within the
    /// account's scope.
    async fn insert_account(&self, account: Account) -> Result<Account, LedgerError>;

    /// Fetches an account by id
    async fn account(&self, id: AccountId) -> Result<Option<Account>, LedgerError>;

    /// Lists accounts visible to the caller scope, ordered by code
    async fn accounts(&self, caller: Scope) -> Result<Vec<Account>, LedgerError>;

    /// Marks an account inactive
    async fn deactivate_account(&self, id: AccountId) -> Result<Account, LedgerError>;

    /// Persists a new journal entry with all its lines
    async fn insert_entry(&self, entry: JournalEntry) -> Result<JournalEntry, LedgerError>;

    /// Fetches a journal entry by id
    async fn entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, LedgerError>;

    /// Applies a mutation under optimistic locking
    async fn update_entry(
        &self,
        entry: JournalEntry,
        expected_version: u32,
    ) -> Result<JournalEntry, LedgerError>;

    /// Atomically inserts a reversal entry and links it to its original
    ///
    /// Returns the updated original and the stored reversal.
    async fn insert_reversal(
        &self,
        original_id: JournalEntryId,
        reversal: JournalEntry,
    ) -> Result<(JournalEntry, JournalEntry), LedgerError>;

    /// Returns posted, non-void lines dated within the fiscal period and
    /// visible to the caller scope
    async fn posted_lines_in_period(
        &self,
        caller: Scope,
        period: FiscalPeriod,
    ) -> Result<Vec<PostedLine>, LedgerError>;

    /// Returns posted, non-void lines on one account dated on or before
    /// the given date
    async fn posted_lines_for_account(
        &self,
        account_id: AccountId,
        up_to: NaiveDate,
    ) -> Result<Vec<PostedLine>, LedgerError>;
}
