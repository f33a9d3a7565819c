//! Storage ports for the reconciliation domain

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;

use core_kernel::{AccountId, JournalLineId, ReconciliationSessionId};

use crate::error::ReconciliationError;
use crate::session::{ClearedCandidate, ReconciliationSession};

/// Persistence port for reconciliation sessions
#[async_trait]
pub trait ReconciliationStore: Send + Sync {
    /// Persists a newly opened session
    async fn insert_session(
        &self,
        session: ReconciliationSession,
    ) -> Result<ReconciliationSession, ReconciliationError>;

    /// Fetches a session by id
    async fn session(
        &self,
        id: ReconciliationSessionId,
    ) -> Result<Option<ReconciliationSession>, ReconciliationError>;

    /// Lists sessions for an account, most recent first
    async fn sessions_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ReconciliationSession>, ReconciliationError>;

    /// Replaces a stored session with an updated copy
    ///
    /// Implementations must compare `expected_version` with the stored
    /// session's version and bump it under the same guard, returning
    /// `Conflict` on a mismatch. Writes against a stored session that is
    /// already Reconciled are rejected with `InvalidState`, so a
    /// finalised session can never be mutated through a stale in-memory
    /// copy.
    async fn update_session(
        &self,
        session: ReconciliationSession,
        expected_version: u32,
    ) -> Result<ReconciliationSession, ReconciliationError>;

    /// Returns every line id cleared by a Reconciled session of the
    /// account
    ///
    /// Used to exclude already-reconciled lines from the candidate set of
    /// a new session.
    async fn cleared_line_ids(
        &self,
        account_id: AccountId,
    ) -> Result<BTreeSet<JournalLineId>, ReconciliationError>;
}

/// Read port onto the posted ledger
///
/// The reconciliation domain never sees draft or void entries; the
/// adapter behind this trait is responsible for filtering to posted,
/// non-void lines of the given account.
#[async_trait]
pub trait PostedLineSource: Send + Sync {
    /// Returns posted lines touching the account with an entry date on or
    /// before `up_to`
    async fn posted_lines_for_account(
        &self,
        account_id: AccountId,
        up_to: NaiveDate,
    ) -> Result<Vec<ClearedCandidate>, ReconciliationError>;
}
