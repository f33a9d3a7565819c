//! In-memory adapter for the reconciliation store port
//!
//! Also bridges the reconciliation domain's read port onto the ledger
//! store, so the engine sees posted lines without depending on ledger
//! types directly.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{AccountId, JournalLineId, ReconciliationSessionId};
use domain_ledger::store::LedgerStore;
use domain_reconciliation::{
    ClearedCandidate, PostedLineSource, ReconciliationError, ReconciliationSession,
    ReconciliationStore, SessionStatus,
};

/// In-memory reconciliation session store
#[derive(Default)]
pub struct InMemoryReconciliationStore {
    sessions: RwLock<HashMap<ReconciliationSessionId, ReconciliationSession>>,
}

impl InMemoryReconciliationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReconciliationStore for InMemoryReconciliationStore {
    async fn insert_session(
        &self,
        session: ReconciliationSession,
    ) -> Result<ReconciliationSession, ReconciliationError> {
        let mut sessions = self.sessions.write().await;
        debug!(session_id = %session.id, "Storing reconciliation session");
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn session(
        &self,
        id: ReconciliationSessionId,
    ) -> Result<Option<ReconciliationSession>, ReconciliationError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn sessions_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ReconciliationSession>, ReconciliationError> {
        let sessions = self.sessions.read().await;
        let mut matching: Vec<ReconciliationSession> = sessions
            .values()
            .filter(|session| session.account_id == account_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn update_session(
        &self,
        session: ReconciliationSession,
        expected_version: u32,
    ) -> Result<ReconciliationSession, ReconciliationError> {
        let mut sessions = self.sessions.write().await;

        let stored = sessions
            .get_mut(&session.id)
            .ok_or_else(|| ReconciliationError::not_found(format!("session {}", session.id)))?;

        if stored.status == SessionStatus::Reconciled {
            return Err(ReconciliationError::invalid_state(
                "session is reconciled and immutable",
            ));
        }
        if stored.version != expected_version {
            return Err(ReconciliationError::conflict(
                expected_version,
                stored.version,
                "session changed since it was fetched",
            ));
        }

        let mut updated = session;
        updated.version = expected_version + 1;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn cleared_line_ids(
        &self,
        account_id: AccountId,
    ) -> Result<BTreeSet<JournalLineId>, ReconciliationError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|session| {
                session.account_id == account_id && session.status == SessionStatus::Reconciled
            })
            .flat_map(|session| session.cleared_line_ids.iter().copied())
            .collect())
    }
}

/// Bridges the reconciliation read port onto a ledger store
pub struct LedgerLineSource<S> {
    ledger: Arc<S>,
}

impl<S: LedgerStore> LedgerLineSource<S> {
    pub fn new(ledger: Arc<S>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<S: LedgerStore> PostedLineSource for LedgerLineSource<S> {
    async fn posted_lines_for_account(
        &self,
        account_id: AccountId,
        up_to: NaiveDate,
    ) -> Result<Vec<ClearedCandidate>, ReconciliationError> {
        let lines = self
            .ledger
            .posted_lines_for_account(account_id, up_to)
            .await
            .map_err(|err| ReconciliationError::Storage(err.to_string()))?;

        Ok(lines
            .into_iter()
            .map(|posted| ClearedCandidate {
                line_id: posted.line.id,
                entry_id: posted.entry_id,
                entry_date: posted.entry_date,
                debit: posted.line.debit,
                credit: posted.line.credit,
                memo: posted.line.memo,
            })
            .collect())
    }
}
