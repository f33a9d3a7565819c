//! Reconciliation orchestration service

use std::sync::Arc;
use tracing::{info, instrument, warn};

use chrono::NaiveDate;
use core_kernel::{AccountId, Currency, JournalLineId, Money, ReconciliationSessionId};

use crate::error::ReconciliationError;
use crate::session::{ReconciliationSession, SessionStatus};
use crate::store::{PostedLineSource, ReconciliationStore};

/// Service driving reconciliation sessions against the posted ledger
pub struct ReconciliationService<S, L> {
    sessions: Arc<S>,
    ledger: Arc<L>,
}

impl<S: ReconciliationStore, L: PostedLineSource> ReconciliationService<S, L> {
    /// Creates a new service over the given session store and ledger view
    pub fn new(sessions: Arc<S>, ledger: Arc<L>) -> Self {
        Self { sessions, ledger }
    }

    /// Opens a reconciliation session for an account
    ///
    /// The book balance snapshot is the reconciled balance brought
    /// forward: the sum of debits minus credits over posted lines that a
    /// prior Reconciled session cleared. Everything else dated on or
    /// before the reconciliation date becomes a cleared-candidate, so
    /// clearing every candidate brings the adjusted balance up to the
    /// full ledger balance of the account.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn start_session(
        &self,
        account_id: AccountId,
        reconciliation_date: NaiveDate,
        currency: Currency,
    ) -> Result<ReconciliationSession, ReconciliationError> {
        let lines = self
            .ledger
            .posted_lines_for_account(account_id, reconciliation_date)
            .await?;
        let previously_cleared = self.sessions.cleared_line_ids(account_id).await?;

        let mut book_balance = Money::zero(currency);
        let mut candidates = Vec::new();
        for line in lines {
            if previously_cleared.contains(&line.line_id) {
                book_balance = book_balance.checked_add(&line.debit)?;
                book_balance = book_balance.checked_sub(&line.credit)?;
            } else {
                candidates.push(line);
            }
        }

        let session = ReconciliationSession::new(
            account_id,
            reconciliation_date,
            book_balance,
            candidates,
        );
        let stored = self.sessions.insert_session(session).await?;

        info!(
            session_id = %stored.id,
            book_balance = %stored.book_balance,
            candidates = stored.candidates.len(),
            "Reconciliation session opened"
        );
        Ok(stored)
    }

    /// Fetches a session by id
    pub async fn get(
        &self,
        id: ReconciliationSessionId,
    ) -> Result<ReconciliationSession, ReconciliationError> {
        self.sessions
            .session(id)
            .await?
            .ok_or_else(|| ReconciliationError::not_found(format!("session {id}")))
    }

    /// Lists sessions for an account, most recent first
    pub async fn sessions_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ReconciliationSession>, ReconciliationError> {
        self.sessions.sessions_for_account(account_id).await
    }

    /// Toggles the cleared flag on a candidate line
    ///
    /// Recomputes the adjusted balance and difference before persisting,
    /// so the stored session always reflects the current cleared set.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn toggle_cleared(
        &self,
        session_id: ReconciliationSessionId,
        line_id: JournalLineId,
    ) -> Result<ReconciliationSession, ReconciliationError> {
        let mut session = self.get(session_id).await?;
        let expected_version = session.version;
        session.toggle_cleared(line_id)?;
        self.sessions.update_session(session, expected_version).await
    }

    /// Saves the session against the presented bank statement balance
    ///
    /// On a match within one minor currency unit the session becomes
    /// Reconciled and immutable. On a mismatch the statement balance and
    /// recomputed difference are still persisted, then a `Mismatch`
    /// error carrying the difference is returned so the operator can
    /// keep working from where they left off.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn save(
        &self,
        session_id: ReconciliationSessionId,
        bank_statement_balance: Money,
        notes: Option<String>,
    ) -> Result<ReconciliationSession, ReconciliationError> {
        let mut session = self.get(session_id).await?;
        let expected_version = session.version;
        session.set_statement_balance(bank_statement_balance)?;

        let epsilon = Money::one_minor_unit(bank_statement_balance.currency());
        match session.finalise(notes, epsilon) {
            Ok(()) => {
                let stored = self
                    .sessions
                    .update_session(session, expected_version)
                    .await?;
                info!(
                    session_id = %stored.id,
                    adjusted_balance = %stored.adjusted_balance,
                    "Reconciliation session saved as reconciled"
                );
                Ok(stored)
            }
            Err(ReconciliationError::Mismatch { difference }) => {
                warn!(
                    session_id = %session.id,
                    difference = %difference,
                    "Reconciliation mismatch; session left in progress"
                );
                debug_assert_eq!(session.status, SessionStatus::InProgress);
                self.sessions
                    .update_session(session, expected_version)
                    .await?;
                Err(ReconciliationError::Mismatch { difference })
            }
            Err(other) => Err(other),
        }
    }
}
