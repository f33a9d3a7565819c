//! Reconciliation session aggregate
//!
//! A session compares the ledger's book balance for one account against a
//! bank statement. The operator marks candidate lines as cleared; the
//! session recomputes the adjusted balance and difference synchronously
//! on every toggle. A session saved as Reconciled is immutable; the next
//! period opens a fresh session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{AccountId, JournalEntryId, JournalLineId, Money, ReconciliationSessionId};

use crate::error::ReconciliationError;

/// Lifecycle status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Reconciled,
}

/// A posted line the operator may mark as cleared
///
/// Snapshot of the ledger line taken at session start; lines cleared by a
/// prior reconciled session never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearedCandidate {
    /// Ledger line id
    pub line_id: JournalLineId,
    /// Entry the line belongs to
    pub entry_id: JournalEntryId,
    /// Accounting date of the entry
    pub entry_date: NaiveDate,
    /// Debit amount (zero for credits)
    pub debit: Money,
    /// Credit amount (zero for debits)
    pub credit: Money,
    /// Line memo, if any
    pub memo: Option<String>,
}

/// A bank reconciliation attempt for one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationSession {
    /// Unique identifier
    pub id: ReconciliationSessionId,
    /// Account under reconciliation
    pub account_id: AccountId,
    /// Optimistic-lock version, starting at 1; bumped by the store on
    /// every persisted update
    pub version: u32,
    /// Statement cut-off date
    pub reconciliation_date: NaiveDate,
    /// Statement balance last presented by the operator
    pub bank_statement_balance: Money,
    /// Book balance snapshot taken at session start: the reconciled
    /// balance brought forward from prior sessions
    pub book_balance: Money,
    /// Lines the operator may clear in this session
    pub candidates: Vec<ClearedCandidate>,
    /// Lines currently marked cleared
    pub cleared_line_ids: BTreeSet<JournalLineId>,
    /// `book_balance + cleared debits - cleared credits`
    pub adjusted_balance: Money,
    /// `adjusted_balance - bank_statement_balance`
    pub difference: Money,
    /// Lifecycle status
    pub status: SessionStatus,
    /// Operator notes recorded at save time
    pub notes: Option<String>,
    /// When the session was opened
    pub created_at: DateTime<Utc>,
    /// When the session was saved as reconciled
    pub reconciled_at: Option<DateTime<Utc>>,
}

impl ReconciliationSession {
    /// Opens a new session with an empty cleared set
    pub fn new(
        account_id: AccountId,
        reconciliation_date: NaiveDate,
        book_balance: Money,
        candidates: Vec<ClearedCandidate>,
    ) -> Self {
        let currency = book_balance.currency();
        Self {
            id: ReconciliationSessionId::new_v7(),
            account_id,
            version: 1,
            reconciliation_date,
            bank_statement_balance: Money::zero(currency),
            book_balance,
            candidates,
            cleared_line_ids: BTreeSet::new(),
            adjusted_balance: book_balance,
            difference: book_balance,
            status: SessionStatus::InProgress,
            notes: None,
            created_at: Utc::now(),
            reconciled_at: None,
        }
    }

    /// Adds or removes a line from the cleared set and recomputes
    ///
    /// # Errors
    ///
    /// - `InvalidState` when the session is already reconciled
    /// - `NotFound` when the line is not a candidate of this session
    pub fn toggle_cleared(&mut self, line_id: JournalLineId) -> Result<(), ReconciliationError> {
        self.ensure_in_progress()?;

        if !self.candidates.iter().any(|c| c.line_id == line_id) {
            return Err(ReconciliationError::not_found(format!(
                "line {line_id} is not a cleared-candidate of this session"
            )));
        }

        if !self.cleared_line_ids.remove(&line_id) {
            self.cleared_line_ids.insert(line_id);
        }
        self.recompute()
    }

    /// Records the statement balance presented by the operator and
    /// recomputes
    pub fn set_statement_balance(&mut self, balance: Money) -> Result<(), ReconciliationError> {
        self.ensure_in_progress()?;
        self.bank_statement_balance = balance;
        self.recompute()
    }

    /// Attempts to finalise the session as Reconciled
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` carrying the difference when the adjusted
    /// balance disagrees with the statement beyond `epsilon`
    pub fn finalise(
        &mut self,
        notes: Option<String>,
        epsilon: Money,
    ) -> Result<(), ReconciliationError> {
        self.ensure_in_progress()?;

        if self.difference.abs().amount() >= epsilon.amount() {
            return Err(ReconciliationError::Mismatch {
                difference: self.difference,
            });
        }

        self.status = SessionStatus::Reconciled;
        self.notes = notes;
        self.reconciled_at = Some(Utc::now());
        Ok(())
    }

    /// Recomputes `adjusted_balance` and `difference` from the cleared
    /// set
    ///
    /// Cheap and synchronous; called on every toggle and every statement
    /// balance change.
    fn recompute(&mut self) -> Result<(), ReconciliationError> {
        let mut adjusted = self.book_balance;
        for candidate in &self.candidates {
            if self.cleared_line_ids.contains(&candidate.line_id) {
                adjusted = adjusted.checked_add(&candidate.debit)?;
                adjusted = adjusted.checked_sub(&candidate.credit)?;
            }
        }
        self.adjusted_balance = adjusted;
        self.difference = adjusted.checked_sub(&self.bank_statement_balance)?;
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), ReconciliationError> {
        if self.status != SessionStatus::InProgress {
            return Err(ReconciliationError::invalid_state(
                "session is reconciled and immutable; open a new session for the next period",
            ));
        }
        Ok(())
    }
}
