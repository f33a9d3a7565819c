//! Journal entry lifecycle service
//!
//! Owns the entry state machine and the balance invariant:
//!
//! - every entry satisfies `sum(debits) == sum(credits)` at every status
//! - `Draft --post--> Posted --void--> Void`, never back to Draft
//! - `reverse` compensates a posted entry with a new linked entry instead
//!   of mutating history
//!
//! All mutations are version-conditioned: the caller presents the version
//! it last observed and the store applies the change atomically or
//! returns `Conflict` with the current version. The response of a
//! successful mutation carries the authoritative new version; callers
//! should treat it as the new source of truth rather than re-querying.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::{JournalEntryId, OperatorId};

use crate::entry::{EntryStatus, JournalEntry, NewJournalEntry};
use crate::error::LedgerError;
use crate::store::LedgerStore;

/// The original/reversal pair produced by `reverse`
#[derive(Debug, Clone)]
pub struct ReversalPair {
    /// The original entry, now carrying `reversed_by`
    pub original: JournalEntry,
    /// The new compensating entry
    pub reversal: JournalEntry,
}

/// Service owning journal entry creation and lifecycle transitions
pub struct JournalService<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> JournalService<S> {
    /// Creates a new service over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validates and persists a draft entry
    ///
    /// # Errors
    ///
    /// - `Validation("empty")` when the draft has fewer than two lines
    /// - `Validation("unbalanced")` when debits do not equal credits
    /// - `Validation` when a line is malformed (both sides, negative
    ///   amount, mixed currency)
    /// - `NotFound` when a referenced account is missing, inactive, or
    ///   not visible from the draft's scope
    #[instrument(skip(self, draft), fields(scope = %draft.scope))]
    pub async fn create(&self, draft: NewJournalEntry) -> Result<JournalEntry, LedgerError> {
        if draft.lines.len() < 2 {
            return Err(LedgerError::validation("empty"));
        }

        let currency = draft.lines[0].debit.currency();
        for line in &draft.lines {
            line.validate()?;
            if line.amount().currency() != currency {
                return Err(LedgerError::validation(
                    "all lines of an entry must share a currency",
                ));
            }
        }

        let entry = JournalEntry {
            id: JournalEntryId::new_v7(),
            entry_date: draft.entry_date,
            status: EntryStatus::Draft,
            version: 1,
            lines: draft.lines,
            reversal_of: None,
            reversed_by: None,
            memo: draft.memo,
            created_by: draft.created_by,
            scope: draft.scope,
            created_at: Utc::now(),
            posted_at: None,
            voided_at: None,
        };

        if !entry.is_balanced() {
            return Err(LedgerError::validation("unbalanced"));
        }

        for line in &entry.lines {
            let account = self
                .store
                .account(line.account_id)
                .await?
                .ok_or_else(|| LedgerError::not_found(format!("account {}", line.account_id)))?;
            if !account.postable_from(&entry.scope) {
                return Err(LedgerError::not_found(format!(
                    "account {} is inactive or out of scope",
                    account.code
                )));
            }
        }

        let created = self.store.insert_entry(entry).await?;
        info!(entry_id = %created.id, lines = created.lines.len(), "Journal entry created");
        Ok(created)
    }

    /// Fetches an entry by id
    pub async fn get(&self, id: JournalEntryId) -> Result<JournalEntry, LedgerError> {
        self.store
            .entry(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(format!("journal entry {id}")))
    }

    /// Transitions a draft entry to Posted
    ///
    /// Posting freezes the entry's contents and makes its lines visible
    /// to the trial balance calculator and the reconciliation engine.
    ///
    /// # Errors
    ///
    /// - `Conflict` when `expected_version` does not match the stored
    ///   version (nothing is mutated; refetch and retry)
    /// - `InvalidState` when the entry is not Draft
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn post(
        &self,
        id: JournalEntryId,
        expected_version: u32,
    ) -> Result<JournalEntry, LedgerError> {
        let entry = self.get(id).await?;

        if entry.version != expected_version {
            return Err(LedgerError::conflict(
                expected_version,
                entry.version,
                "entry changed since it was fetched; reload before posting",
            ));
        }
        if entry.status != EntryStatus::Draft {
            return Err(LedgerError::invalid_state(format!(
                "cannot post entry in status {:?}",
                entry.status
            )));
        }

        let mut posted = entry;
        posted.status = EntryStatus::Posted;
        posted.posted_at = Some(Utc::now());

        let stored = self.store.update_entry(posted, expected_version).await?;
        info!(entry_id = %id, version = stored.version, "Journal entry posted");
        Ok(stored)
    }

    /// Transitions a posted entry to Void
    ///
    /// Voided entries drop out of trial balance and reconciliation reads
    /// from the void timestamp forward but remain in the audit trail.
    /// Reversal is the preferred compensating mechanism; void exists for
    /// entries that should never have been booked at all.
    ///
    /// # Errors
    ///
    /// - `Conflict` on version mismatch
    /// - `InvalidState` when the entry is Draft or already Void
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn void(
        &self,
        id: JournalEntryId,
        expected_version: u32,
    ) -> Result<JournalEntry, LedgerError> {
        let entry = self.get(id).await?;

        if entry.version != expected_version {
            return Err(LedgerError::conflict(
                expected_version,
                entry.version,
                "entry changed since it was fetched; reload before voiding",
            ));
        }
        if entry.status != EntryStatus::Posted {
            return Err(LedgerError::invalid_state(format!(
                "cannot void entry in status {:?}",
                entry.status
            )));
        }

        let mut voided = entry;
        voided.status = EntryStatus::Void;
        voided.voided_at = Some(Utc::now());

        let stored = self.store.update_entry(voided, expected_version).await?;
        info!(entry_id = %id, version = stored.version, "Journal entry voided");
        Ok(stored)
    }

    /// Reverses a posted entry
    ///
    /// Produces a new posted entry whose lines swap debit and credit
    /// relative to the source, dated at `reversal_date`, and links the
    /// pair bidirectionally. The original's contents are untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidState` when the entry is not Posted
    /// - `InvalidState("already-reversed")` when a reversal already exists
    /// - `Validation` when `reversal_date` precedes the entry date
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn reverse(
        &self,
        id: JournalEntryId,
        reversal_date: NaiveDate,
        created_by: OperatorId,
    ) -> Result<ReversalPair, LedgerError> {
        let original = self.get(id).await?;

        if original.status != EntryStatus::Posted {
            return Err(LedgerError::invalid_state(format!(
                "cannot reverse entry in status {:?}",
                original.status
            )));
        }
        if original.reversed_by.is_some() {
            return Err(LedgerError::invalid_state("already-reversed"));
        }
        if reversal_date < original.entry_date {
            return Err(LedgerError::validation(
                "reversal date must not precede the entry date",
            ));
        }

        let now = Utc::now();
        let reversal = JournalEntry {
            id: JournalEntryId::new_v7(),
            entry_date: reversal_date,
            status: EntryStatus::Posted,
            version: 1,
            lines: original.lines.iter().map(|line| line.swapped()).collect(),
            reversal_of: Some(original.id),
            reversed_by: None,
            memo: format!("Reversal of: {}", original.memo),
            created_by,
            scope: original.scope,
            created_at: now,
            posted_at: Some(now),
            voided_at: None,
        };

        let (original, reversal) = self.store.insert_reversal(id, reversal).await?;
        info!(
            entry_id = %id,
            reversal_id = %reversal.id,
            "Journal entry reversed"
        );
        Ok(ReversalPair { original, reversal })
    }
}
