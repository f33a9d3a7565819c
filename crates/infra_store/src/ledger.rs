//! In-memory adapter for the ledger store port

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{AccountId, FiscalPeriod, JournalEntryId, Scope};
use domain_ledger::entry::{EntryStatus, JournalEntry};
use domain_ledger::store::{LedgerStore, PostedLine};
use domain_ledger::{Account, LedgerError};

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<AccountId, Account>,
    entries: HashMap<JournalEntryId, JournalEntry>,
}

/// In-memory ledger store
///
/// A single `RwLock` over both maps gives every port operation the
/// atomicity the contract demands: version checks, inserts, and link
/// updates all happen under one write guard.
#[derive(Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<LedgerState>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn posted_lines_of(entry: &JournalEntry) -> impl Iterator<Item = PostedLine> + '_ {
    entry.lines.iter().map(|line| PostedLine {
        entry_id: entry.id,
        entry_date: entry.entry_date,
        scope: entry.scope,
        line: line.clone(),
    })
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn insert_account(&self, account: Account) -> Result<Account, LedgerError> {
        let mut state = self.state.write().await;

        let duplicate = state.accounts.values().any(|existing| {
            existing.code == account.code && existing.scope == account.scope
        });
        if duplicate {
            return Err(LedgerError::validation(format!(
                "account code {} already exists in {}",
                account.code, account.scope
            )));
        }

        debug!(account_id = %account.id, code = %account.code, "Storing account");
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn account(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn accounts(&self, caller: Scope) -> Result<Vec<Account>, LedgerError> {
        let state = self.state.read().await;
        let mut visible: Vec<Account> = state
            .accounts
            .values()
            .filter(|account| account.scope.visible_to(&caller))
            .cloned()
            .collect();
        visible.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(visible)
    }

    async fn deactivate_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::not_found(format!("account {id}")))?;
        account.is_active = false;
        Ok(account.clone())
    }

    async fn insert_entry(&self, entry: JournalEntry) -> Result<JournalEntry, LedgerError> {
        let mut state = self.state.write().await;
        debug!(entry_id = %entry.id, lines = entry.lines.len(), "Storing journal entry");
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.entries.get(&id).cloned())
    }

    async fn update_entry(
        &self,
        entry: JournalEntry,
        expected_version: u32,
    ) -> Result<JournalEntry, LedgerError> {
        let mut state = self.state.write().await;

        let stored = state
            .entries
            .get_mut(&entry.id)
            .ok_or_else(|| LedgerError::not_found(format!("journal entry {}", entry.id)))?;

        if stored.version != expected_version {
            return Err(LedgerError::conflict(
                expected_version,
                stored.version,
                "entry changed since it was fetched",
            ));
        }

        let mut updated = entry;
        updated.version = expected_version + 1;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn insert_reversal(
        &self,
        original_id: JournalEntryId,
        reversal: JournalEntry,
    ) -> Result<(JournalEntry, JournalEntry), LedgerError> {
        let mut state = self.state.write().await;

        let original = state
            .entries
            .get(&original_id)
            .ok_or_else(|| LedgerError::not_found(format!("journal entry {original_id}")))?
            .clone();

        // Re-check under the write guard; the service's pre-checks ran
        // outside the critical section.
        if original.status != EntryStatus::Posted {
            return Err(LedgerError::invalid_state(format!(
                "cannot reverse entry in status {:?}",
                original.status
            )));
        }
        if original.reversed_by.is_some() {
            return Err(LedgerError::invalid_state("already-reversed"));
        }

        let mut linked = original;
        linked.reversed_by = Some(reversal.id);
        linked.version += 1;

        state.entries.insert(reversal.id, reversal.clone());
        state.entries.insert(original_id, linked.clone());
        Ok((linked, reversal))
    }

    async fn posted_lines_in_period(
        &self,
        caller: Scope,
        period: FiscalPeriod,
    ) -> Result<Vec<PostedLine>, LedgerError> {
        let state = self.state.read().await;
        let mut lines: Vec<PostedLine> = state
            .entries
            .values()
            .filter(|entry| {
                entry.status == EntryStatus::Posted
                    && entry.scope.visible_to(&caller)
                    && period.contains(entry.entry_date)
            })
            .flat_map(posted_lines_of)
            .collect();
        lines.sort_by_key(|posted| (posted.entry_date, posted.entry_id));
        Ok(lines)
    }

    async fn posted_lines_for_account(
        &self,
        account_id: AccountId,
        up_to: NaiveDate,
    ) -> Result<Vec<PostedLine>, LedgerError> {
        let state = self.state.read().await;
        let mut lines: Vec<PostedLine> = state
            .entries
            .values()
            .filter(|entry| entry.status == EntryStatus::Posted && entry.entry_date <= up_to)
            .flat_map(posted_lines_of)
            .filter(|posted| posted.line.account_id == account_id)
            .collect();
        lines.sort_by_key(|posted| (posted.entry_date, posted.entry_id));
        Ok(lines)
    }
}
