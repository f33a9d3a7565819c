//! Trial balance computation
//!
//! Aggregates posted, non-void journal lines for a fiscal period into
//! per-account debit/credit totals. The computation is a pure, repeatable
//! read: the same committed data always yields the same report. Both
//! sides are carried for every account; collapsing to the normal balance
//! side is a display concern.
//!
//! An unbalanced result is reported as data rather than an error: it
//! signals that something upstream bypassed the ledger (a storage bug or
//! a hand-edited record), and silently "correcting" it would destroy the
//! evidence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{instrument, warn};

use core_kernel::{AccountId, Currency, FiscalPeriod, Money, Scope};

use crate::account::{Account, AccountType};
use crate::error::LedgerError;
use crate::store::{LedgerStore, PostedLine};

/// Per-account totals within a trial balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account identifier
    pub account_id: AccountId,
    /// Account code
    pub account_code: String,
    /// Account name
    pub account_name: String,
    /// Account type
    pub account_type: AccountType,
    /// Sum of debit amounts in the period
    pub debit_total: Money,
    /// Sum of credit amounts in the period
    pub credit_total: Money,
}

/// A computed trial balance for one scope and fiscal period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Scope the report covers
    pub scope: Scope,
    /// Fiscal period the report covers
    pub period: FiscalPeriod,
    /// Per-account rows, ordered by account code
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of all debit totals
    pub total_debits: Money,
    /// Sum of all credit totals
    pub total_credits: Money,
    /// Whether total debits equal total credits
    ///
    /// `false` is an integrity warning about upstream data, not a
    /// call-time failure.
    pub is_balanced: bool,
}

impl TrialBalance {
    /// Builds a trial balance from posted lines and their accounts
    ///
    /// Pure aggregation; `compute` fetches the inputs and delegates here.
    pub fn from_lines(
        scope: Scope,
        period: FiscalPeriod,
        accounts: &[Account],
        lines: &[PostedLine],
        currency: Currency,
    ) -> Result<Self, LedgerError> {
        let account_index: BTreeMap<AccountId, &Account> =
            accounts.iter().map(|a| (a.id, a)).collect();

        // BTreeMap keyed by code keeps rows in chart order
        let mut totals: BTreeMap<String, TrialBalanceRow> = BTreeMap::new();

        for posted in lines {
            let account = account_index.get(&posted.line.account_id).ok_or_else(|| {
                LedgerError::Storage(format!(
                    "posted line references unknown account {}",
                    posted.line.account_id
                ))
            })?;

            let row = totals
                .entry(account.code.clone())
                .or_insert_with(|| TrialBalanceRow {
                    account_id: account.id,
                    account_code: account.code.clone(),
                    account_name: account.name.clone(),
                    account_type: account.account_type,
                    debit_total: Money::zero(currency),
                    credit_total: Money::zero(currency),
                });

            row.debit_total = row.debit_total.checked_add(&posted.line.debit)?;
            row.credit_total = row.credit_total.checked_add(&posted.line.credit)?;
        }

        let mut total_debits = Money::zero(currency);
        let mut total_credits = Money::zero(currency);
        for row in totals.values() {
            total_debits = total_debits.checked_add(&row.debit_total)?;
            total_credits = total_credits.checked_add(&row.credit_total)?;
        }

        Ok(Self {
            scope,
            period,
            rows: totals.into_values().collect(),
            is_balanced: total_debits == total_credits,
            total_debits,
            total_credits,
        })
    }
}

/// Computes trial balances from the ledger store
pub struct TrialBalanceCalculator<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> TrialBalanceCalculator<S> {
    /// Creates a new calculator over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Computes the trial balance for a scope and fiscal period
    ///
    /// Side-effect-free and idempotent: a concurrently posted entry may
    /// or may not be reflected depending on snapshot timing, but two runs
    /// over the same committed data are identical.
    #[instrument(skip(self), fields(scope = %scope, period = %period))]
    pub async fn compute(
        &self,
        scope: Scope,
        period: FiscalPeriod,
        currency: Currency,
    ) -> Result<TrialBalance, LedgerError> {
        let lines = self.store.posted_lines_in_period(scope, period).await?;
        let accounts = self.store.accounts(scope).await?;

        let report = TrialBalance::from_lines(scope, period, &accounts, &lines, currency)?;

        if !report.is_balanced {
            warn!(
                scope = %scope,
                period = %period,
                total_debits = %report.total_debits,
                total_credits = %report.total_credits,
                "Trial balance does not balance; upstream data integrity violation"
            );
        }

        Ok(report)
    }
}
