//! Journal entry and line types
//!
//! A journal entry is the unit of double-entry bookkeeping: an ordered set
//! of lines, each touching one account on exactly one side, that must sum
//! to equal debits and credits at every point in its lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{
    AccountId, Currency, JournalEntryId, JournalLineId, Money, OperatorId, Scope,
};

use crate::error::LedgerError;

/// Side of a journal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

/// Lifecycle status of a journal entry
///
/// `Draft --post--> Posted --void--> Void`. A posted entry may also be
/// reversed, which creates a new linked entry rather than changing this
/// one. No transition ever returns an entry to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Posted,
    Void,
}

/// A single line in a journal entry
///
/// Exactly one of `debit`/`credit` is non-zero; both are non-negative.
/// Lines are owned by their entry and never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique line identifier
    pub id: JournalLineId,
    /// Account this line posts to
    pub account_id: AccountId,
    /// Debit amount (zero when the line is a credit)
    pub debit: Money,
    /// Credit amount (zero when the line is a debit)
    pub credit: Money,
    /// Optional line memo
    pub memo: Option<String>,
}

impl JournalLine {
    /// Creates a debit line
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: JournalLineId::new_v7(),
            account_id,
            debit: amount,
            credit: Money::zero(amount.currency()),
            memo: None,
        }
    }

    /// Creates a credit line
    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: JournalLineId::new_v7(),
            account_id,
            debit: Money::zero(amount.currency()),
            credit: amount,
            memo: None,
        }
    }

    /// Sets the line memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Returns which side of the entry this line is on
    pub fn side(&self) -> Side {
        if self.debit.is_zero() {
            Side::Credit
        } else {
            Side::Debit
        }
    }

    /// Returns the non-zero amount of the line
    pub fn amount(&self) -> Money {
        match self.side() {
            Side::Debit => self.debit,
            Side::Credit => self.credit,
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit)
    pub fn signed_amount(&self) -> Decimal {
        match self.side() {
            Side::Debit => self.debit.amount(),
            Side::Credit => -self.credit.amount(),
        }
    }

    /// Returns a copy with debit and credit swapped, under a fresh id
    ///
    /// Used to build reversal entries.
    pub fn swapped(&self) -> Self {
        Self {
            id: JournalLineId::new_v7(),
            account_id: self.account_id,
            debit: self.credit,
            credit: self.debit,
            memo: self.memo.clone(),
        }
    }

    /// Validates the line shape
    ///
    /// # Errors
    ///
    /// Returns `Validation` when both or neither side is set, or when an
    /// amount is negative, or when the sides disagree on currency
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.debit.currency() != self.credit.currency() {
            return Err(LedgerError::validation(
                "line debit and credit must share a currency",
            ));
        }
        if self.debit.is_negative() || self.credit.is_negative() {
            return Err(LedgerError::validation("line amounts must be non-negative"));
        }
        match (self.debit.is_zero(), self.credit.is_zero()) {
            (true, true) => Err(LedgerError::validation(
                "line must carry a debit or a credit",
            )),
            (false, false) => Err(LedgerError::validation(
                "line must not carry both a debit and a credit",
            )),
            _ => Ok(()),
        }
    }
}

/// A journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier
    pub id: JournalEntryId,
    /// Accounting date of the entry
    pub entry_date: NaiveDate,
    /// Lifecycle status
    pub status: EntryStatus,
    /// Optimistic-lock token; incremented on every stored mutation
    pub version: u32,
    /// Ordered lines
    pub lines: Vec<JournalLine>,
    /// Entry this one reverses, if any
    pub reversal_of: Option<JournalEntryId>,
    /// Entry that reverses this one, if any
    pub reversed_by: Option<JournalEntryId>,
    /// Entry memo
    pub memo: String,
    /// Operator who created the entry
    pub created_by: OperatorId,
    /// Organisation/branch the entry belongs to
    pub scope: Scope,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// When the entry was posted
    pub posted_at: Option<DateTime<Utc>>,
    /// When the entry was voided
    pub voided_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    /// Returns the sum of all debit amounts
    pub fn total_debits(&self) -> Result<Money, LedgerError> {
        let mut total = Money::zero(self.currency());
        for line in &self.lines {
            total = total.checked_add(&line.debit)?;
        }
        Ok(total)
    }

    /// Returns the sum of all credit amounts
    pub fn total_credits(&self) -> Result<Money, LedgerError> {
        let mut total = Money::zero(self.currency());
        for line in &self.lines {
            total = total.checked_add(&line.credit)?;
        }
        Ok(total)
    }

    /// Returns true if total debits equal total credits
    pub fn is_balanced(&self) -> bool {
        match (self.total_debits(), self.total_credits()) {
            (Ok(debits), Ok(credits)) => debits == credits,
            _ => false,
        }
    }

    /// Returns the entry currency, taken from its first line
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map(|line| line.debit.currency())
            .unwrap_or(Currency::USD)
    }
}

/// A draft journal entry, before validation and persistence
///
/// Built with the fluent line constructors and handed to
/// `JournalService::create`.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    /// Accounting date
    pub entry_date: NaiveDate,
    /// Entry memo
    pub memo: String,
    /// Creating operator
    pub created_by: OperatorId,
    /// Organisation/branch scope
    pub scope: Scope,
    /// Ordered lines
    pub lines: Vec<JournalLine>,
}

impl NewJournalEntry {
    /// Creates an empty draft
    pub fn new(
        scope: Scope,
        entry_date: NaiveDate,
        memo: impl Into<String>,
        created_by: OperatorId,
    ) -> Self {
        Self {
            entry_date,
            memo: memo.into(),
            created_by,
            scope,
            lines: Vec::new(),
        }
    }

    /// Adds a debit line
    pub fn debit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.lines.push(JournalLine::debit(account_id, amount));
        self
    }

    /// Adds a credit line
    pub fn credit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.lines.push(JournalLine::credit(account_id, amount));
        self
    }

    /// Adds a pre-built line
    pub fn line(mut self, line: JournalLine) -> Self {
        self.lines.push(line);
        self
    }
}
