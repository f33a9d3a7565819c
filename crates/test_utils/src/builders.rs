//! Builder Patterns for Test Data
//!
//! Fluent builders that produce valid domain objects with sensible
//! defaults, so tests only spell out what they care about.

use chrono::NaiveDate;
use core_kernel::{AccountId, Currency, Money, OperatorId, Scope};
use domain_funds::{ContributionType, Fund};
use domain_ledger::entry::NewJournalEntry;
use domain_ledger::{Account, AccountType};
use rust_decimal::Decimal;

use crate::fixtures::ScopeFixtures;

/// Builder for a balanced two-line journal entry draft
///
/// Defaults to a 100.00 USD cash-to-revenue posting under the fixture
/// organisation scope.
pub struct EntryDraftBuilder {
    scope: Scope,
    entry_date: NaiveDate,
    memo: String,
    created_by: OperatorId,
    debit_account: AccountId,
    credit_account: AccountId,
    amount: Money,
}

impl Default for EntryDraftBuilder {
    fn default() -> Self {
        Self {
            scope: ScopeFixtures::organisation(),
            entry_date: ScopeFixtures::entry_date(),
            memo: "Test posting".to_string(),
            created_by: ScopeFixtures::operator(),
            debit_account: AccountId::new(),
            credit_account: AccountId::new(),
            amount: Money::new(Decimal::new(10000, 2), Currency::USD),
        }
    }
}

impl EntryDraftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn entry_date(mut self, date: NaiveDate) -> Self {
        self.entry_date = date;
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn created_by(mut self, operator: OperatorId) -> Self {
        self.created_by = operator;
        self
    }

    pub fn debit_account(mut self, account: AccountId) -> Self {
        self.debit_account = account;
        self
    }

    pub fn credit_account(mut self, account: AccountId) -> Self {
        self.credit_account = account;
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Builds the draft
    pub fn build(self) -> NewJournalEntry {
        NewJournalEntry::new(self.scope, self.entry_date, self.memo, self.created_by)
            .debit(self.debit_account, self.amount)
            .credit(self.credit_account, self.amount)
    }
}

/// Builder for accounts
pub struct AccountBuilder {
    code: String,
    name: String,
    account_type: AccountType,
    scope: Scope,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self {
            code: "1100".to_string(),
            name: "Main Bank Account".to_string(),
            account_type: AccountType::Asset,
            scope: ScopeFixtures::organisation(),
        }
    }
}

impl AccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn build(self) -> Account {
        Account::new(self.code, self.name, self.account_type, self.scope)
    }
}

/// Builds a fund together with its revenue account
///
/// Returns the fund and the account its contributions credit; the
/// account still needs to be inserted into a ledger store by the test.
pub fn fund_with_revenue_account(name: &str, code: &str, scope: Scope) -> (Fund, Account) {
    let account = Account::new(code, format!("{name} Income"), AccountType::Revenue, scope);
    let fund = Fund::new(name, account.id, scope);
    (fund, account)
}

/// Builds an active contribution type under the given scope
pub fn contribution_type(name: &str, scope: Scope) -> ContributionType {
    ContributionType::new(name, scope)
}
