//! Account types for the chart of accounts
//!
//! This module defines the account structure for double-entry bookkeeping
//! and the registry service that manages it. Accounts are never deleted,
//! only deactivated, so posted history always resolves.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use core_kernel::{AccountId, Scope};

use crate::error::LedgerError;
use crate::store::LedgerStore;

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Account code, unique within its scope (e.g., "1000")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Organisation/branch the account belongs to
    pub scope: Scope,
    /// Description
    pub description: Option<String>,
    /// Whether the account accepts new postings
    pub is_active: bool,
}

impl Account {
    /// Creates a new active account
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        scope: Scope,
    ) -> Self {
        Self {
            id: AccountId::new_v7(),
            code: code.into(),
            name: name.into(),
            account_type,
            scope,
            description: None,
            is_active: true,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the account can take a new journal line from the
    /// given caller scope
    pub fn postable_from(&self, caller: &Scope) -> bool {
        self.is_active && self.scope.visible_to(caller)
    }
}

/// Registry service for the chart of accounts
///
/// Thin orchestration over the ledger store: creation, listing, and
/// deactivation. There is deliberately no update or delete operation;
/// an account referenced by posted history must stay resolvable forever.
pub struct AccountRegistry<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> AccountRegistry<S> {
    /// Creates a new registry over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates an account
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the code is empty or already used within
    /// the account's scope
    pub async fn create(&self, account: Account) -> Result<Account, LedgerError> {
        if account.code.trim().is_empty() {
            return Err(LedgerError::validation("account code must not be empty"));
        }
        if account.name.trim().is_empty() {
            return Err(LedgerError::validation("account name must not be empty"));
        }
        let created = self.store.insert_account(account).await?;
        info!(account_id = %created.id, code = %created.code, "Account created");
        Ok(created)
    }

    /// Returns an account by id
    pub async fn get(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.store
            .account(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(format!("account {id}")))
    }

    /// Lists accounts visible to the caller scope
    pub async fn list(&self, caller: Scope) -> Result<Vec<Account>, LedgerError> {
        self.store.accounts(caller).await
    }

    /// Deactivates an account
    ///
    /// The account remains in the chart and in all historical reports;
    /// it simply stops accepting new journal lines.
    pub async fn deactivate(&self, id: AccountId) -> Result<Account, LedgerError> {
        let account = self.store.deactivate_account(id).await?;
        info!(account_id = %id, "Account deactivated");
        Ok(account)
    }
}

/// Standard chart of accounts for a congregation
pub struct CongregationChartOfAccounts;

impl CongregationChartOfAccounts {
    /// Creates the standard accounts for an organisation scope
    pub fn create_standard_accounts(scope: Scope) -> Vec<Account> {
        vec![
            // Assets
            Account::new("1000", "Cash on Hand", AccountType::Asset, scope),
            Account::new("1100", "Main Bank Account", AccountType::Asset, scope),
            Account::new("1200", "Pledges Receivable", AccountType::Asset, scope),
            // Liabilities
            Account::new("2000", "Accounts Payable", AccountType::Liability, scope),
            Account::new("2100", "Payroll Liabilities", AccountType::Liability, scope),
            // Equity
            Account::new("3000", "General Fund Balance", AccountType::Equity, scope),
            // Revenue
            Account::new("4000", "Tithe Income", AccountType::Revenue, scope),
            Account::new("4100", "Offering Income", AccountType::Revenue, scope),
            Account::new("4200", "Pledge Income", AccountType::Revenue, scope),
            Account::new("4300", "Special Contribution Income", AccountType::Revenue, scope),
            Account::new("4400", "Donation Income", AccountType::Revenue, scope),
            // Expenses
            Account::new("5000", "Ministry Expense", AccountType::Expense, scope),
            Account::new("5100", "Facilities Expense", AccountType::Expense, scope),
            Account::new("5200", "Benevolence Expense", AccountType::Expense, scope),
        ]
    }
}
