//! Ledger DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{AccountId, OperatorId};
use domain_ledger::{AccountType, Side};

use super::ScopeParams;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(flatten)]
    pub scope: ScopeParams,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub account_id: AccountId,
    pub side: Side,
    pub amount: Decimal,
    pub memo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub entry_date: NaiveDate,
    pub memo: String,
    pub created_by: OperatorId,
    #[serde(flatten)]
    pub scope: ScopeParams,
    pub lines: Vec<LineRequest>,
}

/// Version token accompanying a state transition
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub expected_version: u32,
}

#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    pub reversal_date: NaiveDate,
    pub created_by: OperatorId,
}

#[derive(Debug, Deserialize)]
pub struct TrialBalanceQuery {
    pub fiscal_year: i32,
    pub period: u8,
    pub organisation_id: core_kernel::OrganisationId,
    pub branch_id: Option<core_kernel::BranchId>,
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub organisation_id: core_kernel::OrganisationId,
    pub branch_id: Option<core_kernel::BranchId>,
}
