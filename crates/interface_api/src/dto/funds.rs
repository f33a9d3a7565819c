//! Fund and contribution DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{AccountId, ContributionTypeId, FundId, OperatorId};

use super::ScopeParams;

#[derive(Debug, Deserialize)]
pub struct CreateFundRequest {
    pub name: String,
    pub revenue_account_id: AccountId,
    #[serde(flatten)]
    pub scope: ScopeParams,
}

#[derive(Debug, Deserialize)]
pub struct CreateContributionTypeRequest {
    pub name: String,
    #[serde(flatten)]
    pub scope: ScopeParams,
}

#[derive(Debug, Deserialize)]
pub struct CreateMappingRequest {
    pub contribution_type_id: ContributionTypeId,
    pub fund_id: FundId,
    #[serde(flatten)]
    pub scope: ScopeParams,
    pub actor: OperatorId,
}

#[derive(Debug, Deserialize)]
pub struct CreateDefaultsRequest {
    #[serde(flatten)]
    pub scope: ScopeParams,
    pub actor: OperatorId,
}

#[derive(Debug, Deserialize)]
pub struct ResolveMappingQuery {
    pub contribution_type_id: ContributionTypeId,
    pub organisation_id: core_kernel::OrganisationId,
    pub branch_id: Option<core_kernel::BranchId>,
}

/// A contribution received at the intake boundary
///
/// Routed to a fund via the active mapping and booked as a posted
/// journal entry in one request.
#[derive(Debug, Deserialize)]
pub struct ContributionRequest {
    pub contribution_type_id: ContributionTypeId,
    pub amount: Decimal,
    pub cash_account_id: AccountId,
    pub entry_date: NaiveDate,
    pub created_by: OperatorId,
    #[serde(flatten)]
    pub scope: ScopeParams,
}
