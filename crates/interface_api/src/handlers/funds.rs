//! Fund, mapping, and contribution intake handlers

use axum::extract::{Query, State};
use axum::Json;

use core_kernel::{Money, Scope};
use domain_funds::{
    ContributionEvent, ContributionType, DefaultSeedReport, Fund, FundMapping, FundStore,
};
use domain_ledger::entry::NewJournalEntry;
use domain_ledger::JournalEntry;

use crate::dto::funds::{
    ContributionRequest, CreateContributionTypeRequest, CreateDefaultsRequest, CreateFundRequest,
    CreateMappingRequest, ResolveMappingQuery,
};
use crate::dto::ledger::ListAccountsQuery;
use crate::error::ApiError;
use crate::AppState;

/// Creates a fund
pub async fn create_fund(
    State(state): State<AppState>,
    Json(request): Json<CreateFundRequest>,
) -> Result<Json<Fund>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("fund name must not be empty".to_string()));
    }

    // The revenue account must exist and be postable before routing
    // contributions at it
    state.accounts.get(request.revenue_account_id).await?;

    let fund = Fund::new(request.name, request.revenue_account_id, request.scope.into());
    let created = state.fund_store.insert_fund(fund).await?;
    Ok(Json(created))
}

/// Lists funds visible to the caller scope
pub async fn list_funds(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<Fund>>, ApiError> {
    let scope = scope_from(query.organisation_id, query.branch_id);
    let funds = state.fund_store.funds(scope).await?;
    Ok(Json(funds))
}

/// Creates a contribution type
pub async fn create_contribution_type(
    State(state): State<AppState>,
    Json(request): Json<CreateContributionTypeRequest>,
) -> Result<Json<ContributionType>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "contribution type name must not be empty".to_string(),
        ));
    }

    let contribution_type = ContributionType::new(request.name, request.scope.into());
    let created = state
        .fund_store
        .insert_contribution_type(contribution_type)
        .await?;
    Ok(Json(created))
}

/// Lists contribution types visible to the caller scope
pub async fn list_contribution_types(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<ContributionType>>, ApiError> {
    let scope = scope_from(query.organisation_id, query.branch_id);
    let types = state.fund_store.contribution_types(scope).await?;
    Ok(Json(types))
}

/// Resolves the active mapping for a contribution type
pub async fn resolve_mapping(
    State(state): State<AppState>,
    Query(query): Query<ResolveMappingQuery>,
) -> Result<Json<FundMapping>, ApiError> {
    let scope = scope_from(query.organisation_id, query.branch_id);
    let mapping = state
        .funds
        .resolve(query.contribution_type_id, scope)
        .await?;
    Ok(Json(mapping))
}

/// Maps a contribution type to a fund, superseding any prior mapping
pub async fn create_mapping(
    State(state): State<AppState>,
    Json(request): Json<CreateMappingRequest>,
) -> Result<Json<FundMapping>, ApiError> {
    let mapping = state
        .funds
        .create_or_update(
            request.contribution_type_id,
            request.fund_id,
            request.scope.into(),
            request.actor,
        )
        .await?;
    Ok(Json(mapping))
}

/// Seeds default mappings for the well-known contribution type catalog
pub async fn create_defaults(
    State(state): State<AppState>,
    Json(request): Json<CreateDefaultsRequest>,
) -> Result<Json<DefaultSeedReport>, ApiError> {
    let report = state
        .funds
        .create_defaults(request.scope.into(), request.actor)
        .await?;
    Ok(Json(report))
}

/// Books a contribution: resolves its fund and posts the ledger entry
///
/// The entry is created and posted in one request; the response is the
/// posted entry.
pub async fn create_contribution(
    State(state): State<AppState>,
    Json(request): Json<ContributionRequest>,
) -> Result<Json<JournalEntry>, ApiError> {
    let scope: Scope = request.scope.into();
    let amount = Money::new(request.amount, state.config.base_currency);

    let event = ContributionEvent {
        contribution_type_id: request.contribution_type_id,
        amount,
        scope,
    };
    let posting = state
        .funds
        .contribution_posting(&event, request.cash_account_id)
        .await?;

    let draft = NewJournalEntry::new(
        scope,
        request.entry_date,
        posting.memo.clone(),
        request.created_by,
    )
    .debit(posting.debit_account_id, posting.amount)
    .credit(posting.credit_account_id, posting.amount);

    let created = state.journal.create(draft).await?;
    let posted = state.journal.post(created.id, created.version).await?;
    Ok(Json(posted))
}

fn scope_from(
    organisation_id: core_kernel::OrganisationId,
    branch_id: Option<core_kernel::BranchId>,
) -> Scope {
    match branch_id {
        Some(branch) => Scope::branch(organisation_id, branch),
        None => Scope::organisation(organisation_id),
    }
}
