//! Chart of accounts handlers

use axum::extract::{Path, Query, State};
use axum::Json;

use core_kernel::AccountId;
use domain_ledger::Account;

use crate::dto::ledger::{CreateAccountRequest, ListAccountsQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates an account
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let mut account = Account::new(
        request.code,
        request.name,
        request.account_type,
        request.scope.into(),
    );
    if let Some(description) = request.description {
        account = account.with_description(description);
    }

    let created = state.accounts.create(account).await?;
    Ok(Json(created))
}

/// Lists accounts visible to the caller scope, in chart order
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let scope = match query.branch_id {
        Some(branch) => core_kernel::Scope::branch(query.organisation_id, branch),
        None => core_kernel::Scope::organisation(query.organisation_id),
    };
    let accounts = state.accounts.list(scope).await?;
    Ok(Json(accounts))
}

/// Gets an account by id
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<Json<Account>, ApiError> {
    let account = state.accounts.get(id).await?;
    Ok(Json(account))
}

/// Deactivates an account
pub async fn deactivate_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<Json<Account>, ApiError> {
    let account = state.accounts.deactivate(id).await?;
    Ok(Json(account))
}
