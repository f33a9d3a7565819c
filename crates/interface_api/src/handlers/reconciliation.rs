//! Reconciliation session handlers

use axum::extract::{Path, Query, State};
use axum::Json;

use core_kernel::{AccountId, Money, ReconciliationSessionId};
use domain_reconciliation::ReconciliationSession;
use serde::Deserialize;

use crate::dto::reconciliation::{SaveSessionRequest, StartSessionRequest, ToggleClearedRequest};
use crate::error::ApiError;
use crate::AppState;

/// Opens a reconciliation session for an account
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<ReconciliationSession>, ApiError> {
    // Reject unknown accounts up front rather than opening an empty
    // session against nothing
    state.accounts.get(request.account_id).await?;

    let session = state
        .reconciliation
        .start_session(
            request.account_id,
            request.reconciliation_date,
            state.config.base_currency,
        )
        .await?;
    Ok(Json(session))
}

/// Gets a session by id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<ReconciliationSessionId>,
) -> Result<Json<ReconciliationSession>, ApiError> {
    let session = state.reconciliation.get(id).await?;
    Ok(Json(session))
}

#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub account_id: AccountId,
}

/// Lists sessions for an account, most recent first
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<ReconciliationSession>>, ApiError> {
    let sessions = state
        .reconciliation
        .sessions_for_account(query.account_id)
        .await?;
    Ok(Json(sessions))
}

/// Toggles a candidate line's cleared flag
pub async fn toggle_cleared(
    State(state): State<AppState>,
    Path(id): Path<ReconciliationSessionId>,
    Json(request): Json<ToggleClearedRequest>,
) -> Result<Json<ReconciliationSession>, ApiError> {
    let session = state
        .reconciliation
        .toggle_cleared(id, request.line_id)
        .await?;
    Ok(Json(session))
}

/// Saves the session against the presented bank statement balance
pub async fn save_session(
    State(state): State<AppState>,
    Path(id): Path<ReconciliationSessionId>,
    Json(request): Json<SaveSessionRequest>,
) -> Result<Json<ReconciliationSession>, ApiError> {
    let balance = Money::new(request.bank_statement_balance, state.config.base_currency);
    let session = state
        .reconciliation
        .save(id, balance, request.notes)
        .await?;
    Ok(Json(session))
}
