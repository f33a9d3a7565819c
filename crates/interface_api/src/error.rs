//! API error handling
//!
//! One `ApiError` type with `From` conversions from every domain error,
//! so handlers can use `?` throughout. Conflict responses carry the
//! store's current version; mismatch responses carry the computed
//! difference, both as structured body fields the client can act on.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::Money;
use domain_funds::FundError;
use domain_ledger::LedgerError;
use domain_reconciliation::ReconciliationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Conflict: {hint}")]
    Conflict {
        hint: String,
        /// Authoritative version, when the conflicting record carries one
        current_version: Option<u32>,
    },

    #[error("Reconciliation mismatch: {difference}")]
    Mismatch { difference: Money },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Authoritative version after an optimistic-lock conflict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<u32>,
    /// Computed difference after a reconciliation mismatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<Money>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type, current_version, difference) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None, None),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None, None),
            ApiError::InvalidState(_) => (StatusCode::CONFLICT, "invalid_state", None, None),
            ApiError::Conflict {
                current_version, ..
            } => (StatusCode::CONFLICT, "conflict", *current_version, None),
            ApiError::Mismatch { difference } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "reconciliation_mismatch",
                None,
                Some(*difference),
            ),
            ApiError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", None, None)
            }
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                None,
                None,
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            current_version,
            difference,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => ApiError::Validation(msg),
            LedgerError::InvalidState(msg) => ApiError::InvalidState(msg),
            LedgerError::Conflict { current, hint, .. } => ApiError::Conflict {
                hint,
                current_version: Some(current),
            },
            LedgerError::NotFound(msg) => ApiError::NotFound(msg),
            LedgerError::Money(err) => ApiError::Validation(err.to_string()),
            LedgerError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        match err {
            FundError::Validation(msg) => ApiError::Validation(msg),
            // Mapping supersede races carry no version token; the client
            // refetches the active mapping instead
            FundError::Conflict(msg) => ApiError::Conflict {
                hint: msg,
                current_version: None,
            },
            FundError::NotFound(msg) => ApiError::NotFound(msg),
            FundError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ReconciliationError> for ApiError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::Mismatch { difference } => ApiError::Mismatch { difference },
            ReconciliationError::InvalidState(msg) => ApiError::InvalidState(msg),
            ReconciliationError::Conflict { current, hint, .. } => ApiError::Conflict {
                hint,
                current_version: Some(current),
            },
            ReconciliationError::NotFound(msg) => ApiError::NotFound(msg),
            ReconciliationError::Validation(msg) => ApiError::Validation(msg),
            ReconciliationError::Money(err) => ApiError::Validation(err.to_string()),
            ReconciliationError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}
