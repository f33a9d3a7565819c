//! Reconciliation domain errors

use core_kernel::{Money, MoneyError};
use thiserror::Error;

/// Errors that can occur during reconciliation
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// The adjusted balance disagrees with the bank statement beyond the
    /// rounding tolerance; carries the computed difference so the
    /// operator can be guided toward the discrepancy
    #[error("Reconciliation mismatch: difference of {difference}")]
    Mismatch { difference: Money },

    /// Illegal operation for the session's current status
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Optimistic-lock mismatch; retryable after refetching the session
    #[error("Version conflict: expected {expected}, current {current} ({hint})")]
    Conflict {
        expected: u32,
        current: u32,
        hint: String,
    },

    /// Missing session or non-candidate line
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Money arithmetic failure (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Failure in the backing store
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReconciliationError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        ReconciliationError::InvalidState(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ReconciliationError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ReconciliationError::Validation(message.into())
    }

    pub fn conflict(expected: u32, current: u32, hint: impl Into<String>) -> Self {
        ReconciliationError::Conflict {
            expected,
            current,
            hint: hint.into(),
        }
    }
}
