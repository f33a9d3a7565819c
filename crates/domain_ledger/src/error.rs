//! Ledger domain errors
//!
//! The error taxonomy is part of the API contract: callers branch on the
//! variant, never on message text. `Conflict` is the only retryable
//! variant, and only after the caller refetches the current record.

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or unbalanced input; the caller must fix and resubmit
    #[error("Validation error: {0}")]
    Validation(String),

    /// Illegal transition for the record's current status; not retryable
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Optimistic-lock mismatch; retryable after refetching the record
    #[error("Version conflict: expected {expected}, current {current} ({hint})")]
    Conflict {
        expected: u32,
        current: u32,
        hint: String,
    },

    /// Missing or out-of-scope reference
    #[error("Not found: {0}")]
    NotFound(String),

    /// Money arithmetic failure (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Failure in the backing store
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        LedgerError::InvalidState(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LedgerError::NotFound(message.into())
    }

    pub fn conflict(expected: u32, current: u32, hint: impl Into<String>) -> Self {
        LedgerError::Conflict {
            expected,
            current,
            hint: hint.into(),
        }
    }

    /// Returns true if the caller may retry after refetching
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Conflict { .. })
    }
}
