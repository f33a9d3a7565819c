//! Fund domain errors

use thiserror::Error;

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    /// Malformed input; the caller must fix and resubmit
    #[error("Validation error: {0}")]
    Validation(String),

    /// A concurrent writer won the race for the same scope and
    /// contribution type; retryable after refetching
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or out-of-scope reference
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failure in the backing store
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FundError {
    pub fn validation(message: impl Into<String>) -> Self {
        FundError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        FundError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        FundError::NotFound(message.into())
    }
}
