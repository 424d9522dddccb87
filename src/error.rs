//! Client-side error types for the budget workflow

use thiserror::Error;

/// Amount entered in the budget form that cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Budget must be a positive number.")]
    NotANumber(String),

    #[error("Budget must be a positive number.")]
    NotPositive(String),

    /// Positive, but too large or too finely divided for a 28-digit decimal
    #[error("Budget must be a positive number.")]
    OutOfRange(String),
}

impl ValidationError {
    /// Code reported alongside the message in JSON output
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NotANumber(_) => "NOT_A_NUMBER",
            ValidationError::NotPositive(_) => "NOT_POSITIVE",
            ValidationError::OutOfRange(_) => "OUT_OF_RANGE",
        }
    }
}

/// Failure talking to the budget service
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service rejected {operation} with status {status}")]
    Rejected {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

impl SyncError {
    /// HTTP status of a rejected request, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Rejected { status, .. } => Some(*status),
            SyncError::Transport(err) => err.status().map(|s| s.as_u16()),
            SyncError::InvalidUrl(_) => None,
        }
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}
