//! API Error Types
//!
//! Failures of a call against the ClawHealth REST API, from the client side.

use thiserror::Error;

/// API client error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection could not be established
    #[error("API unavailable")]
    Unavailable,

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest error the same way for every call
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err)
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
