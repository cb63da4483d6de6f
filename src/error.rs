//! Error types for the data access layer
//!
//! Provides unified error handling using thiserror. Every failure leaving
//! `RequestClient` is normalized into exactly one `ApiError` variant.

use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for all API operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Upstream returned a non-success HTTP status
    #[error("HTTP error: status {0}")]
    Http(u16),

    /// Transport could not reach the server
    #[error("Network error: unable to connect to server")]
    Network,

    /// The request timed out before a response arrived
    #[error("Request timed out")]
    Timeout,

    /// A caller-supplied cancellation signal fired mid-request
    #[error("Request cancelled")]
    Cancelled,

    /// Catch-all for unexpected failures (decode errors, dropped channels)
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// True for deliberate cancellation, as opposed to a stalled server.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Returns the HTTP status code, if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http(status) => Some(*status),
            _ => None,
        }
    }
}

// == Reqwest Normalization ==
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() || err.is_request() {
            ApiError::Network
        } else {
            ApiError::Unknown(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the data access layer.
pub type Result<T> = std::result::Result<T, ApiError>;
