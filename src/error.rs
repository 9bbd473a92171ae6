//! Error types for input validation and remote fetches.
//!
//! Every [`FetchError`] variant collapses into the same user-visible line at
//! the CLI boundary; the variants only exist so logs can tell them apart.

use thiserror::Error;

/// Required input (owner, repository or token) was blank or unusable.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} {reason}")]
pub struct InvalidInputError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Any failure while talking to the hosting service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Bad credentials (HTTP 401)")]
    Unauthorized,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("API rate limit exceeded (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("GitHub API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("invalid API base URL: {0}")]
    BaseUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
