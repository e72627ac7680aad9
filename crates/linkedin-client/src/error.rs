//! LinkedIn client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkedInError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Throttled by the service. Transient, worth retrying.
    #[error("request throttled")]
    Throttled,

    /// The session cookie is invalid or expired. Not retryable.
    #[error("session unauthorized")]
    Unauthorized,

    /// The service raised a verification wall. Not retryable.
    #[error("challenge verification required")]
    Challenge,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl LinkedInError {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LinkedInError::Unauthorized | LinkedInError::Challenge)
    }
}
