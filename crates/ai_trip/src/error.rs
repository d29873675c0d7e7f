//! Trip estimator errors
//!
//! Internal to this crate: every failure path ends in the demo fallback, so
//! nothing here crosses the port boundary.

use thiserror::Error;

/// Errors from the generative estimation request
#[derive(Debug, Error)]
pub enum TripAiError {
    /// Failed to connect to the generative API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the generative API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body could not be parsed into route options
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The response contained no completion text
    #[error("Empty completion")]
    EmptyCompletion,
}

impl From<reqwest::Error> for TripAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
