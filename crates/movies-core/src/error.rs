//! Error types for catalog operations.
//!
//! This module defines [`MovieError`] which covers all error cases that can occur
//! when fetching, decoding, or caching movie data.

use thiserror::Error;

/// Message shown to users when an error carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors that can occur during catalog operations.
#[derive(Error, Debug)]
pub enum MovieError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("{0}")]
    Network(String),

    /// The upstream API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Status message reported by the API, or the raw response body.
        message: String,
    },

    /// Error decoding a response or a cached payload.
    #[error("{0}")]
    Parse(String),

    /// Error interacting with the local cache.
    #[error("{0}")]
    Cache(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl MovieError {
    /// Returns the human-readable message for this error.
    ///
    /// Falls back to [`UNKNOWN_ERROR`] when the underlying cause has no message.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<serde_json::Error> for MovieError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Result type alias using [`MovieError`].
pub type Result<T> = std::result::Result<T, MovieError>;
