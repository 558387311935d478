//! Error types for kippo
//!
//! This module provides structured error handling using thiserror.
//!
//! The taxonomy is deliberately small:
//! - `InvalidInput`: malformed or out-of-range request data, surfaced as 400
//! - `LookupFailed`: upstream geocoding/places provider failure, surfaced as 500
//! - `Config`: startup misconfiguration (missing API key, bad port)

use thiserror::Error;

/// Result type alias for kippo operations
pub type Result<T> = std::result::Result<T, KippoError>;

/// Errors that can occur while computing recommendations
#[derive(Error, Debug)]
pub enum KippoError {
    /// Malformed or out-of-range request data; never retried
    #[error("{message}")]
    InvalidInput { message: String },

    /// Upstream geocoding/places provider unavailable or returned no usable data
    #[error("{message}")]
    LookupFailed { message: String },

    /// Invalid startup configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl KippoError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        KippoError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a lookup failed error
    pub fn lookup_failed(message: impl Into<String>) -> Self {
        KippoError::LookupFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        KippoError::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for KippoError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts and transport failures are infrastructure problems,
        // not user input problems.
        KippoError::LookupFailed {
            message: format!("upstream request failed: {}", err),
        }
    }
}
