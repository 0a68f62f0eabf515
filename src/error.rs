//! Error types for fetching and analyzing mail

use thiserror::Error;

/// Errors raised by the mail source adapter and credential loading.
///
/// Feature extraction itself never fails; only getting messages can.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to the mail provider
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("{context} failed: {status} ({body})")]
    Status {
        context: String,
        status: u16,
        body: String,
    },

    /// Response body was not the JSON we expected
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw message payload could not be decoded
    #[error("Failed to decode message {id}: {details}")]
    Decode { id: String, details: String },

    /// Credentials file missing, unreadable or unusable
    #[error("Invalid credentials: {0}")]
    Credentials(String),
}

/// Result type for mail source operations
pub type Result<T> = std::result::Result<T, Error>;
