//! Core error types for `VeloView`.

use thiserror::Error;

/// Core error type for `VeloView` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credential is missing or implausible.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
