//! Fetch error types.

use thiserror::Error;

/// Error type for fetch operations.
///
/// During the listing phase every variant is fatal for the session. During
/// the stats phase the collector converts these into per-post `Failed`
/// ledger entries instead of propagating them.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Non-success HTTP status without a decodable GraphQL error payload.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Bounded body snippet.
        body: String,
    },

    /// The body did not decode as the declared content type.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server reported a GraphQL error.
    #[error("GraphQL error: {message}")]
    Graphql {
        /// Structured error code from the first error's extensions, when set.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The derived credential is not a valid header value.
    #[error("Invalid credential header: {0}")]
    InvalidHeader(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] veloview_core::CoreError),
}
