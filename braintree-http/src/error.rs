//! HTTP transport error types.

use thiserror::Error;

/// Result type for HTTP transport operations.
pub type Result<T> = std::result::Result<T, HttpTransportError>;

/// HTTP transport errors.
///
/// These only cover building requests; failures of a performed call are
/// reported as a `TransportOutcome`.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// The method name is not a valid HTTP method.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid header name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
