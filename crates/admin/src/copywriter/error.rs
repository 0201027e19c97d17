//! Error types for the copywriter API client.

use thiserror::Error;

/// Errors that can occur when requesting generated copy.
///
/// These never escape the copywriter service boundary; callers of the
/// service always receive text (generated or fallback).
#[derive(Debug, Error)]
pub enum CopywriterError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error body.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: API key rejected")]
    Unauthorized,

    /// API key contains bytes that cannot go in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The completion carried no usable text.
    #[error("completion was empty")]
    EmptyCompletion,
}

/// API error response envelope.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiErrorDetail,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}
