//! Error types for the upstream clients.

use hearsay_core::ValidationError;
use serde::Deserialize;

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, UpstreamError>;

/// Errors raised while talking to an upstream API.
///
/// Transport faults and non-2xx statuses are not told apart by callers: both
/// are reported as a single "upstream failed" condition and never retried.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Caller-supplied argument rejected before any request was made.
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// Response body grew past the configured cap.
    #[error("Response body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// Location search returned no matches.
    #[error("No location found matching '{0}'")]
    LocationNotFound(String),

    /// Resource lookup returned an empty result.
    #[error("Resource not found: {0}")]
    NotFound(String),
}

const MAX_ERROR_BODY: usize = 200;

impl UpstreamError {
    /// True when the caller's input was at fault rather than the upstream.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed
                .message
                .or_else(|| parsed.error.and_then(|e| e.as_str().map(str::to_string)))
                .unwrap_or_else(|| truncate(body)),
            Err(_) => truncate(body),
        };
        Self::Api { status, message }
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Error payload shapes used by the upstream APIs.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}
