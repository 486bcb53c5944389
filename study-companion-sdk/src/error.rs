//! Transport failures

use thiserror::Error;

use crate::endpoint::Endpoint;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Every way a backend call can fail
#[derive(Debug, Error)]
pub enum TransportError {
    /// Backend answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}{}", format_detail(.detail))]
    Status {
        endpoint: Endpoint,
        status: u16,
        detail: Option<String>,
    },

    /// Connection refused, DNS failure, timeout and friends
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx response whose body did not have the expected shape
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },

    /// The request could not be built (bad base URL, bad MIME type)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Backend-provided detail, if the error response carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            TransportError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Pull the `detail` string out of an error body.
///
/// FastAPI-style backends answer errors with `{"detail": "..."}`. Anything
/// else (plain text, validation arrays, empty strings) yields `None`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}
