// src/core/error.rs

use reqwest::StatusCode;
use serde_json::Value;

/// Everything that can go wrong while relaying one scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The client did not send a usable URL.
    #[error("No URL provided")]
    Validation,

    /// The threat API answered, but with a non-success status.
    #[error("threat API returned {status}")]
    Upstream { status: StatusCode, detail: Value },

    /// The threat API could not be reached or did not answer in time.
    #[error("threat API unreachable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ScanError {
    /// Diagnostic payload returned to the client next to the generic failure message.
    pub fn detail(&self) -> Value {
        match self {
            ScanError::Upstream { detail, .. } => detail.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// Builds an `Upstream` error from a raw response body. Bodies that are not
    /// JSON are kept as a JSON string; an empty body falls back to the error text.
    pub fn upstream(status: StatusCode, body: &str) -> Self {
        if body.trim().is_empty() {
            let detail = Value::String(format!("threat API returned {}", status));
            return ScanError::Upstream { status, detail };
        }
        let detail = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
        ScanError::Upstream { status, detail }
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ScanError::UpstreamUnavailable(e)
        } else {
            ScanError::Internal(e.to_string())
        }
    }
}
