//! Client-side error type
//!
//! Transport failures, timeouts and HTTP error statuses are not treated
//! differently by the stores: they only surface the optional server
//! `detail` message, falling back to a per-operation text.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be assembled (body encoding, browser API failure)
    #[error("request could not be built: {0}")]
    Request(String),
    /// Connection refused, DNS failure, CORS rejection...
    #[error("network error: {0}")]
    Network(String),
    /// The explicit request timeout elapsed
    #[error("request timed out")]
    Timeout,
    /// Non-2xx response
    #[error("server responded with status {status}")]
    Status { status: u16, detail: Option<String> },
    /// 2xx response whose body does not match the expected shape
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text shown to the user: the server detail, or `fallback` when
    /// the detail is missing or blank.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail()
            .filter(|detail| !detail.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
