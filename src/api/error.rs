//! Error types surfaced by the request pipeline.

use crate::domain_model::SlugError;
use crate::domain_port::StoreError;
use serde_json::{Value, json};
use std::fmt;
use std::time::Duration;

/// Error body returned by the backend for a non-success status.
///
/// Kept verbatim; a body that is missing or not JSON is replaced with
/// `{"detail": <status text>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBody(pub Value);

impl ErrorBody {
    pub fn fallback(status_text: &str) -> Self {
        let detail = if status_text.is_empty() {
            "Unknown error"
        } else {
            status_text
        };
        ErrorBody(json!({ "detail": detail }))
    }

    /// Parse an error body, falling back to the status text.
    pub fn parse(raw: &str, status_text: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) if !value.is_null() => ErrorBody(value),
            _ => Self::fallback(status_text),
        }
    }

    /// The conventional `detail` message, when the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        self.0.get("detail").and_then(Value::as_str)
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => f.write_str(detail),
            None => write!(f, "{}", self.0),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("request failed with status {status}: {body}")]
    Application { status: u16, body: ErrorBody },
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("access token cannot be sent as a header: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
    #[error("invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            ApiError::AuthenticationFailed => Some(401),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_structured_body() {
        let body = ErrorBody::parse(r#"{"email": ["already registered"]}"#, "Bad Request");
        assert_eq!(body.0, json!({"email": ["already registered"]}));
        assert_eq!(body.detail(), None);
    }

    #[test]
    fn parse_falls_back_to_status_text() {
        let body = ErrorBody::parse("<html>oops</html>", "Internal Server Error");
        assert_eq!(body.detail(), Some("Internal Server Error"));

        let body = ErrorBody::parse("", "");
        assert_eq!(body.detail(), Some("Unknown error"));
    }

    #[test]
    fn display_prefers_detail() {
        let err = ApiError::Application {
            status: 403,
            body: ErrorBody(json!({"detail": "You do not have permission"})),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 403: You do not have permission"
        );
        assert_eq!(err.status(), Some(403));
    }
}
