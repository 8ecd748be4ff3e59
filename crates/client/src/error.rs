//! Error taxonomy for the API client.
//!
//! Failure classes follow the transport-level taxonomy: `network` (no
//! response received), `http-status` (the server responded with an error
//! code), `request-error` (the request was malformed before dispatch). Token
//! refresh failure is the only terminal class; it forces a full session
//! teardown.

use reqwest::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the API client and the stores built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received from the server.
    #[error("Network error: {0}")]
    Network(String),

    /// The server responded with a non-success status code.
    #[error("HTTP {status}: {message}")]
    Status {
        status: StatusCode,
        /// Server-provided message when the body carries one, otherwise the
        /// canonical status reason.
        message: String,
    },

    /// The request could not be constructed or dispatched.
    #[error("Request error: {0}")]
    Request(String),

    /// A response body could not be deserialized.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The credential refresh cycle failed. Terminal: local session state
    /// has been torn down and a login navigation intent reported.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Durable storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Short classification label used in logs.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "http-status",
            Self::Request(_) => "request-error",
            Self::Parse(_) => "parse-error",
            Self::RefreshFailed(_) => "refresh-failed",
            Self::Storage(_) => "storage",
        }
    }

    /// Whether this is an HTTP error with the given status.
    #[must_use]
    pub fn is_status(&self, code: StatusCode) -> bool {
        matches!(self, Self::Status { status, .. } if *status == code)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() || e.is_request() {
            Self::Request(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(ApiError::Network("down".into()).class(), "network");
        assert_eq!(
            ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".into()
            }
            .class(),
            "http-status"
        );
        assert_eq!(ApiError::Request("bad url".into()).class(), "request-error");
        assert_eq!(
            ApiError::RefreshFailed("expired".into()).class(),
            "refresh-failed"
        );
    }

    #[test]
    fn test_is_status() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".into(),
        };
        assert!(err.is_status(StatusCode::UNAUTHORIZED));
        assert!(!err.is_status(StatusCode::FORBIDDEN));
        assert!(!ApiError::Network("x".into()).is_status(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found: Not Found");
    }
}
