//! Transport-level error types.
//!
//! Every failure reported by the HTTP layer is surfaced through
//! [`TransportError`]. Remote conditions (authentication failure, not-found,
//! conflict, throttling) all arrive as [`ResponseError`] values carrying the
//! status code; the core never reinterprets or retries them beyond the
//! transport's own bounded retry for throttled responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use graph_todo::TransportError;
//!
//! match node.get().await {
//!     Ok(task) => println!("{task:?}"),
//!     Err(TransportError::Response(e)) if e.is_not_found() => {
//!         println!("gone: {}", e.message);
//!     }
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// The message field carries the serialized error body reported by the
/// service (for Graph, the `error.code` and `error.message` fields), and
/// `request_id` carries the `request-id` response header for support
/// correlation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// The `request-id` header value, if present.
    pub request_id: Option<String>,
}

impl ResponseError {
    /// Returns `true` for a 401 or 403 response.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        self.code == 401 || self.code == 403
    }

    /// Returns `true` for a 404 response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }

    /// Returns `true` for a 409 response.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        self.code == 409
    }

    /// Returns `true` for a 429 response.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request continues to fail with a retryable status (429 or
/// 503) after all configured attempts have been made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// The `request-id` header value from the last response, if present.
    pub request_id: Option<String>,
}

/// Error returned when a pending request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A POST or PATCH request was composed without a body.
    #[error("Cannot use {method} without a request body.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path was empty.
    #[error("Cannot submit a request with an empty path.")]
    EmptyPath,
}

/// Unified error type for all transport-level failures.
///
/// Remote errors are wrapped, never swallowed: every failed submission
/// rejects with one of these variants.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A non-2xx response from the service.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxRetriesExceededError),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// Verify TransportError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_message_passthrough() {
        let error = ResponseError {
            code: 404,
            message: r#"{"code":"ErrorItemNotFound","message":"The item was not found."}"#
                .to_string(),
            request_id: None,
        };
        assert!(error.to_string().contains("ErrorItemNotFound"));
    }

    #[test]
    fn test_response_error_classification() {
        let make = |code| ResponseError {
            code,
            message: String::new(),
            request_id: None,
        };
        assert!(make(401).is_auth_failure());
        assert!(make(403).is_auth_failure());
        assert!(make(404).is_not_found());
        assert!(make(409).is_conflict());
        assert!(make(429).is_rate_limited());
        assert!(!make(500).is_not_found());
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxRetriesExceededError {
            code: 429,
            tries: 3,
            message: r#"{"code":"TooManyRequests"}"#.to_string(),
            request_id: Some("req-1".to_string()),
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidRequestError::MissingBody {
            method: "patch".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use patch without a request body.");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response: &dyn std::error::Error = &ResponseError {
            code: 400,
            message: "test".to_string(),
            request_id: None,
        };
        let _ = response;

        let invalid: &dyn std::error::Error = &InvalidRequestError::EmptyPath;
        let _ = invalid;
    }
}
