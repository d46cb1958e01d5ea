//! The transient request artifact handed to the transport.
//!
//! A [`PendingRequest`] is produced at invocation time from a resolved
//! request path, consumed exactly once by the transport, and never
//! persisted. Each invocation re-derives a fresh one.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidRequestError;

/// HTTP methods used against the Graph API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET for reading resources.
    Get,
    /// HTTP POST for creating resources.
    Post,
    /// HTTP PATCH for partial updates.
    Patch,
    /// HTTP DELETE for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A single request ready for submission.
///
/// Bodies are always JSON; the transport sets `Content-Type` accordingly
/// when a body is present.
#[derive(Clone, Debug)]
pub struct PendingRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path relative to the transport's base URL, query string included.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl PendingRequest {
    /// Creates a new pending request.
    #[must_use]
    pub const fn new(
        method: HttpMethod,
        path: String,
        body: Option<serde_json::Value>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            method,
            path,
            body,
            extra_headers,
        }
    }

    /// Validates the request before submission.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::EmptyPath`] if the path is empty, or
    /// [`InvalidRequestError::MissingBody`] if a POST or PATCH request
    /// carries no body.
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.path.is_empty() {
            return Err(InvalidRequestError::EmptyPath);
        }

        if matches!(self.method, HttpMethod::Post | HttpMethod::Patch) && self.body.is_none() {
            return Err(InvalidRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }

        Ok(())
    }
}

// Verify request types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpMethod>();
    assert_send_sync::<PendingRequest>();
};
