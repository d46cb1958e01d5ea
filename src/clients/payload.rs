//! The parsed response artifact returned by the transport.
//!
//! A [`Payload`] is the opaque result of one submission: status code,
//! lower-cased response headers, and the body parsed as JSON. The capability
//! layer (or the caller) interprets it further.

use std::collections::HashMap;

/// A parsed response from the service.
#[derive(Debug, Clone)]
pub struct Payload {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keys lower-cased, preserving repeated values.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body parsed as JSON. Empty bodies parse to `{}`.
    pub body: serde_json::Value,
    /// Parsed `Retry-After` header value in seconds, if present.
    pub retry_after: Option<f64>,
}

impl Payload {
    /// Creates a new payload, parsing well-known headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_after,
        }
    }

    /// Returns `true` if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of the given header, if present.
    ///
    /// Header names are matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the service request id for support correlation.
    ///
    /// Graph reports this as the `request-id` header; the client echo
    /// `client-request-id` is used as a fallback.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("request-id")
            .or_else(|| self.header("client-request-id"))
    }
}

// Verify Payload is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Payload>();
};
