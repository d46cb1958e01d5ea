//! HTTP transport implementation for the Microsoft Graph API.
//!
//! This module provides [`GraphClient`], the bundled [`Transport`]
//! implementation backed by `reqwest`, with bearer authentication and
//! bounded retry handling for throttled responses.

use std::collections::HashMap;

use crate::clients::errors::{MaxRetriesExceededError, ResponseError, TransportError};
use crate::clients::payload::Payload;
use crate::clients::request::{HttpMethod, PendingRequest};
use crate::clients::transport::{SubmitFuture, Transport};
use crate::config::GraphConfig;

/// Fixed retry wait time in seconds when no `Retry-After` header is present.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the Microsoft Graph API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including `Authorization` and `User-Agent`
/// - Automatic retry for 429 and 503 responses, honoring `Retry-After`
/// - Response header capture and JSON body parsing
///
/// # Thread Safety
///
/// `GraphClient` is `Send + Sync`; wrap it in an `Arc` and share it across
/// every resource node derived from the same root.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use graph_todo::{AccessToken, GraphClient, GraphConfig};
/// use graph_todo::resources::todo::Todo;
///
/// let config = GraphConfig::builder()
///     .access_token(AccessToken::new("eyJ0eXAi...")?)
///     .build()?;
///
/// let todo = Todo::new(Arc::new(GraphClient::new(&config)));
/// let lists = todo.lists().items().await?;
/// ```
#[derive(Debug)]
pub struct GraphClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://graph.microsoft.com/v1.0`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Number of times each request is attempted.
    tries: u32,
}

// Verify GraphClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphClient>();
};

impl GraphClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &GraphConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Graph Todo Library v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().as_ref().to_string(),
            default_headers,
            tries: config.tries(),
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request, retrying throttled responses up to the configured
    /// number of tries.
    async fn execute(&self, request: PendingRequest) -> Result<Payload, TransportError> {
        request.verify()?;

        let url = format!("{}/{}", self.base_url, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                builder = builder.header(key, value);
            }

            if let Some(body) = &request.body {
                builder = builder.body(body.to_string());
            }

            tracing::debug!(method = %request.method, path = %request.path, "submitting request");
            let response = builder.send().await?;

            let code = response.status().as_u16();
            let response_headers = Self::parse_response_headers(response.headers());
            let body_text = response.text().await.unwrap_or_default();

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let payload = Payload::new(code, response_headers, body);

            if payload.is_ok() {
                return Ok(payload);
            }

            let message = Self::serialize_error(&payload);

            let should_retry = code == 429 || code == 503;
            if !should_retry {
                return Err(TransportError::Response(ResponseError {
                    code,
                    message,
                    request_id: payload.request_id().map(String::from),
                }));
            }

            if tries >= self.tries {
                if self.tries == 1 {
                    return Err(TransportError::Response(ResponseError {
                        code,
                        message,
                        request_id: payload.request_id().map(String::from),
                    }));
                }
                tracing::warn!(code, tries, path = %request.path, "retry budget exhausted");
                return Err(TransportError::MaxRetries(MaxRetriesExceededError {
                    code,
                    tries: self.tries,
                    message,
                    request_id: payload.request_id().map(String::from),
                }));
            }

            let delay = Self::retry_delay(&payload);
            tracing::warn!(code, ?delay, path = %request.path, "throttled, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a lower-cased `HashMap`.
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay, honoring `Retry-After` when present.
    fn retry_delay(payload: &Payload) -> std::time::Duration {
        payload.retry_after.map_or_else(
            || std::time::Duration::from_secs(RETRY_WAIT_TIME),
            std::time::Duration::from_secs_f64,
        )
    }

    /// Serializes the Graph error body into a compact JSON message.
    ///
    /// Graph error responses have the shape
    /// `{"error": {"code": "...", "message": "...", "innerError": {...}}}`.
    fn serialize_error(payload: &Payload) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(error) = payload.body.get("error") {
            if let Some(code) = error.get("code") {
                error_body.insert("code".to_string(), code.clone());
            }
            if let Some(message) = error.get("message") {
                error_body.insert("message".to_string(), message.clone());
            }
        } else if let Some(raw) = payload.body.get("raw_body") {
            error_body.insert("raw_body".to_string(), raw.clone());
        }

        if let Some(request_id) = payload.request_id() {
            error_body.insert(
                "request_id".to_string(),
                serde_json::json!(request_id),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Transport for GraphClient {
    fn submit(&self, request: PendingRequest) -> SubmitFuture<'_> {
        Box::pin(self.execute(request))
    }
}
