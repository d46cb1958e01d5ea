//! Configuration types for the Graph To Do client.
//!
//! This module provides the configuration used to construct the HTTP
//! transport: the access token, the service base URL, an optional
//! `User-Agent` prefix, and the retry budget.
//!
//! # Example
//!
//! ```rust
//! use graph_todo::{AccessToken, GraphConfig};
//!
//! let config = GraphConfig::builder()
//!     .access_token(AccessToken::new("eyJ0eXAi...").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tries(), 3);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl};

use crate::error::ConfigError;

/// Configuration for the Graph To Do client.
///
/// Holds everything the transport needs to address and authenticate
/// requests. Construction goes through [`GraphConfig::builder`]; all values
/// are validated before a config can exist.
///
/// # Thread Safety
///
/// `GraphConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct GraphConfig {
    access_token: AccessToken,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    tries: u32,
}

// Verify GraphConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphConfig>();
};

impl GraphConfig {
    /// Creates a new builder for constructing a `GraphConfig`.
    #[must_use]
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the `User-Agent` prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the number of times each request is attempted.
    ///
    /// The default of 1 means no automatic retries.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

/// Builder for [`GraphConfig`].
#[derive(Debug, Default)]
pub struct GraphConfigBuilder {
    access_token: Option<AccessToken>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl GraphConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the service base URL.
    ///
    /// Defaults to the production Graph v1.0 endpoint.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of times each request is attempted.
    ///
    /// Values above 1 enable automatic retries for throttled (429) and
    /// unavailable (503) responses. A value of 0 is treated as 1.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if no access token was provided.
    pub fn build(self) -> Result<GraphConfig, ConfigError> {
        let access_token = self.access_token.ok_or(ConfigError::MissingField {
            field: "access_token",
        })?;

        Ok(GraphConfig {
            access_token,
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::new("test-token").unwrap()
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = GraphConfig::builder().build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingField {
                field: "access_token"
            }
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = GraphConfig::builder().access_token(token()).build().unwrap();

        assert_eq!(config.base_url().as_ref(), BaseUrl::DEFAULT);
        assert_eq!(config.tries(), 1);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = GraphConfig::builder()
            .access_token(token())
            .base_url(BaseUrl::new("http://localhost:9000").unwrap())
            .user_agent_prefix("MyApp/2.0")
            .tries(4)
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:9000");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/2.0"));
        assert_eq!(config.tries(), 4);
    }

    #[test]
    fn test_zero_tries_is_clamped_to_one() {
        let config = GraphConfig::builder()
            .access_token(token())
            .tries(0)
            .build()
            .unwrap();
        assert_eq!(config.tries(), 1);
    }
}
