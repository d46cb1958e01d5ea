//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages before any request is made.

use std::fmt;

use crate::error::ConfigError;

/// A validated Microsoft Graph access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AccessToken(*****)` instead of the actual bearer token.
///
/// # Example
///
/// ```rust
/// use graph_todo::AccessToken;
///
/// let token = AccessToken::new("eyJ0eXAi...").unwrap();
/// assert_eq!(format!("{token:?}"), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated service base URL.
///
/// Accepts `http://` and `https://` URLs and normalizes away any trailing
/// slash so paths can always be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use graph_todo::BaseUrl;
///
/// let url = BaseUrl::new("https://graph.microsoft.com/v1.0/").unwrap();
/// assert_eq!(url.as_ref(), "https://graph.microsoft.com/v1.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The production Microsoft Graph v1.0 endpoint.
    pub const DEFAULT: &'static str = "https://graph.microsoft.com/v1.0";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not start with
    /// `http://` or `https://`, or is nothing but a scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));

        match rest {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Returns the default Graph v1.0 base URL.
    #[must_use]
    pub fn graph_v1() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::graph_v1()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty() {
        assert_eq!(AccessToken::new(""), Err(ConfigError::EmptyAccessToken));
    }

    #[test]
    fn test_access_token_masks_debug_output() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug = format!("{token:?}");
        assert_eq!(debug, "AccessToken(*****)");
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_access_token_as_ref_returns_value() {
        let token = AccessToken::new("abc123").unwrap();
        assert_eq!(token.as_ref(), "abc123");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://graph.microsoft.com/v1.0/").unwrap();
        assert_eq!(url.as_ref(), "https://graph.microsoft.com/v1.0");
    }

    #[test]
    fn test_base_url_accepts_http_for_local_testing() {
        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        let result = BaseUrl::new("graph.microsoft.com");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_url_rejects_bare_scheme() {
        let result = BaseUrl::new("https://");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_url_default_is_graph_v1() {
        assert_eq!(BaseUrl::default().as_ref(), BaseUrl::DEFAULT);
    }
}
