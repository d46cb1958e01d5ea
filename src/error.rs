//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation at setup time, before any request is attempted.

use thiserror::Error;

/// Errors raised while building or validating a [`GraphConfig`](crate::GraphConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The access token was empty.
    #[error("Access token must not be empty")]
    EmptyAccessToken,

    /// The base URL was missing a scheme or otherwise malformed.
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected URL value.
        url: String,
    },

    /// A required configuration field was not provided to the builder.
    #[error("Missing required configuration field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
}
