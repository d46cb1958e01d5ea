//! Error types for resource navigation and capability operations.
//!
//! The taxonomy separates local failures — detected synchronously before any
//! network call — from remote ones:
//!
//! - [`InvalidPathError`]: malformed or doubly-selected path (construction time)
//! - [`InvalidArgumentError`]: bad input to a capability operation (pre-invocation)
//! - [`PreconditionError`]: operation invoked on a node whose shape doesn't
//!   support it (pre-invocation)
//! - [`ValidationError`]: payload fails required-field checks (pre-submission)
//! - [`TransportError`](crate::TransportError): anything the wire reports,
//!   propagated unchanged (post-invocation)
//!
//! [`ClientError`] unifies all of them for operation signatures.

use thiserror::Error;

use crate::clients::TransportError;

/// Error raised when a request path would be malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidPathError {
    /// A path segment was empty.
    #[error("a path segment must not be empty")]
    EmptySegment,

    /// A path segment contained characters illegal in a request path.
    #[error("path segment '{segment}' contains characters illegal in a request path")]
    IllegalSegment {
        /// The rejected segment.
        segment: String,
    },

    /// An id selector was empty.
    #[error("an id selector must not be empty")]
    EmptyId,

    /// An id selector was applied to a path with no segments.
    #[error("cannot select an id on an empty path")]
    SelectionOnEmptyPath,

    /// An id selector was applied to a segment that already carries one.
    #[error("segment '{segment}' already carries id '{existing}'")]
    AlreadySelected {
        /// The terminal segment name.
        segment: String,
        /// The id already attached to it.
        existing: String,
    },
}

/// Error raised when a capability operation receives unusable input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid argument for {operation}: {reason}")]
pub struct InvalidArgumentError {
    /// The operation that rejected the input.
    pub operation: &'static str,
    /// Why the input was rejected.
    pub reason: String,
}

/// Error raised when an operation is invoked on a node whose address shape
/// does not support it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{operation} requires a node addressing a single item, but '{path}' has no id selector")]
pub struct PreconditionError {
    /// The operation that was attempted.
    pub operation: &'static str,
    /// The rendered path of the offending node.
    pub path: String,
}

/// Error raised when a payload fails required-field checks before submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload is missing one or more declared required fields.
    #[error("payload for {resource} is missing required fields: {missing:?}")]
    MissingRequiredFields {
        /// The resource type the payload was meant for.
        resource: &'static str,
        /// The wire names of the missing fields.
        missing: Vec<String>,
    },

    /// The payload did not serialize to a JSON object.
    #[error("payload for {resource} must serialize to a JSON object")]
    NotAnObject {
        /// The resource type the payload was meant for.
        resource: &'static str,
    },

    /// The payload could not be serialized at all.
    #[error("failed to serialize payload for {resource}: {message}")]
    Serialize {
        /// The resource type the payload was meant for.
        resource: &'static str,
        /// The serializer's message.
        message: String,
    },
}

/// Unified error type for resource operations.
///
/// Local variants are raised synchronously before any network call; the
/// `Transport` variant wraps whatever the wire reported, unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A path could not be constructed.
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    /// An operation received unusable input.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// An operation was invoked on a node that cannot support it.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// A payload failed validation before submission.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A transport-level failure, remote errors included.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Transport(TransportError::Decode(error))
    }
}

// Verify ClientError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientError>();
};
