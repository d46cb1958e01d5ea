//! The transport contract consumed by the queryable core.
//!
//! The core depends on exactly one narrow interface: submit a
//! [`PendingRequest`], receive a [`Payload`] or a [`TransportError`].
//! Retry, backoff, and cancellation live behind this boundary. The bundled
//! implementation is [`GraphClient`](crate::GraphClient); tests supply
//! in-memory implementations to observe request shapes without a network.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::clients::errors::TransportError;
use crate::clients::payload::Payload;
use crate::clients::request::PendingRequest;

/// The future returned by [`Transport::submit`].
pub type SubmitFuture<'a> = Pin<Box<dyn Future<Output = Result<Payload, TransportError>> + Send + 'a>>;

/// An asynchronous request submitter.
///
/// Implementations must be shareable across tasks; resource nodes hold the
/// transport behind an `Arc` and never serialize access to it.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Submits a single request and resolves with the parsed response.
    ///
    /// Implementations report every failure; a failed submission must
    /// reject rather than return a sentinel payload.
    fn submit(&self, request: PendingRequest) -> SubmitFuture<'_>;
}
