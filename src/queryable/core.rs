//! The queryable core shared by every resource node.
//!
//! A [`Queryable`] pairs exactly one [`RequestPath`] with a shared transport
//! handle. Navigation (`derive_child`, `select`, `with_query`) is synchronous
//! and performs no I/O; the only suspension point is [`Queryable::invoke`],
//! which resolves the path into a [`PendingRequest`] and submits it.
//!
//! Queryables are immutable value-like objects: cloning is cheap (the
//! transport is behind an `Arc`), deriving never mutates the source, and
//! concurrent invocations from sibling or identical queryables are
//! independently safe.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::{HttpMethod, Payload, PendingRequest, Transport, TransportError};
use crate::queryable::errors::InvalidPathError;
use crate::queryable::path::{RequestPath, SelectorStyle, StaticSegment};

/// A path-bearing handle that can produce exactly one request on demand.
#[derive(Clone, Debug)]
pub struct Queryable {
    path: RequestPath,
    transport: Arc<dyn Transport>,
}

// Verify Queryable is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Queryable>();
};

impl Queryable {
    /// Creates a root queryable with an empty path and the default
    /// selector style.
    #[must_use]
    pub fn root(transport: Arc<dyn Transport>) -> Self {
        Self {
            path: RequestPath::new(),
            transport,
        }
    }

    /// Creates a root queryable rendering id selectors in the given style.
    #[must_use]
    pub fn root_with_style(transport: Arc<dyn Transport>, style: SelectorStyle) -> Self {
        Self {
            path: RequestPath::with_style(style),
            transport,
        }
    }

    /// Returns the path this queryable addresses.
    #[must_use]
    pub const fn path(&self) -> &RequestPath {
        &self.path
    }

    /// Returns a clone of the transport handle.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Returns a new queryable with a literal segment appended.
    ///
    /// The child owns an independent copy of the path; the parent is
    /// never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPathError`] if the segment is empty or contains
    /// illegal characters.
    pub fn derive_child(&self, segment: &str) -> Result<Self, InvalidPathError> {
        Ok(Self {
            path: self.path.with_segment(segment)?,
            transport: Arc::clone(&self.transport),
        })
    }

    /// Returns a new queryable with a pre-validated segment appended.
    pub(crate) fn derive_static(&self, segment: StaticSegment) -> Self {
        Self {
            path: self.path.with_static_segment(segment),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Returns a new queryable with an id selector on the terminal segment.
    ///
    /// This is the navigation primitive collection nodes build their
    /// member access on.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPathError`] if the id is empty or the terminal
    /// segment already carries a selector.
    pub fn select(&self, id: &str) -> Result<Self, InvalidPathError> {
        Ok(Self {
            path: self.path.with_id(id)?,
            transport: Arc::clone(&self.transport),
        })
    }

    /// Returns a new queryable with a query decoration appended.
    #[must_use]
    pub fn with_query(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: self.path.with_query(key, value),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Resolves the path into a request and submits it.
    ///
    /// Each call re-derives a fresh [`PendingRequest`] from the same path;
    /// a queryable is safe to invoke any number of times.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for request validation failures and for
    /// anything the wire reports. Remote errors are propagated unchanged.
    pub async fn invoke(
        &self,
        method: HttpMethod,
        body: Option<serde_json::Value>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Payload, TransportError> {
        let request = PendingRequest::new(method, self.path.to_request_path(), body, extra_headers);
        request.verify()?;
        self.transport.submit(request).await
    }

    /// The natural read: GET on this queryable's own path.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for anything the wire reports.
    pub async fn get(&self) -> Result<Payload, TransportError> {
        self.invoke(HttpMethod::Get, None, None).await
    }
}
