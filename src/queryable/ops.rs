//! Resource node contracts and attachable operations.
//!
//! Every resource type is a thin wrapper over a [`Queryable`], classified as
//! either an instance ([`InstanceNode`]) or a collection
//! ([`CollectionNode`]), and extended with independently attachable
//! operations: [`GetById`], [`Addable`], [`Updateable`], [`Deletable`], and
//! [`DeltaEnabled`]. Each operation trait contributes one method and the
//! request shape it emits; attaching is a one-line `impl` per resource type,
//! so the set of operations a node exposes is fixed at compile time and
//! matches its declared [`CapabilitySet`](crate::queryable::CapabilitySet)
//! exactly.
//!
//! Operations validate their input and the node's address shape before any
//! network call, so bad calls fail fast without a wasted round trip.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Clone, Debug)]
//! pub struct Tasks {
//!     queryable: Queryable,
//! }
//!
//! impl ResourceNode for Tasks { /* name, default path, capability set */ }
//! impl CollectionNode for Tasks {}
//! impl GetById for Tasks { type Item = Task; }
//! impl Addable for Tasks {
//!     type Payload = TodoTask;
//!     const REQUIRED_FIELDS: &'static [&'static str] = &["title"];
//! }
//! impl DeltaEnabled for Tasks {}
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{HttpMethod, Payload};
use crate::queryable::body::{ensure_required_fields, request_body};
use crate::queryable::core::Queryable;
use crate::queryable::delta::DeltaPage;
use crate::queryable::errors::{ClientError, InvalidArgumentError, PreconditionError};
use crate::queryable::path::StaticSegment;
use crate::queryable::CapabilitySet;

const DELTA_SEGMENT: StaticSegment = StaticSegment::new("delta");

/// The contract every resource node implements, independent of which
/// operations are attached.
#[allow(async_fn_in_trait)]
pub trait ResourceNode: Sized {
    /// The payload shape this node's reads produce.
    type Model: DeserializeOwned + Send;

    /// The resource type name, used in error messages.
    const NAME: &'static str;

    /// The fixed segment this type appends when attached beneath a parent.
    ///
    /// Collection types declare one; item types declare none and inherit
    /// the address they were selected at.
    const DEFAULT_PATH: Option<StaticSegment>;

    /// The operations this type exposes, as a declarative value.
    const CAPABILITIES: CapabilitySet;

    /// Wraps a queryable into a node of this type.
    fn from_queryable(queryable: Queryable) -> Self;

    /// Returns the queryable this node is built on.
    fn queryable(&self) -> &Queryable;

    /// Submits an arbitrary request against this node's own path.
    ///
    /// The attached operations cover the conventional shapes; this is the
    /// escape hatch for anything else the service exposes at this address.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] for anything the wire reports.
    async fn invoke(
        &self,
        method: HttpMethod,
        body: Option<serde_json::Value>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Payload, ClientError> {
        Ok(self.queryable().invoke(method, body, extra_headers).await?)
    }
}

/// A node addressing a single item.
#[allow(async_fn_in_trait)]
pub trait InstanceNode: ResourceNode {
    /// Reads the item this node addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] for wire failures or a body that
    /// does not decode into the model.
    async fn get(&self) -> Result<Self::Model, ClientError> {
        let payload = self.queryable().get().await?;
        Ok(serde_json::from_value(payload.body)?)
    }
}

/// A node addressing a collection.
#[allow(async_fn_in_trait)]
pub trait CollectionNode: ResourceNode {
    /// Reads the collection's current page of members.
    ///
    /// The service wraps collection results in a `value` array; this
    /// unwraps it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] for wire failures or a body that
    /// does not decode into the model.
    async fn items(&self) -> Result<Vec<Self::Model>, ClientError> {
        let payload = self.queryable().get().await?;
        match payload.body.get("value") {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(serde_json::from_value(payload.body)?),
        }
    }
}

/// Navigate to a collection member by id.
///
/// Pure navigation: no request is issued until the returned node is
/// invoked. The concrete child type is declared at composition time, so the
/// capability graph is statically known.
pub trait GetById: CollectionNode {
    /// The item type a selection produces.
    type Item: ResourceNode;

    /// Returns the member node for the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty id, before any
    /// network call.
    fn get_by_id(&self, id: &str) -> Result<Self::Item, ClientError> {
        if id.trim().is_empty() {
            return Err(InvalidArgumentError {
                operation: "get_by_id",
                reason: "id must not be empty".to_string(),
            }
            .into());
        }

        Ok(Self::Item::from_queryable(self.queryable().select(id)?))
    }
}

/// Create a child in a collection.
#[allow(async_fn_in_trait)]
pub trait Addable: CollectionNode {
    /// The payload shape accepted by create operations.
    type Payload: Serialize + Sync;

    /// Wire names of fields the payload must carry.
    const REQUIRED_FIELDS: &'static [&'static str] = &[];

    /// POSTs the payload to the collection's own path and returns the
    /// created member.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any network call if the
    /// payload misses a declared required field, and
    /// [`ClientError::Transport`] for anything the wire reports.
    async fn add(&self, payload: &Self::Payload) -> Result<Self::Model, ClientError> {
        let body = request_body(Self::NAME, payload)?;
        ensure_required_fields(Self::NAME, &body, Self::REQUIRED_FIELDS)?;

        let response = self
            .queryable()
            .invoke(HttpMethod::Post, Some(body), None)
            .await?;
        Ok(serde_json::from_value(response.body)?)
    }
}

/// Partially update the addressed item.
#[allow(async_fn_in_trait)]
pub trait Updateable: InstanceNode
where
    Self::Model: Serialize + Sync,
{
    /// PATCHes the changed fields to the item's own path and returns the
    /// updated item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Precondition`] before any network call if this
    /// node has no id selector, and [`ClientError::Transport`] for anything
    /// the wire reports.
    async fn update(&self, changes: &Self::Model) -> Result<Self::Model, ClientError> {
        ensure_selected(self.queryable(), "update")?;

        let body = request_body(Self::NAME, changes)?;
        let response = self
            .queryable()
            .invoke(HttpMethod::Patch, Some(body), None)
            .await?;
        Ok(serde_json::from_value(response.body)?)
    }
}

/// Delete the addressed item.
#[allow(async_fn_in_trait)]
pub trait Deletable: InstanceNode {
    /// Issues DELETE against the item's own path, with no body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Precondition`] before any network call if this
    /// node has no id selector, and [`ClientError::Transport`] for anything
    /// the wire reports.
    async fn delete(&self) -> Result<(), ClientError> {
        ensure_selected(self.queryable(), "delete")?;

        self.queryable()
            .invoke(HttpMethod::Delete, None, None)
            .await?;
        Ok(())
    }
}

/// Incremental synchronization over a collection.
#[allow(async_fn_in_trait)]
pub trait DeltaEnabled: CollectionNode {
    /// GETs `<collection>/delta`, threading the continuation token from a
    /// prior page as a query parameter.
    ///
    /// Token ordering across calls is the caller's concern; an expired or
    /// out-of-sequence token is a service-detected condition surfaced as a
    /// transport error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty token, before
    /// any network call, and [`ClientError::Transport`] for anything the
    /// wire reports.
    async fn delta(&self, token: Option<&str>) -> Result<DeltaPage<Self::Model>, ClientError> {
        let mut queryable = self.queryable().derive_static(DELTA_SEGMENT);

        if let Some(token) = token {
            if token.is_empty() {
                return Err(InvalidArgumentError {
                    operation: "delta",
                    reason: "token must not be empty".to_string(),
                }
                .into());
            }
            queryable = queryable.with_query("token", token);
        }

        let payload = queryable.get().await?;
        DeltaPage::from_payload(&payload)
    }
}

/// Fails with [`PreconditionError`] unless the queryable addresses a
/// selected item.
pub(crate) fn ensure_selected(
    queryable: &Queryable,
    operation: &'static str,
) -> Result<(), PreconditionError> {
    if queryable.path().has_selector() {
        Ok(())
    } else {
        Err(PreconditionError {
            operation,
            path: queryable.path().to_request_path(),
        })
    }
}
