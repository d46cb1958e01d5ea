//! The capability composition and lazy request-building engine.
//!
//! This module is the foundation every resource type is built from:
//!
//! - **[`RequestPath`]**: immutable, hierarchical resource addresses
//! - **[`Queryable`]**: the core pairing one path with a transport handle,
//!   able to derive children and produce exactly one request on demand
//! - **Operation traits** ([`GetById`], [`Addable`], [`Updateable`],
//!   [`Deletable`], [`DeltaEnabled`]): independently attachable behaviors,
//!   each contributing one operation and its request shape
//! - **[`CapabilitySet`]**: the declarative record of what a node type
//!   exposes
//! - **[`factory`]**: constructors wiring child nodes beneath parents
//! - **[`ClientError`]** and friends: the local-versus-remote error taxonomy
//!
//! Nodes are immutable value-like objects. Navigation is synchronous and
//! performs no I/O; invocation is the only suspension point. Concurrent use
//! of sibling or identical nodes from multiple tasks is independently safe.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graph_todo::queryable::{Addable, DeltaEnabled, GetById, Updateable};
//! use graph_todo::resources::todo::Todo;
//!
//! let todo = Todo::new(transport);
//!
//! // Navigate: no requests yet.
//! let lists = todo.lists();
//! let tasks = lists.get_by_id("AAMkAD")?.tasks();
//!
//! // Invoke: one request each.
//! let page = tasks.delta(None).await?;
//! let created = tasks.add(&new_task).await?;
//! ```

mod body;
mod capability;
mod core;
mod delta;
mod errors;
pub mod factory;
mod ops;
mod path;

pub use body::{ensure_required_fields, request_body};
pub use capability::{Capability, CapabilitySet};
pub use self::core::Queryable;
pub use delta::{DeltaContinuation, DeltaPage};
pub use errors::{
    ClientError, InvalidArgumentError, InvalidPathError, PreconditionError, ValidationError,
};
pub use ops::{
    Addable, CollectionNode, Deletable, DeltaEnabled, GetById, InstanceNode, ResourceNode,
    Updateable,
};
pub use path::{RequestPath, SelectorStyle, StaticSegment};

pub mod prelude {
    //! Glob-importable operation traits.
    //!
    //! Bringing the traits into scope is all a caller needs to use the
    //! operations a resource type carries.
    pub use super::{
        Addable, CollectionNode, Deletable, DeltaEnabled, GetById, InstanceNode, ResourceNode,
        Updateable,
    };
}

pub use factory::{attach, bind};
