//! # Graph To Do Rust client
//!
//! A Rust client model for the Microsoft Graph To Do API: immutable
//! resource addresses, a queryable core that turns a node into exactly one
//! HTTP request on demand, and per-resource capability traits composed at
//! the type level.
//!
//! ## Overview
//!
//! This crate provides:
//! - Immutable request paths via [`queryable::RequestPath`]
//! - The [`queryable::Queryable`] core every resource node is built from
//! - Attachable operations ([`queryable::GetById`], [`queryable::Addable`],
//!   [`queryable::Updateable`], [`queryable::Deletable`],
//!   [`queryable::DeltaEnabled`]) composed per resource type
//! - The To Do resource tree in [`resources::todo`] with typed payloads in
//!   [`resources::models`]
//! - A `reqwest`-backed transport, [`GraphClient`], with bearer
//!   authentication and bounded throttling retries
//! - Type-safe configuration via [`GraphConfig`] with validated newtypes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graph_todo::queryable::prelude::*;
//! use graph_todo::resources::models::TodoTask;
//! use graph_todo::resources::todo::Todo;
//! use graph_todo::{AccessToken, GraphClient, GraphConfig};
//!
//! let config = GraphConfig::builder()
//!     .access_token(AccessToken::new("eyJ0eXAi...")?)
//!     .tries(3)
//!     .build()?;
//!
//! let todo = Todo::new(Arc::new(GraphClient::new(&config)));
//!
//! // Navigation is pure: no request until an operation is awaited.
//! let tasks = todo.lists().get_by_id("AAMkAD")?.tasks();
//!
//! // List, create, synchronize.
//! let current = tasks.items().await?;
//! let created = tasks.add(&TodoTask {
//!     title: Some("Buy milk".to_string()),
//!     ..TodoTask::default()
//! }).await?;
//! let changes = tasks.delta(None).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **Nodes are values**: navigation clones, never mutates; every node is
//!   safe to reuse and to share across tasks
//! - **Fail fast**: malformed paths, empty ids, missing required fields,
//!   and shape mismatches are rejected before any network call
//! - **One narrow transport contract**: the core consumes
//!   [`Transport::submit`] and nothing else; retry policy for remote
//!   errors stays with the caller
//! - **No global state**: configuration is instance-based and passed
//!   explicitly

pub mod clients;
pub mod config;
pub mod error;
pub mod queryable;
pub mod resources;

// Re-export public types at crate root for convenience
pub use clients::{
    GraphClient, HttpMethod, InvalidRequestError, MaxRetriesExceededError, Payload,
    PendingRequest, ResponseError, SubmitFuture, Transport, TransportError,
};
pub use config::{AccessToken, BaseUrl, GraphConfig, GraphConfigBuilder};
pub use error::ConfigError;
pub use queryable::{
    Capability, CapabilitySet, ClientError, DeltaContinuation, DeltaPage, InvalidArgumentError,
    InvalidPathError, PreconditionError, Queryable, RequestPath, SelectorStyle, ValidationError,
};
