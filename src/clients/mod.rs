//! Transport types for Graph API communication.
//!
//! This module holds the narrow contract the queryable core depends on and
//! the bundled implementation of it:
//!
//! - [`Transport`]: the one interface the core consumes — submit a request,
//!   receive a parsed payload
//! - [`PendingRequest`] / [`HttpMethod`]: the transient artifact produced at
//!   invocation time
//! - [`Payload`]: the parsed response handed back to the capability layer
//! - [`GraphClient`]: the `reqwest`-backed transport with bearer
//!   authentication and bounded throttling retries
//! - [`TransportError`]: unified error type for everything the wire reports
//!
//! # Retry Behavior
//!
//! [`GraphClient`] retries 429 and 503 responses using the `Retry-After`
//! header value, or 1 second if not present. The default `tries` of 1 means
//! no automatic retries; configure via
//! [`GraphConfigBuilder::tries`](crate::config::GraphConfigBuilder::tries).

mod errors;
mod http_client;
mod payload;
mod request;
mod transport;

pub use errors::{InvalidRequestError, MaxRetriesExceededError, ResponseError, TransportError};
pub use http_client::{GraphClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use payload::Payload;
pub use request::{HttpMethod, PendingRequest};
pub use transport::{SubmitFuture, Transport};
