//! Resource catalog for the To Do service.
//!
//! - [`todo`]: the node types forming the resource tree (`Todo`,
//!   `TaskLists`, `Tasks`, and so on)
//! - [`models`]: the typed payload shapes those nodes read and write
//!
//! Node types and their payload models deliberately live in separate
//! modules: a node is an address with capabilities, a model is data on the
//! wire, and some share a name (`ChecklistItem`, `LinkedResource`).

pub mod models;
pub mod todo;
