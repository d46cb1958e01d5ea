//! Node construction and parent/child wiring.
//!
//! These constructors are what sub-resource accessors call: given a parent,
//! produce a fresh child node of a declared type, with the child's default
//! path segment already applied. Every call derives an independent path, so
//! sibling nodes never share state, and repeated calls on the same parent
//! yield structurally equal but independently owned nodes.

use crate::queryable::core::Queryable;
use crate::queryable::ops::ResourceNode;

/// Builds a node of type `Node` on top of an existing queryable, applying
/// the type's default path segment when it declares one.
#[must_use]
pub fn bind<Node: ResourceNode>(base: &Queryable) -> Node {
    let queryable =
        Node::DEFAULT_PATH.map_or_else(|| base.clone(), |segment| base.derive_static(segment));
    Node::from_queryable(queryable)
}

/// Builds a child node beneath a parent node.
///
/// This is the accessor convention: a pure function of the parent, wiring
/// the child to the parent's address.
#[must_use]
pub fn attach<Child: ResourceNode>(parent: &impl ResourceNode) -> Child {
    bind(parent.queryable())
}
