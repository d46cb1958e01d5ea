//! Declared capability sets for resource nodes.
//!
//! Operations are attached to node types as traits, so the compiler already
//! gates what each node can do. The [`CapabilitySet`] constant on every node
//! type records the same information as a value: it distinguishes
//! structurally similar nodes (a collection and an item share no overlap by
//! design), and it lets tests assert that attachment order never matters.

use std::fmt;

/// One attachable behavior unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Capability {
    /// Navigate to a collection member by id.
    GetById = 1 << 0,
    /// Create a child in a collection.
    Add = 1 << 1,
    /// Partially update the addressed item.
    Update = 1 << 2,
    /// Delete the addressed item.
    Delete = 1 << 3,
    /// Incremental synchronization over a collection.
    Delta = 1 << 4,
}

impl Capability {
    const ALL: [Self; 5] = [
        Self::GetById,
        Self::Add,
        Self::Update,
        Self::Delete,
        Self::Delta,
    ];

    /// Returns the capability name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetById => "get_by_id",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Delta => "delta",
        }
    }
}

/// A set of capabilities, attached in any order.
///
/// Attachment commutes: `EMPTY.with(a).with(b)` equals `EMPTY.with(b).with(a)`
/// for every pair of capabilities.
///
/// # Example
///
/// ```rust
/// use graph_todo::queryable::{Capability, CapabilitySet};
///
/// const COLLECTION: CapabilitySet = CapabilitySet::EMPTY
///     .with(Capability::GetById)
///     .with(Capability::Add)
///     .with(Capability::Delta);
///
/// assert!(COLLECTION.contains(Capability::Add));
/// assert!(!COLLECTION.contains(Capability::Delete));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// The set with no capabilities attached.
    pub const EMPTY: Self = Self(0);

    /// Returns the set with the given capability attached.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability as u8)
    }

    /// Returns `true` if the capability is attached.
    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability as u8 != 0
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the number of attached capabilities.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if no capability is attached.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for capability in Capability::ALL {
            if self.contains(capability) {
                set.entry(&capability.as_str());
            }
        }
        set.finish()
    }
}
