//! Node identifiers for composed graphs.
//!
//! Every tree node is keyed by a [`NodeId`] handed out by an [`IdAllocator`].
//! The allocator is owned by a single render and threaded through the
//! traversal, so two renders never share counter state and two nodes with the
//! same title never share an id.

use std::fmt;

/// Identifier of a node within one composed graph.
///
/// Ids have the form `node_<n>` and contain only ASCII alphanumerics and
/// underscores, so they can be used verbatim as Graphviz node keys.
///
/// # Examples
///
/// ```
/// use thicket_core::identifier::NodeId;
///
/// let id = NodeId::from_index(3);
/// assert_eq!(id, "node_3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Creates the id for the `idx`-th allocated node.
    pub fn from_index(idx: usize) -> Self {
        Self(format!("node_{idx}"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Hands out unique [`NodeId`]s for a single render.
///
/// # Examples
///
/// ```
/// use thicket_core::identifier::IdAllocator;
///
/// let mut ids = IdAllocator::new();
/// let root = ids.allocate();
/// let child = ids.allocate();
/// assert_ne!(root, child);
/// assert_eq!(ids.allocated(), 2);
/// ```
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: usize,
}

impl IdAllocator {
    /// Creates an allocator starting at `node_0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused id.
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId::from_index(self.next);
        self.next += 1;
        id
    }

    /// Returns how many ids have been handed out so far.
    pub fn allocated(&self) -> usize {
        self.next
    }
}
