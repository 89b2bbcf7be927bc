//! Identifiers for canvas nodes and edges.
//!
//! Ids are plain integers that render as decimal strings (`"3"`, `"4"`, ...).
//! They are handed out by an [`IdAllocator`] owned by each canvas session, so
//! two controllers never share a counter and tests are deterministic.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a node on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub i32);

/// Identifier of an edge on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub i32);

impl NodeId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl EdgeId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NodeId)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        NodeId(id)
    }
}

impl From<i32> for EdgeId {
    fn from(id: i32) -> Self {
        EdgeId(id)
    }
}

/// Monotonic id source.
///
/// Every call to [`next_id`](Self::next_id) returns a value strictly greater
/// than all previous ones. Ids are never reused, even if the item they were
/// given to is later removed. Once `i32::MAX` has been handed out the
/// allocator is exhausted and yields `None`.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: Option<i32>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Allocator whose first id is `1`.
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Allocator whose first id is `seed + 1`.
    ///
    /// Use this to continue after pre-seeded items, e.g. `starting_after(2)`
    /// when ids `1` and `2` are already taken. A seed of `i32::MAX` gives an
    /// exhausted allocator.
    pub fn starting_after(seed: i32) -> Self {
        Self {
            next: seed.max(0).checked_add(1),
        }
    }

    /// Allocator continuing after the highest id in `existing` (or at `1`).
    pub fn after_existing<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self::starting_after(existing.into_iter().max().unwrap_or(0))
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> Option<i32> {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    pub fn next_id(&mut self) -> Option<i32> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    pub fn next_node_id(&mut self) -> Option<NodeId> {
        self.next_id().map(NodeId)
    }

    pub fn next_edge_id(&mut self) -> Option<EdgeId> {
        self.next_id().map(EdgeId)
    }
}
