//! Dense node identifiers.

use std::fmt;

use contracts::{debug_requires, ensures};
use serde::Serialize;

/// Position of a node in its graph's node table.
///
/// Node tables are numbered `0..node_count` in load order, so an index is
/// only meaningful together with the [`Graph`](super::Graph) it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIdx(u32);

impl NodeIdx {
    /// Largest node count an index can address.
    pub const MAX_NODES: usize = u32::MAX as usize;

    /// Wraps a raw table position.
    #[ensures(ret.0 == raw)]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Table position, for slice access.
    #[ensures(ret == self.0 as usize)]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeIdx {
    #[debug_requires(index <= Self::MAX_NODES, "node index exceeds the u32 range")]
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl From<NodeIdx> for usize {
    fn from(node: NodeIdx) -> Self {
        node.as_usize()
    }
}
