//! Node pairs and conserved edges.

use serde::Serialize;

use crate::NodeIdx;

/// A candidate or committed mapping between a node of each graph.
///
/// `score` is the similarity at the pair's coordinate. It is only used for
/// ordering and quality measures and need not be unique.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pair {
    /// Node of the first graph.
    pub node1: NodeIdx,
    /// Node of the second graph.
    pub node2: NodeIdx,
    /// Similarity of the two nodes.
    pub score: f64,
}

impl Pair {
    /// Creates a pair.
    #[must_use]
    pub const fn new(node1: NodeIdx, node2: NodeIdx, score: f64) -> Self {
        Self {
            node1,
            node2,
            score,
        }
    }
}

/// Two committed pairs whose nodes are adjacent in both graphs.
///
/// `first.0`-`second.0` is the edge in the first graph and
/// `first.1`-`second.1` its image in the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PairEdge {
    /// Pair `(node1, node2)` on the lower first-graph endpoint of the edge.
    pub first: (NodeIdx, NodeIdx),
    /// Pair `(node1, node2)` on the higher first-graph endpoint.
    pub second: (NodeIdx, NodeIdx),
}
