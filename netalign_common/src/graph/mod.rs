//! Read-only view of one organism's interaction network.
//!
//! A [`Graph`] is built once from an edge list and never mutated afterwards.
//! It exposes neighbor lookup, degrees, the canonical edge list and
//! connected-component labels.

mod components;
mod node_idx;

pub use components::Components;
pub use node_idx::NodeIdx;

use std::collections::HashSet;

use itertools::Itertools;
use tracing::debug;

use crate::{AlignError, AlignResult};

/// Undirected, unweighted graph over nodes `0..node_count`.
#[derive(Clone, Debug)]
pub struct Graph {
    node_count: usize,
    /// Sorted neighbor list per node.
    neighbors: Vec<Vec<NodeIdx>>,
    /// Canonical `(min, max)` edges, sorted and unique.
    edges: Vec<(NodeIdx, NodeIdx)>,
    edge_set: HashSet<(NodeIdx, NodeIdx)>,
    components: Components,
}

impl Graph {
    /// Builds a graph from an undirected edge list.
    ///
    /// Duplicate edges (in either orientation) collapse to one and self-loops
    /// are dropped.
    ///
    /// # Errors
    /// Returns [`AlignError::NodeOutOfRange`] if an endpoint is not below
    /// `node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> AlignResult<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut canonical = Vec::new();
        for (a, b) in edges {
            for node in [a, b] {
                if node >= node_count {
                    return Err(AlignError::NodeOutOfRange { node, node_count });
                }
            }
            if a == b {
                continue;
            }
            canonical.push((NodeIdx::from(a.min(b)), NodeIdx::from(a.max(b))));
        }
        let edges: Vec<_> = canonical.into_iter().sorted_unstable().dedup().collect();

        let mut neighbors = vec![Vec::new(); node_count];
        for &(a, b) in &edges {
            neighbors[a.as_usize()].push(b);
            neighbors[b.as_usize()].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        let components = Components::from_edges(node_count, &edges);
        debug!(
            "graph built: {} nodes, {} edges, {} components",
            node_count,
            edges.len(),
            components.count()
        );

        Ok(Self {
            node_count,
            neighbors,
            edge_set: edges.iter().copied().collect(),
            edges,
            components,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Iterates all node indices in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.node_count).map(NodeIdx::from)
    }

    /// Degree of a node.
    #[must_use]
    pub fn degree(&self, node: NodeIdx) -> usize {
        self.neighbors[node.as_usize()].len()
    }

    /// Sorted neighbors of a node.
    #[must_use]
    pub fn neighbors(&self, node: NodeIdx) -> &[NodeIdx] {
        &self.neighbors[node.as_usize()]
    }

    /// Canonical `(min, max)` edge list, sorted.
    #[must_use]
    pub fn edges(&self) -> &[(NodeIdx, NodeIdx)] {
        &self.edges
    }

    /// Returns true if `a` and `b` share an edge.
    #[must_use]
    pub fn adjacent(&self, a: NodeIdx, b: NodeIdx) -> bool {
        self.edge_set.contains(&(a.min(b), a.max(b)))
    }

    /// Connected-component labels.
    #[must_use]
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Nodes of the largest connected component, ascending.
    #[must_use]
    pub fn largest_component(&self) -> Vec<NodeIdx> {
        let Some(label) = self.components.largest() else {
            return Vec::new();
        };
        self.nodes()
            .filter(|&v| self.components.label(v) == label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|i| (i - 1, i))).unwrap()
    }

    #[test]
    fn test_edges_are_canonical_and_unique() {
        let g = Graph::from_edges(3, [(1, 0), (0, 1), (2, 2), (2, 1)]).unwrap();
        assert_eq!(
            g.edges(),
            &[
                (NodeIdx::new(0), NodeIdx::new(1)),
                (NodeIdx::new(1), NodeIdx::new(2))
            ]
        );
        assert_eq!(g.degree(NodeIdx::new(1)), 2);
        assert_eq!(g.degree(NodeIdx::new(2)), 1);
        assert!(g.adjacent(NodeIdx::new(2), NodeIdx::new(1)));
        assert!(!g.adjacent(NodeIdx::new(0), NodeIdx::new(2)));
    }

    #[test]
    fn test_out_of_range_endpoint() {
        let err = Graph::from_edges(2, [(0, 2)]).unwrap_err();
        assert_eq!(
            err,
            AlignError::NodeOutOfRange {
                node: 2,
                node_count: 2
            }
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(4, 1)]
    fn test_path_component_count(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(path(n).components().count(), expected);
    }

    #[test]
    fn test_components_and_largest() {
        let g = Graph::from_edges(6, [(0, 1), (3, 4), (4, 5)]).unwrap();
        let c = g.components();
        assert_eq!(c.count(), 3);
        assert_eq!(c.labels(), &[0, 0, 1, 2, 2, 2]);
        assert_eq!(c.sizes(), &[2, 1, 3]);
        assert_eq!(
            g.largest_component(),
            vec![NodeIdx::new(3), NodeIdx::new(4), NodeIdx::new(5)]
        );
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::from_edges(0, std::iter::empty()).unwrap();
        assert!(g.is_empty());
        assert!(g.largest_component().is_empty());
        assert_eq!(g.components().largest(), None);
    }
}
