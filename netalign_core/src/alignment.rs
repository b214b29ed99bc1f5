//! Partial one-to-one mapping between the nodes of two graphs.

use contracts::*;
use netalign_common::{NodeIdx, Pair};

/// The committed pairs of an alignment in production order, plus the partner
/// of every node on both sides.
#[derive(Clone, Debug, Default)]
pub struct Alignment {
    /// Partner in the second graph of each first-graph node.
    partner1: Vec<Option<NodeIdx>>,
    /// Partner in the first graph of each second-graph node.
    partner2: Vec<Option<NodeIdx>>,
    /// Committed pairs in the order they were produced.
    pairs: Vec<Pair>,
}

impl Alignment {
    /// Checks that both partner tables agree with the pair list.
    pub fn is_consistent(&self) -> bool {
        let paired1 = self.partner1.iter().flatten().count();
        let paired2 = self.partner2.iter().flatten().count();
        if paired1 != self.pairs.len() || paired2 != self.pairs.len() {
            return false;
        }
        self.pairs.iter().all(|p| {
            self.partner1[p.node1.as_usize()] == Some(p.node2)
                && self.partner2[p.node2.as_usize()] == Some(p.node1)
        })
    }

    /// Creates an empty alignment for graphs of the given sizes.
    #[ensures(ret.is_consistent())]
    pub fn new(node_count1: usize, node_count2: usize) -> Self {
        Self {
            partner1: vec![None; node_count1],
            partner2: vec![None; node_count2],
            pairs: Vec::new(),
        }
    }

    /// Commits a pair if both endpoints are still free.
    ///
    /// Returns false, leaving the alignment untouched, otherwise.
    #[debug_ensures(self.is_consistent())]
    pub fn commit(&mut self, pair: Pair) -> bool {
        if !self.is_free1(pair.node1) || !self.is_free2(pair.node2) {
            return false;
        }
        self.partner1[pair.node1.as_usize()] = Some(pair.node2);
        self.partner2[pair.node2.as_usize()] = Some(pair.node1);
        self.pairs.push(pair);
        true
    }

    /// Partner of a first-graph node.
    #[must_use]
    pub fn partner1(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.partner1[node.as_usize()]
    }

    /// Partner of a second-graph node.
    #[must_use]
    pub fn partner2(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.partner2[node.as_usize()]
    }

    /// Returns true if the first-graph node is unpaired.
    #[must_use]
    pub fn is_free1(&self, node: NodeIdx) -> bool {
        self.partner1[node.as_usize()].is_none()
    }

    /// Returns true if the second-graph node is unpaired.
    #[must_use]
    pub fn is_free2(&self, node: NodeIdx) -> bool {
        self.partner2[node.as_usize()].is_none()
    }

    /// Returns true once every node of either graph is paired.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.pairs.len() == self.partner1.len() || self.pairs.len() == self.partner2.len()
    }

    /// Committed pairs in production order.
    #[must_use]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Consumes the alignment, returning its pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<Pair> {
        self.pairs
    }

    /// Number of committed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u32, b: u32) -> Pair {
        Pair::new(NodeIdx::new(a), NodeIdx::new(b), 0.0)
    }

    #[test]
    fn test_commit_rejects_taken_endpoints() {
        let mut a = Alignment::new(3, 3);
        assert!(a.commit(pair(0, 1)));
        assert!(!a.commit(pair(0, 2)));
        assert!(!a.commit(pair(2, 1)));
        assert!(a.commit(pair(2, 0)));
        assert_eq!(a.len(), 2);
        assert_eq!(a.partner1(NodeIdx::new(2)), Some(NodeIdx::new(0)));
        assert_eq!(a.partner2(NodeIdx::new(1)), Some(NodeIdx::new(0)));
        assert!(a.is_free1(NodeIdx::new(1)));
    }

    #[test]
    fn test_saturation_on_smaller_side() {
        let mut a = Alignment::new(1, 3);
        assert!(!a.is_saturated());
        a.commit(pair(0, 2));
        assert!(a.is_saturated());
    }
}
