//! Connected component labelling via union-find.

use super::NodeIdx;

/// Disjoint-set forest with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}

/// Component labels of an undirected graph.
///
/// Labels are dense (`0..count`) and assigned in order of each component's
/// lowest node index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Components {
    labels: Vec<usize>,
    sizes: Vec<usize>,
}

impl Components {
    pub(super) fn from_edges(node_count: usize, edges: &[(NodeIdx, NodeIdx)]) -> Self {
        let mut uf = UnionFind::new(node_count);
        for &(a, b) in edges {
            uf.union(a.as_usize(), b.as_usize());
        }

        let mut root_label = vec![usize::MAX; node_count];
        let mut labels = Vec::with_capacity(node_count);
        let mut sizes = Vec::new();
        for v in 0..node_count {
            let root = uf.find(v);
            if root_label[root] == usize::MAX {
                root_label[root] = sizes.len();
                sizes.push(0);
            }
            let label = root_label[root];
            sizes[label] += 1;
            labels.push(label);
        }
        Self { labels, sizes }
    }

    /// Number of components.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Component label of a node.
    #[must_use]
    pub fn label(&self, node: NodeIdx) -> usize {
        self.labels[node.as_usize()]
    }

    /// Label per node, indexed by node.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Node count of each component, indexed by label.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Label of the biggest component; ties go to the lowest label.
    #[must_use]
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (label, &size) in self.sizes.iter().enumerate() {
            if best.is_none_or(|(_, s)| size > s) {
                best = Some((label, size));
            }
        }
        best.map(|(label, _)| label)
    }
}
