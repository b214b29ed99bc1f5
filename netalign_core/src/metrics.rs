//! Alignment quality measures.
//!
//! Every measure is a pure function of both graphs and a one-to-one pair
//! list; run [`verify`](crate::verify::verify) first on raw output.

use netalign_common::{Graph, NodeIdx, Pair, PairEdge, SimilarityMatrix};
use serde::Serialize;

use crate::utils::safe_div;

/// Edges of the first graph whose endpoints map onto an edge of the second.
#[must_use]
pub fn conserved_edges(g1: &Graph, g2: &Graph, pairs: &[Pair]) -> Vec<PairEdge> {
    let mapping = forward_map(g1, pairs);
    g1.edges()
        .iter()
        .filter_map(|&(x, y)| {
            let (mx, my) = (mapping[x.as_usize()]?, mapping[y.as_usize()]?);
            g2.adjacent(mx, my).then_some(PairEdge {
                first: (x, mx),
                second: (y, my),
            })
        })
        .collect()
}

/// Number of conserved edges.
#[must_use]
pub fn conserved_edge_count(g1: &Graph, g2: &Graph, pairs: &[Pair]) -> usize {
    let mapping = forward_map(g1, pairs);
    g1.edges()
        .iter()
        .filter(|&&(x, y)| match (mapping[x.as_usize()], mapping[y.as_usize()]) {
            (Some(mx), Some(my)) => g2.adjacent(mx, my),
            _ => false,
        })
        .count()
}

fn forward_map(g1: &Graph, pairs: &[Pair]) -> Vec<Option<NodeIdx>> {
    let mut mapping = vec![None; g1.node_count()];
    for p in pairs {
        mapping[p.node1.as_usize()] = Some(p.node2);
    }
    mapping
}

/// Quality measures of a final alignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Number of aligned pairs.
    pub aligned: usize,
    /// Conserved edges (CE).
    pub conserved_edges: usize,
    /// Edge correctness: `CE / min(|E1|, |E2|)`.
    pub edge_correctness: f64,
    /// Induced conserved structure: `CE` over the edges induced by the
    /// aligned nodes of the graph with more edges.
    pub induced_conserved_structure: f64,
    /// Symmetric substructure score.
    pub s3: f64,
    /// Pairs in the largest connected component of the conserved-edge graph.
    pub lccs: usize,
    /// `||A1 - P A2 Pᵀ||_F` for the alignment permutation `P`.
    pub frobenius: f64,
    /// Summed similarity of the aligned pairs.
    pub nbs: f64,
}

impl Metrics {
    /// Computes every measure for a one-to-one pair list.
    ///
    /// `similarity` supplies the node-similarity sum; pass the raw,
    /// topology-free table when one is available.
    #[must_use]
    pub fn evaluate(g1: &Graph, g2: &Graph, similarity: &SimilarityMatrix, pairs: &[Pair]) -> Self {
        let conserved = conserved_edges(g1, g2, pairs);
        let ce = conserved.len();
        let (e1, e2) = (g1.edge_count(), g2.edge_count());
        let min_edges = e1.min(e2);

        let induced = if e1 < e2 {
            induced_edges(g2, pairs.iter().map(|p| p.node2))
        } else {
            induced_edges(g1, pairs.iter().map(|p| p.node1))
        };
        let image_edges = induced_edges(g2, pairs.iter().map(|p| p.node2));
        // Each undirected edge contributes two adjacency entries.
        let squared = 2 * e1 + 2 * image_edges - 4 * ce;

        Self {
            aligned: pairs.len(),
            conserved_edges: ce,
            edge_correctness: safe_div(ce as f64, min_edges as f64),
            induced_conserved_structure: safe_div(ce as f64, induced as f64),
            s3: safe_div(ce as f64, (min_edges + induced - ce) as f64),
            lccs: largest_conserved_component(pairs, &conserved),
            frobenius: (squared as f64).sqrt(),
            nbs: pairs.iter().map(|p| similarity.get(p.node1, p.node2)).sum(),
        }
    }
}

/// Edges of `graph` with both endpoints in `nodes`.
fn induced_edges(graph: &Graph, nodes: impl Iterator<Item = NodeIdx>) -> usize {
    let mut member = vec![false; graph.node_count()];
    for v in nodes {
        member[v.as_usize()] = true;
    }
    graph
        .edges()
        .iter()
        .filter(|(a, b)| member[a.as_usize()] && member[b.as_usize()])
        .count()
}

fn largest_conserved_component(pairs: &[Pair], conserved: &[PairEdge]) -> usize {
    let mut index = vec![usize::MAX; pairs.iter().map(|p| p.node1.as_usize() + 1).max().unwrap_or(0)];
    for (k, p) in pairs.iter().enumerate() {
        index[p.node1.as_usize()] = k;
    }
    let edges = conserved
        .iter()
        .map(|e| (index[e.first.0.as_usize()], index[e.second.0.as_usize()]));
    match Graph::from_edges(pairs.len(), edges) {
        Ok(pair_graph) => pair_graph
            .components()
            .largest()
            .map_or(0, |label| pair_graph.components().sizes()[label]),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_pairs(n: u32) -> Vec<Pair> {
        (0..n)
            .map(|i| Pair::new(NodeIdx::new(i), NodeIdx::new(i), 1.0))
            .collect()
    }

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|i| (i - 1, i))).unwrap()
    }

    #[test]
    fn test_identity_on_path() {
        let g = path(4);
        let sim = SimilarityMatrix::from_entries(4, 4, (0..4).map(|i| (i, i, 1.0))).unwrap();
        let m = Metrics::evaluate(&g, &g, &sim, &identity_pairs(4));
        assert_eq!(m.conserved_edges, 3);
        assert_eq!(m.edge_correctness, 1.0);
        assert_eq!(m.induced_conserved_structure, 1.0);
        assert_eq!(m.s3, 1.0);
        assert_eq!(m.lccs, 4);
        assert_eq!(m.frobenius, 0.0);
        assert_eq!(m.nbs, 4.0);
    }

    #[test]
    fn test_partial_mapping() {
        // Triangle onto path: 0-1 and 1-2 conserved, 0-2 not.
        let g1 = Graph::from_edges(3, [(0, 1), (1, 2), (0, 2)]).unwrap();
        let g2 = path(3);
        let sim = SimilarityMatrix::zeros(3, 3);
        let pairs = identity_pairs(3);
        let edges = conserved_edges(&g1, &g2, &pairs);
        assert_eq!(edges.len(), 2);
        assert_eq!(conserved_edge_count(&g1, &g2, &pairs), 2);

        let m = Metrics::evaluate(&g1, &g2, &sim, &pairs);
        assert_eq!(m.edge_correctness, 1.0);
        // G1 has more edges, so its induced subgraph is the reference.
        assert!((m.induced_conserved_structure - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.s3 - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.frobenius - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_isolated_pairs_count_towards_lccs() {
        let g = Graph::from_edges(3, std::iter::empty()).unwrap();
        let sim = SimilarityMatrix::zeros(3, 3);
        let m = Metrics::evaluate(&g, &g, &sim, &identity_pairs(3));
        assert_eq!(m.conserved_edges, 0);
        assert_eq!(m.edge_correctness, 0.0);
        assert_eq!(m.lccs, 1);
    }

    #[test]
    fn test_empty_alignment() {
        let g = path(2);
        let sim = SimilarityMatrix::zeros(2, 2);
        let m = Metrics::evaluate(&g, &g, &sim, &[]);
        assert_eq!(m, Metrics { frobenius: 2f64.sqrt(), ..Metrics::default() });
    }

    #[test]
    fn test_pair_edge_holds_one_pair_per_endpoint() {
        let g = path(3);
        let n = NodeIdx::new;
        let pairs = [
            Pair::new(n(0), n(2), 0.0),
            Pair::new(n(1), n(1), 0.0),
            Pair::new(n(2), n(0), 0.0),
        ];
        let edges = conserved_edges(&g, &g, &pairs);
        assert_eq!(
            edges,
            vec![
                PairEdge {
                    first: (n(0), n(2)),
                    second: (n(1), n(1)),
                },
                PairEdge {
                    first: (n(1), n(1)),
                    second: (n(2), n(0)),
                },
            ]
        );
        for e in &edges {
            assert!(g.adjacent(e.first.0, e.second.0));
            assert!(g.adjacent(e.first.1, e.second.1));
        }
    }
}
