//! Laplacian matrices of connected node sets.

use nalgebra::DMatrix;
use netalign_common::{Graph, NodeIdx};

/// Laplacian of the subgraph induced by `nodes`; row/column `k` refers to
/// `nodes[k]`.
pub fn laplacian(graph: &Graph, nodes: &[NodeIdx]) -> DMatrix<f64> {
    let k = nodes.len();
    let local = local_index(graph, nodes);
    let mut l = DMatrix::zeros(k, k);
    for (i, &v) in nodes.iter().enumerate() {
        for &w in graph.neighbors(v) {
            if let Some(j) = local[w.as_usize()] {
                l[(i, j)] -= 1.0;
                l[(i, i)] += 1.0;
            }
        }
    }
    l
}

/// Moore-Penrose pseudo-inverse of the Laplacian of `nodes`, which must be
/// connected. Returns `None` when the shifted Laplacian is singular.
///
/// Uses `L+ = (L + J/k)^-1 - J/k`, where `J` is the all-ones matrix.
pub fn laplacian_pseudoinverse(graph: &Graph, nodes: &[NodeIdx]) -> Option<DMatrix<f64>> {
    let k = nodes.len();
    let shift = DMatrix::from_element(k, k, 1.0 / k as f64);
    let inverse = (laplacian(graph, nodes) + &shift).try_inverse()?;
    Some(inverse - shift)
}

/// Maps global node indices to positions in `nodes`.
pub fn local_index(graph: &Graph, nodes: &[NodeIdx]) -> Vec<Option<usize>> {
    let mut local = vec![None; graph.node_count()];
    for (i, v) in nodes.iter().enumerate() {
        local[v.as_usize()] = Some(i);
    }
    local
}
