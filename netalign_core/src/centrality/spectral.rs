//! Fiedler vector of a connected node set.

use nalgebra::SymmetricEigen;
use netalign_common::{Graph, NodeIdx};
use tracing::debug;

use super::linalg;

const EIGEN_EPSILON: f64 = 1e-12;

/// Eigenvector of the second-smallest Laplacian eigenvalue of the subgraph
/// induced by `nodes`, indexed like `nodes`.
///
/// `max_iterations` caps the QR sweeps of the symmetric eigen-solver; `None`
/// runs it to convergence. Returns `None` if the cap is hit first. The sign
/// is fixed so the first non-negligible entry is positive.
pub fn fiedler_vector(
    graph: &Graph,
    nodes: &[NodeIdx],
    max_iterations: Option<usize>,
) -> Option<Vec<f64>> {
    let k = nodes.len();
    if k < 2 {
        return Some(vec![0.0; k]);
    }
    let eigen = SymmetricEigen::try_new(
        linalg::laplacian(graph, nodes),
        EIGEN_EPSILON,
        max_iterations.unwrap_or(0),
    )?;

    let mut by_value: Vec<usize> = (0..k).collect();
    by_value.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    let second = by_value[1];
    debug!(
        "fiedler vector over {} nodes, algebraic connectivity {:.6}",
        k, eigen.eigenvalues[second]
    );

    let mut x: Vec<f64> = eigen.eigenvectors.column(second).iter().copied().collect();
    if let Some(&lead) = x.iter().find(|v| v.abs() > 1e-9) {
        if lead < 0.0 {
            x.iter_mut().for_each(|v| *v = -*v);
        }
    }
    Some(x)
}
