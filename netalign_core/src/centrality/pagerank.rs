//! Personalized PageRank via power iteration.

use netalign_common::{Graph, NodeIdx};
use tracing::debug;

/// Parameters of a personalized PageRank run.
#[derive(Clone, Copy, Debug)]
pub struct PageRankParams {
    /// Probability of following an edge instead of restarting.
    pub damping: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Per-node L1 convergence tolerance.
    pub tolerance: f64,
}

/// PageRank whose restart (and dangling) mass all returns to `restart`.
///
/// Scores sum to 1. Iteration stops once the L1 change falls below
/// `n * tolerance` or after `max_iterations`, whichever comes first; the last
/// iterate is returned either way.
pub fn personalized(graph: &Graph, restart: NodeIdx, params: PageRankParams) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    let d = params.damping;
    let r = restart.as_usize();
    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];

    let mut converged = false;
    let mut iterations = 0;
    for _ in 0..params.max_iterations {
        iterations += 1;
        next.iter_mut().for_each(|s| *s = 0.0);

        let mut dangling = 0.0;
        for v in graph.nodes() {
            let degree = graph.degree(v);
            let mass = scores[v.as_usize()];
            if degree == 0 {
                dangling += mass;
                continue;
            }
            let share = d * mass / degree as f64;
            for w in graph.neighbors(v) {
                next[w.as_usize()] += share;
            }
        }
        next[r] += d * dangling + (1.0 - d);

        let diff: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);
        if diff < n as f64 * params.tolerance {
            converged = true;
            break;
        }
    }
    debug!(
        "pagerank from {}: {} iterations, converged={}",
        restart, iterations, converged
    );
    scores
}
