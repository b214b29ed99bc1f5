//! Batched extension rounds.
//!
//! Each round selects free frontier nodes on both sides, scores every
//! cross pair by blending normalized similarity with normalized topological
//! support from the pairs already committed, solves one assignment and keeps
//! the most similar fraction of the result.

use netalign_common::{AlignResult, NodeIdx, Pair};
use rand::Rng;
use tracing::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::{RoundLabels, RoundStats};
use crate::alignment::Alignment;
use crate::context::{AlignContext, GraphSide};
use crate::matcher::DenseMatrix;
use crate::seed::drop_lowest;
use crate::utils::{normalize_columns, removal_count};

pub(super) fn run<R: Rng + ?Sized>(
    ctx: &AlignContext<'_>,
    alignment: &mut Alignment,
    penalize_bad_edges: bool,
    rng: &mut R,
    round_of: &mut RoundLabels,
    rounds: &mut Vec<RoundStats>,
) -> AlignResult<()> {
    let config = ctx.config;
    let mut round = 0;
    while !alignment.is_saturated() {
        round += 1;
        let select1 = frontier(&ctx.side1, config.max_extend_size, |v| alignment.is_free1(v));
        let select2 = frontier(&ctx.side2, config.max_extend_size, |v| alignment.is_free2(v));
        if select1.is_empty() || select2.is_empty() {
            debug!("round {round}: empty frontier, stopping");
            break;
        }

        let scores = round_scores(ctx, alignment, &select1, &select2, penalize_bad_edges);
        let matched = ctx.matcher.maximize(&scores, rng)?;
        if matched.is_empty() {
            break;
        }
        let pairs: Vec<Pair> = matched
            .iter()
            .map(|&(i, j)| {
                let (a, b) = (select1[i], select2[j]);
                Pair::new(a, b, ctx.similarity.get(a, b))
            })
            .collect();
        // Always keep at least one pair so every round makes progress.
        let removal = removal_count(pairs.len(), config.extend_keep_ratio).min(pairs.len() - 1);
        let kept: Vec<Pair> = drop_lowest(&pairs, removal)
            .into_iter()
            .filter(|&p| alignment.commit(p))
            .collect();
        for &p in &kept {
            round_of.mark(p, round);
        }

        let mut stats = round_of.stats(ctx, alignment, round, &kept);
        stats.selected1 = select1.len();
        stats.selected2 = select2.len();
        stats.matched = matched.len();
        debug!(
            "round {round}: {}x{} selected, {} matched, {} kept, {} aligned",
            stats.selected1, stats.selected2, stats.matched, stats.kept, stats.aligned_total
        );
        rounds.push(stats);
        if kept.is_empty() {
            break;
        }
    }
    Ok(())
}

/// Free nodes adjacent to an aligned node in node order, capped at `cap`,
/// then padded with free component representatives.
fn frontier(
    side: &GraphSide<'_>,
    cap: usize,
    is_free: impl Fn(NodeIdx) -> bool,
) -> Vec<NodeIdx> {
    let graph = side.graph;
    let mut picked = vec![false; graph.node_count()];
    let mut selected = Vec::new();
    let reached = side
        .order
        .iter()
        .copied()
        .filter(|&v| is_free(v) && graph.neighbors(v).iter().any(|&u| !is_free(u)));
    for v in reached.chain(side.representatives.iter().copied().filter(|&v| is_free(v))) {
        if selected.len() >= cap {
            break;
        }
        if !picked[v.as_usize()] {
            picked[v.as_usize()] = true;
            selected.push(v);
        }
    }
    selected
}

/// `topo_strength * topo + (1 - topo_strength) * base`, both
/// column-normalized.
fn round_scores(
    ctx: &AlignContext<'_>,
    alignment: &Alignment,
    select1: &[NodeIdx],
    select2: &[NodeIdx],
    penalize_bad_edges: bool,
) -> DenseMatrix {
    let (rows, cols) = (select1.len(), select2.len());
    let mut base = DenseMatrix::from_fn(rows, cols, |i, j| ctx.similarity.get(select1[i], select2[j]));
    let mut topo = topology_support(ctx, alignment, select1, select2, penalize_bad_edges);
    normalize_columns(base.values_mut(), rows, cols);
    normalize_columns(topo.values_mut(), rows, cols);

    let strength = ctx.config.topo_strength;
    for (t, b) in topo.values_mut().iter_mut().zip(base.values()) {
        *t = strength * *t + (1.0 - strength) * b;
    }
    topo
}

/// Counts, for every candidate pair, the committed pairs whose edges it
/// would conserve.
///
/// With `penalize_bad_edges`, every conserved edge is worth
/// `1 + 2 * bad_edge_cost` and each endpoint loses `bad_edge_cost` per
/// aligned neighbor, so edges that would not be conserved cost something.
fn topology_support(
    ctx: &AlignContext<'_>,
    alignment: &Alignment,
    select1: &[NodeIdx],
    select2: &[NodeIdx],
    penalize_bad_edges: bool,
) -> DenseMatrix {
    let (g1, g2) = (ctx.side1.graph, ctx.side2.graph);
    let cols = select2.len();
    let mut column_of = vec![None; g2.node_count()];
    for (j, &v) in select2.iter().enumerate() {
        column_of[v.as_usize()] = Some(j);
    }
    let cost = if penalize_bad_edges {
        ctx.config.bad_edge_cost
    } else {
        0.0
    };
    let aligned_neighbors2: Vec<f64> = select2
        .iter()
        .map(|&v| count_aligned(g2.neighbors(v), |u| !alignment.is_free2(u)))
        .collect();

    let row = |&a: &NodeIdx| {
        let mut row = vec![0.0; cols];
        let mut aligned1 = 0.0;
        for &x in g1.neighbors(a) {
            let Some(y) = alignment.partner1(x) else {
                continue;
            };
            aligned1 += 1.0;
            for &z in g2.neighbors(y) {
                if let Some(j) = column_of[z.as_usize()] {
                    row[j] += 1.0 + 2.0 * cost;
                }
            }
        }
        if cost != 0.0 {
            for (v, n2) in row.iter_mut().zip(&aligned_neighbors2) {
                *v -= cost * (aligned1 + n2);
            }
        }
        row
    };

    #[cfg(feature = "rayon")]
    let rows: Vec<Vec<f64>> = select1.par_iter().map(row).collect();
    #[cfg(not(feature = "rayon"))]
    let rows: Vec<Vec<f64>> = select1.iter().map(row).collect();

    DenseMatrix::from_fn(select1.len(), cols, |i, j| rows[i][j])
}

fn count_aligned(neighbors: &[NodeIdx], is_aligned: impl Fn(NodeIdx) -> bool) -> f64 {
    neighbors.iter().filter(|&&u| is_aligned(u)).count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use netalign_common::{Config, Graph, SimilarityMatrix};

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|i| (i - 1, i))).unwrap()
    }

    #[test]
    fn test_frontier_prefers_neighbors_of_aligned_nodes() {
        let g = Graph::from_edges(6, [(0, 1), (1, 2), (2, 3), (4, 5)]).unwrap();
        let sim = SimilarityMatrix::zeros(6, 6);
        let config = Config::default();
        let ctx = AlignContext::new(&config, &g, &g, &sim, None).unwrap();
        let mut alignment = Alignment::new(6, 6);
        alignment.commit(Pair::new(NodeIdx::new(1), NodeIdx::new(1), 0.0));

        let selected = frontier(&ctx.side1, 10, |v| alignment.is_free1(v));
        // Node 2 outranks node 0 on degree; node 4 represents the second component.
        assert_eq!(
            selected,
            vec![NodeIdx::new(2), NodeIdx::new(0), NodeIdx::new(4)]
        );
        let capped = frontier(&ctx.side1, 1, |v| alignment.is_free1(v));
        assert_eq!(capped, vec![NodeIdx::new(2)]);
    }

    #[test]
    fn test_topology_support_counts_conserved_edges() {
        let g = path(3);
        let sim = SimilarityMatrix::zeros(3, 3);
        let config = Config::default();
        let ctx = AlignContext::new(&config, &g, &g, &sim, None).unwrap();
        let mut alignment = Alignment::new(3, 3);
        alignment.commit(Pair::new(NodeIdx::new(1), NodeIdx::new(1), 0.0));

        let select = [NodeIdx::new(0), NodeIdx::new(2)];
        let plain = topology_support(&ctx, &alignment, &select, &select, false);
        assert_eq!(plain.values(), &[1.0, 1.0, 1.0, 1.0]);

        let penalized = topology_support(&ctx, &alignment, &select, &select, true);
        for v in penalized.values() {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_round_scores_break_topology_ties_by_similarity() {
        let g = path(3);
        let sim = SimilarityMatrix::from_entries(3, 3, (0..3).map(|i| (i, i, 1.0))).unwrap();
        let config = Config::default();
        let ctx = AlignContext::new(&config, &g, &g, &sim, None).unwrap();
        let mut alignment = Alignment::new(3, 3);
        alignment.commit(Pair::new(NodeIdx::new(1), NodeIdx::new(1), 1.0));

        let select = [NodeIdx::new(0), NodeIdx::new(2)];
        let scores = round_scores(&ctx, &alignment, &select, &select, false);
        assert!((scores.get(0, 0) - 0.55).abs() < 1e-12);
        assert!((scores.get(0, 1) - 0.45).abs() < 1e-12);
    }
}
