//! Seed selection: pick a bounded, component-covering set of nodes on each
//! side, pair them by similarity and keep only the confident pairs.

use itertools::Itertools;
use netalign_common::{AlignResult, CentralityMeasure, NodeIdx, Pair, SeedRanking};
use rand::Rng;
use tracing::{debug, info};

use crate::centrality::pagerank::{self, PageRankParams};
use crate::context::{AlignContext, GraphSide};
use crate::matcher::DenseMatrix;
use crate::order;
use crate::utils::{normalize_rows_l1, removal_count};

const PAGERANK_TOLERANCE: f64 = 1e-6;

/// Seed nodes chosen on each side, in rank order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSet {
    /// Seed nodes of the first graph.
    pub nodes1: Vec<NodeIdx>,
    /// Seed nodes of the second graph.
    pub nodes2: Vec<NodeIdx>,
}

impl SeedSet {
    /// The endpoints of a pair list.
    #[must_use]
    pub fn from_pairs(pairs: &[Pair]) -> Self {
        Self {
            nodes1: pairs.iter().map(|p| p.node1).collect(),
            nodes2: pairs.iter().map(|p| p.node2).collect(),
        }
    }
}

/// Result of a full seed selection.
#[derive(Clone, Debug, Default)]
pub struct SeedOutcome {
    /// Nodes selected before pairing.
    pub candidates: SeedSet,
    /// Pairs produced by the matcher (or the threshold sweep).
    pub paired: Vec<Pair>,
    /// Pairs surviving the keep-ratio filter, in production order.
    pub kept: Vec<Pair>,
}

/// Chooses the initial high-confidence pairs.
pub struct SeedSelector<'c, 'a> {
    ctx: &'c AlignContext<'a>,
}

impl<'c, 'a> SeedSelector<'c, 'a> {
    /// Creates a selector over a run context.
    #[must_use]
    pub const fn new(ctx: &'c AlignContext<'a>) -> Self {
        Self { ctx }
    }

    /// Selects, pairs and filters seeds.
    ///
    /// # Errors
    /// Propagates matcher failures.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> AlignResult<SeedOutcome> {
        let config = self.ctx.config;
        info!("starting seed selection ({:?})", config.seed_ranking);

        if config.seed_ranking == SeedRanking::SimilarityThreshold {
            let paired = self.threshold_sweep();
            info!("threshold sweep produced {} seed pairs", paired.len());
            return Ok(SeedOutcome {
                candidates: SeedSet::from_pairs(&paired),
                kept: paired.clone(),
                paired,
            });
        }

        let candidates = self.select_nodes();
        let paired = self.pair(&candidates, rng)?;
        let kept = self.keep_confident(&paired);
        info!(
            "seeds: {}x{} candidates, {} paired, {} kept",
            candidates.nodes1.len(),
            candidates.nodes2.len(),
            paired.len(),
            kept.len()
        );
        Ok(SeedOutcome {
            candidates,
            paired,
            kept,
        })
    }

    /// Both sides' full rankings, best first.
    #[must_use]
    pub fn rankings(&self) -> (Vec<NodeIdx>, Vec<NodeIdx>) {
        let (restart1, restart2) = match self.ctx.config.seed_ranking {
            SeedRanking::PageRankSimilarity => match self.ctx.seed_similarity.argmax() {
                Some((a, b)) => (Some(a), Some(b)),
                None => (None, None),
            },
            _ => (
                self.ctx.side1.order.first().copied(),
                self.ctx.side2.order.first().copied(),
            ),
        };
        (
            self.ranking(&self.ctx.side1, restart1),
            self.ranking(&self.ctx.side2, restart2),
        )
    }

    fn ranking(&self, side: &GraphSide<'_>, restart: Option<NodeIdx>) -> Vec<NodeIdx> {
        let config = self.ctx.config;
        match config.seed_ranking {
            SeedRanking::Degree | SeedRanking::SimilarityThreshold => side.order.clone(),
            SeedRanking::Centrality(measure) => side.centrality.ranking(measure, &side.order),
            SeedRanking::PageRankDegree | SeedRanking::PageRankSimilarity => {
                let Some(restart) = restart else {
                    return side.order.clone();
                };
                let params = PageRankParams {
                    damping: config.seed_pagerank_alpha,
                    max_iterations: config.max_power_iterations,
                    tolerance: PAGERANK_TOLERANCE,
                };
                let scores = pagerank::personalized(side.graph, restart, params);
                let mut ranked = side.order.clone();
                ranked.sort_by(|a, b| scores[b.as_usize()].total_cmp(&scores[a.as_usize()]));
                ranked
            }
        }
    }

    /// Caps each ranking at `max_seed_size`, taking one node per connected
    /// component before filling the remaining slots by rank.
    #[must_use]
    pub fn select_nodes(&self) -> SeedSet {
        let (rank1, rank2) = self.rankings();
        let cap = self.ctx.config.max_seed_size;
        SeedSet {
            nodes1: cover_then_fill(&self.ctx.side1, &rank1, cap),
            nodes2: cover_then_fill(&self.ctx.side2, &rank2, cap),
        }
    }

    /// Pairs two node sets by maximizing seed similarity (optionally blended
    /// with centrality and degree agreement). Pairs keep the matcher's order
    /// and carry the run similarity as their score.
    ///
    /// # Errors
    /// Propagates matcher failures.
    pub fn pair<R: Rng + ?Sized>(&self, seeds: &SeedSet, rng: &mut R) -> AlignResult<Vec<Pair>> {
        let scores = self.seed_scores(seeds)?;
        let matched = self.ctx.matcher.maximize(&scores, rng)?;
        Ok(matched
            .into_iter()
            .map(|(i, j)| {
                let (a, b) = (seeds.nodes1[i], seeds.nodes2[j]);
                Pair::new(a, b, self.ctx.similarity.get(a, b))
            })
            .collect())
    }

    fn seed_scores(&self, seeds: &SeedSet) -> AlignResult<DenseMatrix> {
        let (rows, cols) = (seeds.nodes1.len(), seeds.nodes2.len());
        let sim = self.ctx.seed_similarity;
        let mut scores =
            DenseMatrix::from_fn(rows, cols, |i, j| sim.get(seeds.nodes1[i], seeds.nodes2[j]));
        let Some(blend) = self.ctx.config.seed_blend else {
            return Ok(scores);
        };
        debug!("blending seed scores with {:?}", blend);

        let measure: CentralityMeasure = self.ctx.config.weight_centrality;
        let c1 = self.ctx.side1.centrality.weights(measure);
        let c2 = self.ctx.side2.centrality.weights(measure);
        let (g1, g2) = (self.ctx.side1.graph, self.ctx.side2.graph);
        let mut centrality_gap = DenseMatrix::from_fn(rows, cols, |i, j| {
            (c1[seeds.nodes1[i].as_usize()] - c2[seeds.nodes2[j].as_usize()]).abs()
        });
        let mut degree_gap = DenseMatrix::from_fn(rows, cols, |i, j| {
            g1.degree(seeds.nodes1[i]).abs_diff(g2.degree(seeds.nodes2[j])) as f64
        });
        for m in [&mut scores, &mut centrality_gap, &mut degree_gap] {
            normalize_rows_l1(m.values_mut(), cols);
        }
        let blended = scores
            .values()
            .iter()
            .zip(centrality_gap.values())
            .zip(degree_gap.values())
            .map(|((s, c), d)| blend.similarity * s + blend.centrality_gap * c + blend.degree_gap * d)
            .collect();
        DenseMatrix::new(rows, cols, blended)
    }

    /// Drops the lowest-scoring `1 - seed_keep_ratio` fraction (rounded
    /// down). Survivors keep their production order.
    #[must_use]
    pub fn keep_confident(&self, pairs: &[Pair]) -> Vec<Pair> {
        drop_lowest(pairs, removal_count(pairs.len(), self.ctx.config.seed_keep_ratio))
    }

    /// Sweeps all pairs by descending seed similarity down to
    /// `similarity_cut`, greedily keeping pairs with both endpoints free.
    #[must_use]
    pub fn threshold_sweep(&self) -> Vec<Pair> {
        let config = self.ctx.config;
        let sim = self.ctx.seed_similarity;
        let cols = sim.cols();
        let order = (0..sim.values().len())
            .filter(|&k| sim.values()[k] >= config.similarity_cut)
            .sorted_by(|&a, &b| sim.values()[b].total_cmp(&sim.values()[a]));

        let mut used1 = vec![false; sim.rows()];
        let mut used2 = vec![false; cols];
        let mut pairs = Vec::new();
        for k in order {
            let (i, j) = (k / cols, k % cols);
            if used1[i] || used2[j] {
                continue;
            }
            used1[i] = true;
            used2[j] = true;
            let (a, b) = (NodeIdx::from(i), NodeIdx::from(j));
            pairs.push(Pair::new(a, b, self.ctx.similarity.get(a, b)));
            if pairs.len() == config.max_seed_size {
                break;
            }
        }
        pairs
    }
}

/// Removes `count` pairs with the lowest scores (earliest first on ties) and
/// returns the rest in their original order.
pub(crate) fn drop_lowest(pairs: &[Pair], count: usize) -> Vec<Pair> {
    if count == 0 {
        return pairs.to_vec();
    }
    let mut by_score: Vec<usize> = (0..pairs.len()).collect();
    by_score.sort_by(|&a, &b| pairs[a].score.total_cmp(&pairs[b].score));
    let mut dropped = vec![false; pairs.len()];
    for &k in by_score.iter().take(count) {
        dropped[k] = true;
    }
    pairs
        .iter()
        .zip(dropped)
        .filter_map(|(p, d)| (!d).then_some(*p))
        .collect()
}

fn cover_then_fill(side: &GraphSide<'_>, ranking: &[NodeIdx], cap: usize) -> Vec<NodeIdx> {
    let reps = order::component_representatives(side.graph, ranking);
    let mut chosen = vec![false; side.graph.node_count()];
    let mut count = 0;
    for &v in reps.iter().take(cap) {
        chosen[v.as_usize()] = true;
        count += 1;
    }
    for &v in ranking {
        if count >= cap {
            break;
        }
        if !chosen[v.as_usize()] {
            chosen[v.as_usize()] = true;
            count += 1;
        }
    }
    ranking.iter().copied().filter(|v| chosen[v.as_usize()]).collect()
}
