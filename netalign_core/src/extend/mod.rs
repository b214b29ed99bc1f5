//! Growing a partial alignment outward from its seed pairs.
//!
//! Two strategies are available: batched assignment rounds over the
//! neighborhood frontier, and a single best-first loop over an indexed
//! priority queue of candidate pairs. Both stop once every node of either
//! graph is aligned.

mod batched;
pub mod priority;
pub mod scoring;
mod single;

use netalign_common::{AlignResult, ExtendStrategy, Pair};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::alignment::Alignment;
use crate::context::AlignContext;

/// Bookkeeping for one extension round; round 0 is the seed round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoundStats {
    /// Round number.
    pub round: usize,
    /// Candidate nodes selected in the first graph.
    pub selected1: usize,
    /// Candidate nodes selected in the second graph.
    pub selected2: usize,
    /// Pairs produced by the matcher.
    pub matched: usize,
    /// Pairs committed after the keep-ratio filter.
    pub kept: usize,
    /// Conserved edges between two pairs of this round.
    pub conserved_within: usize,
    /// Conserved edges from this round's pairs to earlier pairs.
    pub conserved_to_previous: usize,
    /// Total aligned pairs after the round.
    pub aligned_total: usize,
}

/// Result of one extension run.
#[derive(Clone, Debug, Default)]
pub struct Extension {
    /// The grown alignment.
    pub alignment: Alignment,
    /// Per-round statistics (batched strategy only past round 0).
    pub rounds: Vec<RoundStats>,
}

/// Grows alignments with the configured strategy.
pub struct ExtensionEngine<'c, 'a> {
    ctx: &'c AlignContext<'a>,
}

impl<'c, 'a> ExtensionEngine<'c, 'a> {
    /// Creates an engine over a run context.
    #[must_use]
    pub const fn new(ctx: &'c AlignContext<'a>) -> Self {
        Self { ctx }
    }

    /// Commits `seeds` (skipping any that clash with earlier seeds) and
    /// extends until either graph is fully aligned.
    ///
    /// # Errors
    /// Propagates matcher failures from batched rounds.
    pub fn extend<R: Rng + ?Sized>(&self, seeds: &[Pair], rng: &mut R) -> AlignResult<Extension> {
        let (g1, g2) = (self.ctx.side1.graph, self.ctx.side2.graph);
        let mut alignment = Alignment::new(g1.node_count(), g2.node_count());
        let mut round_of = RoundLabels::new(g1.node_count());
        for &seed in seeds {
            if alignment.commit(seed) {
                round_of.mark(seed, 0);
            }
        }
        let mut rounds = vec![round_of.stats(self.ctx, &alignment, 0, alignment.pairs())];
        rounds[0].selected1 = seeds.len();
        rounds[0].selected2 = seeds.len();
        rounds[0].matched = seeds.len();

        info!(
            "starting extension from {} seeds ({:?})",
            alignment.len(),
            self.ctx.config.extend
        );
        match self.ctx.config.extend {
            ExtendStrategy::Batched { penalize_bad_edges } => batched::run(
                self.ctx,
                &mut alignment,
                penalize_bad_edges,
                rng,
                &mut round_of,
                &mut rounds,
            )?,
            ExtendStrategy::SingleBestFirst(scoring) => {
                single::run(self.ctx, &mut alignment, scoring, rng);
            }
        }
        info!("extension finished with {} pairs", alignment.len());
        Ok(Extension { alignment, rounds })
    }
}

/// Round in which each first-graph node was aligned.
pub(crate) struct RoundLabels {
    round: Vec<Option<usize>>,
}

impl RoundLabels {
    fn new(node_count1: usize) -> Self {
        Self {
            round: vec![None; node_count1],
        }
    }

    fn mark(&mut self, pair: Pair, round: usize) {
        self.round[pair.node1.as_usize()] = Some(round);
    }

    /// Statistics for the pairs just committed in `round`.
    fn stats(
        &self,
        ctx: &AlignContext<'_>,
        alignment: &Alignment,
        round: usize,
        new_pairs: &[Pair],
    ) -> RoundStats {
        let (g1, g2) = (ctx.side1.graph, ctx.side2.graph);
        let mut within = 0;
        let mut previous = 0;
        for p in new_pairs {
            for &x in g1.neighbors(p.node1) {
                let Some(y) = alignment.partner1(x) else {
                    continue;
                };
                if !g2.adjacent(p.node2, y) {
                    continue;
                }
                match self.round[x.as_usize()] {
                    Some(r) if r == round => within += 1,
                    Some(_) => previous += 1,
                    None => {}
                }
            }
        }
        RoundStats {
            round,
            kept: new_pairs.len(),
            conserved_within: within / 2,
            conserved_to_previous: previous,
            aligned_total: alignment.len(),
            ..RoundStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netalign_common::{Config, Graph, NodeIdx, PairScoring, SimilarityMatrix};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn identity(n: usize) -> SimilarityMatrix {
        SimilarityMatrix::from_entries(n, n, (0..n).map(|i| (i, i, 1.0))).unwrap()
    }

    #[rstest]
    #[case(ExtendStrategy::Batched { penalize_bad_edges: false })]
    #[case(ExtendStrategy::Batched { penalize_bad_edges: true })]
    #[case(ExtendStrategy::SingleBestFirst(PairScoring::CommonNeighbor))]
    #[case(ExtendStrategy::SingleBestFirst(PairScoring::AdamicProduct))]
    fn test_cycle_extends_from_one_seed(#[case] strategy: ExtendStrategy) {
        let n = 6;
        let g = Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap();
        let sim = identity(n);
        let config = Config::builder().extend(strategy).rng_seed(Some(9)).build();
        let ctx = AlignContext::new(&config, &g, &g, &sim, None).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let seeds = [Pair::new(NodeIdx::new(0), NodeIdx::new(0), 1.0)];
        let ext = ExtensionEngine::new(&ctx).extend(&seeds, &mut rng).unwrap();
        assert_eq!(ext.alignment.len(), n);
        assert!(ext.alignment.is_consistent());
        assert_eq!(ext.rounds[0].kept, 1);
    }

    #[test]
    fn test_batched_round_stats_add_up() {
        let g = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
        let sim = identity(4);
        let config = Config::default();
        let ctx = AlignContext::new(&config, &g, &g, &sim, None).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let seeds = [Pair::new(NodeIdx::new(1), NodeIdx::new(1), 1.0)];
        let ext = ExtensionEngine::new(&ctx).extend(&seeds, &mut rng).unwrap();
        let kept: usize = ext.rounds.iter().map(|r| r.kept).sum();
        let conserved: usize = ext
            .rounds
            .iter()
            .map(|r| r.conserved_within + r.conserved_to_previous)
            .sum();
        assert_eq!(kept, 4);
        assert_eq!(conserved, 3);
        assert_eq!(ext.rounds.last().map(|r| r.aligned_total), Some(4));
    }

    #[test]
    fn test_empty_graph_extends_to_nothing() {
        let g1 = Graph::from_edges(0, std::iter::empty()).unwrap();
        let g2 = Graph::from_edges(3, [(0, 1)]).unwrap();
        let sim = SimilarityMatrix::zeros(0, 3);
        let config = Config::default();
        let ctx = AlignContext::new(&config, &g1, &g2, &sim, None).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let ext = ExtensionEngine::new(&ctx).extend(&[], &mut rng).unwrap();
        assert!(ext.alignment.is_empty());
    }
}
