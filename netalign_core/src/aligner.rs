//! End-to-end alignment runs.

use netalign_common::{
    AlignResult, Config, Graph, MatchingAlgorithm, NodeIdx, Pair, PairEdge, SimilarityMatrix,
    Strategy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::anneal::{AnnealStep, AnnealingController};
use crate::context::AlignContext;
use crate::extend::{ExtensionEngine, RoundStats};
use crate::matcher::{BipartiteMatcher, DenseMatrix};
use crate::metrics::{Metrics, conserved_edges};
use crate::seed::SeedSelector;
use crate::verify::verify;

/// Everything a run produces.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AlignmentReport {
    /// Final one-to-one mapping.
    pub pairs: Vec<Pair>,
    /// Conserved edges under `pairs`.
    pub pair_edges: Vec<PairEdge>,
    /// Quality measures of `pairs`.
    pub metrics: Metrics,
    /// Seed pairs the final mapping grew from (empty for baselines).
    pub seeds: Vec<Pair>,
    /// Extension rounds of the final mapping.
    pub rounds: Vec<RoundStats>,
    /// Annealing trace, for annealing runs.
    pub anneal: Option<Vec<AnnealStep>>,
}

/// Aligns two graphs under one configuration.
#[derive(Debug)]
pub struct Aligner<'a> {
    ctx: AlignContext<'a>,
}

impl<'a> Aligner<'a> {
    /// Validates the inputs and precomputes per-graph orderings.
    ///
    /// # Errors
    /// Fails on an invalid configuration or mismatched similarity shapes.
    pub fn new(
        config: &'a Config,
        g1: &'a Graph,
        g2: &'a Graph,
        similarity: &'a SimilarityMatrix,
        seed_similarity: Option<&'a SimilarityMatrix>,
    ) -> AlignResult<Self> {
        Ok(Self {
            ctx: AlignContext::new(config, g1, g2, similarity, seed_similarity)?,
        })
    }

    /// The validated run context: configuration, both graph sides and the
    /// similarity tables.
    #[must_use]
    pub const fn context(&self) -> &AlignContext<'a> {
        &self.ctx
    }

    /// Runs with a generator seeded from `rng_seed`, or from the OS when unset.
    ///
    /// # Errors
    /// Propagates matcher failures.
    pub fn run(&self) -> AlignResult<AlignmentReport> {
        let mut rng = match self.ctx.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with(&mut rng)
    }

    /// Runs the configured strategy, verifies its output and scores it.
    ///
    /// # Errors
    /// Propagates matcher failures.
    pub fn run_with<R: Rng + ?Sized>(&self, rng: &mut R) -> AlignResult<AlignmentReport> {
        let ctx = &self.ctx;
        let (g1, g2) = (ctx.side1.graph, ctx.side2.graph);
        info!(
            "starting alignment: {} nodes / {} edges against {} nodes / {} edges, {:?}",
            g1.node_count(),
            g1.edge_count(),
            g2.node_count(),
            g2.edge_count(),
            ctx.config.strategy
        );

        let mut report = AlignmentReport::default();
        let raw = match ctx.config.strategy {
            Strategy::SeedExtend => {
                let seeds = SeedSelector::new(ctx).select(rng)?;
                let extension = ExtensionEngine::new(ctx).extend(&seeds.kept, rng)?;
                report.seeds = seeds.kept;
                report.rounds = extension.rounds;
                extension.alignment.into_pairs()
            }
            Strategy::Annealing => {
                let outcome = AnnealingController::new(ctx).run(rng)?;
                info!(
                    "annealing finished: current CE {}, best CE {}",
                    outcome.current_ce, outcome.best_ce
                );
                report.seeds = outcome.seeds;
                report.rounds = outcome.rounds;
                report.anneal = Some(outcome.steps);
                outcome.pairs
            }
            Strategy::Greedy => self.whole_graph_matching(MatchingAlgorithm::Greedy, rng)?,
            Strategy::MaxWeight => self.whole_graph_matching(MatchingAlgorithm::Exact, rng)?,
        };

        report.pairs = verify(&raw);
        report.pair_edges = conserved_edges(g1, g2, &report.pairs);
        report.metrics = Metrics::evaluate(g1, g2, ctx.seed_similarity, &report.pairs);
        info!(
            "alignment done: {} pairs, CE {}, EC {:.4}, S3 {:.4}",
            report.metrics.aligned,
            report.metrics.conserved_edges,
            report.metrics.edge_correctness,
            report.metrics.s3
        );
        Ok(report)
    }

    /// Matches the full similarity table in one solve, ignoring topology.
    fn whole_graph_matching<R: Rng + ?Sized>(
        &self,
        algorithm: MatchingAlgorithm,
        rng: &mut R,
    ) -> AlignResult<Vec<Pair>> {
        let sim = self.ctx.similarity;
        let scores = DenseMatrix::new(sim.rows(), sim.cols(), sim.values().to_vec())?;
        let matched = BipartiteMatcher::new(algorithm).maximize(&scores, rng)?;
        Ok(matched
            .into_iter()
            .map(|(i, j)| {
                let (a, b) = (NodeIdx::from(i), NodeIdx::from(j));
                Pair::new(a, b, sim.get(a, b))
            })
            .collect())
    }
}
