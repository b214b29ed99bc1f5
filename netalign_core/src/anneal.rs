//! Simulated annealing over seed sets.
//!
//! Each iteration swaps a few seed nodes on both sides for centrality-weighted
//! non-seed nodes, rematches the perturbed seeds, extends them into a full
//! mapping and accepts it by the Metropolis rule on conserved edges.

use netalign_common::{AlignResult, Graph, NodeIdx, Pair};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::Serialize;
use tracing::{debug, info};

use crate::context::{AlignContext, GraphSide};
use crate::extend::{ExtensionEngine, RoundStats};
use crate::metrics::conserved_edge_count;
use crate::seed::{SeedSelector, SeedSet};

/// One annealing iteration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnealStep {
    /// Iteration number, starting at 1.
    pub iteration: usize,
    /// Temperature after cooling.
    pub temperature: f64,
    /// Conserved edges of the perturbed mapping.
    pub candidate_ce: usize,
    /// Conserved edges of the accepted mapping after this step.
    pub current_ce: usize,
    /// Best conserved edge count seen so far.
    pub best_ce: usize,
    /// Whether the candidate replaced the current mapping.
    pub accepted: bool,
}

/// Final state of an annealing run.
#[derive(Clone, Debug, Default)]
pub struct AnnealOutcome {
    /// The last accepted mapping.
    pub pairs: Vec<Pair>,
    /// Seed pairs that produced `pairs`.
    pub seeds: Vec<Pair>,
    /// Conserved edges of `pairs`.
    pub current_ce: usize,
    /// Best conserved edge count reached by any accepted mapping.
    pub best_ce: usize,
    /// Per-iteration trace.
    pub steps: Vec<AnnealStep>,
    /// Extension rounds of the accepted mapping.
    pub rounds: Vec<RoundStats>,
}

/// Drives the perturb, rematch, extend and accept loop.
pub struct AnnealingController<'c, 'a> {
    ctx: &'c AlignContext<'a>,
}

impl<'c, 'a> AnnealingController<'c, 'a> {
    /// Creates a controller over a run context.
    #[must_use]
    pub const fn new(ctx: &'c AlignContext<'a>) -> Self {
        Self { ctx }
    }

    /// Runs seed selection and extension once, then anneals until the
    /// temperature drops below `t_low` or the iteration cap is reached.
    ///
    /// # Errors
    /// Propagates matcher failures from any rematch or extension.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> AlignResult<AnnealOutcome> {
        let config = self.ctx.config;
        let (g1, g2) = (self.ctx.side1.graph, self.ctx.side2.graph);
        let selector = SeedSelector::new(self.ctx);
        let engine = ExtensionEngine::new(self.ctx);

        let initial = selector.select(rng)?;
        let extension = engine.extend(&initial.kept, rng)?;
        let mut outcome = AnnealOutcome {
            seeds: initial.kept,
            rounds: extension.rounds,
            pairs: extension.alignment.into_pairs(),
            ..AnnealOutcome::default()
        };
        outcome.current_ce = conserved_edge_count(g1, g2, &outcome.pairs);
        outcome.best_ce = outcome.current_ce;
        info!("annealing from {} conserved edges", outcome.current_ce);

        let mut temperature = config.t_high;
        while temperature >= config.t_low {
            if config
                .max_anneal_iterations
                .is_some_and(|cap| outcome.steps.len() >= cap)
            {
                info!("annealing stopped at the iteration cap");
                break;
            }
            temperature *= config.cooling;
            let iteration = outcome.steps.len() + 1;

            let perturbed = self.perturb(&outcome.seeds, &outcome.pairs, rng);
            let seeds = selector.pair(&perturbed, rng)?;
            let candidate = engine.extend(&seeds, rng)?;
            let candidate_ce = conserved_edge_count(g1, g2, candidate.alignment.pairs());

            let accepted = candidate_ce >= outcome.current_ce || {
                let delta = candidate_ce as f64 - outcome.current_ce as f64;
                rng.random_bool((delta / temperature).exp().clamp(0.0, 1.0))
            };
            if accepted {
                outcome.current_ce = candidate_ce;
                outcome.pairs = candidate.alignment.into_pairs();
                outcome.seeds = seeds;
                outcome.rounds = candidate.rounds;
                outcome.best_ce = outcome.best_ce.max(candidate_ce);
            }
            info!(
                "iteration {iteration}: CE {candidate_ce} ({}), current {}, T {temperature:.4}",
                if accepted { "accepted" } else { "rejected" },
                outcome.current_ce
            );
            outcome.steps.push(AnnealStep {
                iteration,
                temperature,
                candidate_ce,
                current_ce: outcome.current_ce,
                best_ce: outcome.best_ce,
                accepted,
            });
        }
        Ok(outcome)
    }

    /// Swaps up to `swap_size` seed nodes per side for non-seed nodes.
    fn perturb<R: Rng + ?Sized>(&self, seeds: &[Pair], mapping: &[Pair], rng: &mut R) -> SeedSet {
        let (side1, side2) = (&self.ctx.side1, &self.ctx.side2);
        let mut forward = vec![None; side1.graph.node_count()];
        let mut backward = vec![None; side2.graph.node_count()];
        for p in mapping {
            forward[p.node1.as_usize()] = Some(p.node2);
            backward[p.node2.as_usize()] = Some(p.node1);
        }
        let current = SeedSet::from_pairs(seeds);
        debug!("perturbing first seed set");
        let nodes1 = self.swap_side(side1, side2.graph, &current.nodes1, &forward, rng);
        debug!("perturbing second seed set");
        let nodes2 = self.swap_side(side2, side1.graph, &current.nodes2, &backward, rng);
        SeedSet { nodes1, nodes2 }
    }

    /// Returns the surviving seeds followed by the added nodes.
    fn swap_side<R: Rng + ?Sized>(
        &self,
        side: &GraphSide<'_>,
        other: &Graph,
        seeds: &[NodeIdx],
        mapping: &[Option<NodeIdx>],
        rng: &mut R,
    ) -> Vec<NodeIdx> {
        let graph = side.graph;
        let weights = side.centrality.weights(self.ctx.config.weight_centrality);
        let mut is_seed = vec![false; graph.node_count()];
        for v in seeds {
            is_seed[v.as_usize()] = true;
        }
        let mut pool: Vec<NodeIdx> = graph.nodes().filter(|v| !is_seed[v.as_usize()]).collect();
        let mut kept = seeds.to_vec();
        let mut added = Vec::new();
        for _ in 0..self.ctx.config.swap_size {
            if pool.is_empty() || kept.is_empty() {
                break;
            }
            let add = pool.remove(sample_index(&pool, &weights, rng));
            let drop = kept.remove(sample_index(&kept, &weights, rng));
            for (role, v) in [("add", add), ("remove", drop)] {
                debug!(
                    "{role} {v}: local CE {}, centrality {:.4}, degree {}",
                    local_conserved(graph, other, mapping, v),
                    weights[v.as_usize()],
                    graph.degree(v)
                );
            }
            added.push(add);
        }
        kept.extend(added);
        kept
    }
}

/// Index into `nodes` drawn proportionally to the nodes' weights, or
/// uniformly when every weight is zero.
fn sample_index<R: Rng + ?Sized>(nodes: &[NodeIdx], weights: &[f64], rng: &mut R) -> usize {
    match WeightedIndex::new(nodes.iter().map(|v| weights[v.as_usize()])) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.random_range(0..nodes.len()),
    }
}

/// Conserved edges incident to `v` under `mapping`.
fn local_conserved(graph: &Graph, other: &Graph, mapping: &[Option<NodeIdx>], v: NodeIdx) -> usize {
    let Some(image) = mapping[v.as_usize()] else {
        return 0;
    };
    graph
        .neighbors(v)
        .iter()
        .filter_map(|u| mapping[u.as_usize()])
        .filter(|&w| other.adjacent(image, w))
        .count()
}
