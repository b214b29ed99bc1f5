//! Run configuration.
//!
//! A [`Config`] is fixed at run start and passed by reference into every
//! component. Strategy selection is expressed with closed enums, one per axis.

use crate::{AlignError, AlignResult};

/// Top-level alignment procedure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Seed selection followed by one extension pass.
    #[default]
    SeedExtend,
    /// Seed-and-extend wrapped in simulated annealing over the seed set.
    Annealing,
    /// Global greedy assignment over the full similarity table.
    Greedy,
    /// Exact maximum-weight assignment over the full similarity table.
    MaxWeight,
}

/// Centrality measure used to rank nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CentralityMeasure {
    /// Shortest-path betweenness.
    Betweenness,
    /// Closeness over reachable nodes.
    Closeness,
    /// Current-flow (random-walk) betweenness, largest component only.
    CurrentFlowBetweenness,
    /// Current-flow (information) closeness, largest component only.
    CurrentFlowCloseness,
    /// Fiedler vector of the Laplacian, largest component only, ascending.
    Fiedler,
}

/// How seed nodes are ranked on each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedRanking {
    /// Node order (see [`NodeOrder`]), highest first.
    #[default]
    Degree,
    /// A centrality measure, best first.
    Centrality(CentralityMeasure),
    /// Personalized PageRank restarting at the highest-degree node.
    PageRankDegree,
    /// Personalized PageRank restarting at the most similar pair's endpoints.
    PageRankSimilarity,
    /// Greedy sweep over pairs scoring at least `similarity_cut`.
    SimilarityThreshold,
}

/// Node ordering used for seed ranking, frontier selection and padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeOrder {
    /// Plain degree.
    #[default]
    Degree,
    /// Degree plus `neighbor_strength` times the summed neighbor degree.
    NeighborDegree,
}

/// Candidate scoring used by single best-first extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PairScoring {
    /// One point per committed neighbor pair.
    #[default]
    CommonNeighbor,
    /// Inverse of the candidate's degree sum.
    Jaccard,
    /// Inverse of one plus the candidate's degree gap.
    JaccardDegreeGap,
    /// Product of the two Jaccard variants.
    JaccardProduct,
    /// Inverse log of the committed pair's degree sum.
    Adamic,
    /// Inverse of one plus the log of the committed pair's degree gap.
    AdamicDegreeGap,
    /// Product of the two Adamic variants.
    AdamicProduct,
}

/// Extension strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtendStrategy {
    /// Rounds of bounded bipartite assignment.
    Batched {
        /// Charge `bad_edge_cost` for inconsistently aligned neighbors.
        penalize_bad_edges: bool,
    },
    /// One pair at a time from an indexed priority queue.
    SingleBestFirst(PairScoring),
}

impl Default for ExtendStrategy {
    fn default() -> Self {
        Self::Batched {
            penalize_bad_edges: false,
        }
    }
}

/// Assignment solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchingAlgorithm {
    /// Globally optimal assignment.
    #[default]
    Exact,
    /// Descending-score sweep.
    Greedy,
}

/// Weights for blending similarity with topological gaps when pairing seeds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedBlend {
    /// Weight of the row-normalized similarity.
    pub similarity: f64,
    /// Weight of the centrality agreement term.
    pub centrality_gap: f64,
    /// Weight of the degree agreement term.
    pub degree_gap: f64,
}

/// Immutable alignment configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Top-level procedure.
    pub strategy: Strategy,
    /// Seed ranking source.
    pub seed_ranking: SeedRanking,
    /// Node ordering for degree-based choices.
    pub node_order: NodeOrder,
    /// Extension strategy.
    pub extend: ExtendStrategy,
    /// Assignment solver for seeds and batched rounds.
    pub matching: MatchingAlgorithm,
    /// Cap on seed nodes per side.
    pub max_seed_size: usize,
    /// Fraction of seed pairs kept after pairing.
    pub seed_keep_ratio: f64,
    /// Cap on candidate nodes per side in a batched round.
    pub max_extend_size: usize,
    /// Fraction of a batched round's pairs kept.
    pub extend_keep_ratio: f64,
    /// Weight of topology against similarity in batched rounds.
    pub topo_strength: f64,
    /// Penalty per inconsistently aligned neighbor.
    pub bad_edge_cost: f64,
    /// Annealing start temperature.
    pub t_high: f64,
    /// Annealing stop temperature.
    pub t_low: f64,
    /// Multiplicative temperature decay per iteration.
    pub cooling: f64,
    /// Seed nodes swapped per side on each perturbation.
    pub swap_size: usize,
    /// Optional hard cap on annealing iterations.
    pub max_anneal_iterations: Option<usize>,
    /// Centrality used for swap sampling and seed blending.
    pub weight_centrality: CentralityMeasure,
    /// PageRank damping for seed ranking.
    pub seed_pagerank_alpha: f64,
    /// Power iteration cap for seed PageRank.
    pub max_power_iterations: usize,
    /// QR sweep cap for the Fiedler eigen-solve; `None` runs to convergence.
    pub max_eigen_iterations: Option<usize>,
    /// Minimum similarity for the threshold sweep.
    pub similarity_cut: f64,
    /// Neighbor-degree weight for [`NodeOrder::NeighborDegree`].
    pub neighbor_strength: f64,
    /// Amplitude of the random perturbation added before exact matching.
    pub matching_noise: f64,
    /// Optional seed score blend.
    pub seed_blend: Option<SeedBlend>,
    /// Seed for every random choice; `None` draws from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            seed_ranking: SeedRanking::default(),
            node_order: NodeOrder::default(),
            extend: ExtendStrategy::default(),
            matching: MatchingAlgorithm::default(),
            max_seed_size: 1400,
            seed_keep_ratio: 0.3,
            max_extend_size: 3000,
            extend_keep_ratio: 0.01,
            topo_strength: 0.9,
            bad_edge_cost: 0.0001,
            t_high: 10.0,
            t_low: 9.9,
            cooling: 0.99,
            swap_size: 2,
            max_anneal_iterations: None,
            weight_centrality: CentralityMeasure::Betweenness,
            seed_pagerank_alpha: 0.85,
            max_power_iterations: 20,
            max_eigen_iterations: None,
            similarity_cut: 150.0,
            neighbor_strength: 0.0,
            matching_noise: 0.0,
            seed_blend: None,
            rng_seed: None,
        }
    }
}

impl Config {
    /// Starts a builder from the default configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Checks ratios, caps and the temperature schedule.
    ///
    /// # Errors
    /// Returns [`AlignError::InvalidConfig`] naming the first offending knob.
    pub fn validate(&self) -> AlignResult<()> {
        for (name, value) in [
            ("seed_keep_ratio", self.seed_keep_ratio),
            ("extend_keep_ratio", self.extend_keep_ratio),
            ("topo_strength", self.topo_strength),
            ("seed_pagerank_alpha", self.seed_pagerank_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AlignError::invalid_config(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        if self.max_seed_size == 0 {
            return Err(AlignError::invalid_config("max_seed_size must be positive"));
        }
        if self.max_eigen_iterations == Some(0) {
            return Err(AlignError::invalid_config(
                "max_eigen_iterations must be positive when set",
            ));
        }
        if self.max_extend_size == 0 {
            return Err(AlignError::invalid_config("max_extend_size must be positive"));
        }
        if !(self.t_high.is_finite() && self.t_low.is_finite()) || self.t_low <= 0.0 {
            return Err(AlignError::invalid_config(
                "temperatures must be finite and positive",
            ));
        }
        if self.t_low > self.t_high {
            return Err(AlignError::invalid_config(format!(
                "t_low ({}) exceeds t_high ({})",
                self.t_low, self.t_high
            )));
        }
        if !(self.cooling > 0.0 && self.cooling < 1.0) {
            return Err(AlignError::invalid_config(format!(
                "cooling must lie in (0, 1), got {}",
                self.cooling
            )));
        }
        for (name, value) in [
            ("bad_edge_cost", self.bad_edge_cost),
            ("neighbor_strength", self.neighbor_strength),
            ("matching_noise", self.matching_noise),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AlignError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.similarity_cut.is_finite() {
            return Err(AlignError::invalid_config("similarity_cut must be finite"));
        }
        if let Some(blend) = self.seed_blend {
            let weights = [blend.similarity, blend.centrality_gap, blend.degree_gap];
            if weights.iter().any(|w| !w.is_finite()) {
                return Err(AlignError::invalid_config("seed_blend weights must be finite"));
            }
        }
        Ok(())
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

macro_rules! builder_setters {
    ($($(#[$doc:meta])* $name:ident: $ty:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, value: $ty) -> Self {
                self.config.$name = value;
                self
            }
        )*
    };
}

impl ConfigBuilder {
    builder_setters! {
        /// Sets the top-level procedure.
        strategy: Strategy,
        /// Sets the seed ranking source.
        seed_ranking: SeedRanking,
        /// Sets the node ordering.
        node_order: NodeOrder,
        /// Sets the extension strategy.
        extend: ExtendStrategy,
        /// Sets the assignment solver.
        matching: MatchingAlgorithm,
        /// Sets the seed cap per side.
        max_seed_size: usize,
        /// Sets the kept fraction of seed pairs.
        seed_keep_ratio: f64,
        /// Sets the candidate cap per batched round.
        max_extend_size: usize,
        /// Sets the kept fraction of each batched round.
        extend_keep_ratio: f64,
        /// Sets the topology weight.
        topo_strength: f64,
        /// Sets the bad-edge penalty.
        bad_edge_cost: f64,
        /// Sets the annealing start temperature.
        t_high: f64,
        /// Sets the annealing stop temperature.
        t_low: f64,
        /// Sets the temperature decay.
        cooling: f64,
        /// Sets the swap count per perturbation.
        swap_size: usize,
        /// Sets the annealing iteration cap.
        max_anneal_iterations: Option<usize>,
        /// Sets the centrality used for swap sampling and seed blending.
        weight_centrality: CentralityMeasure,
        /// Sets the seed PageRank damping.
        seed_pagerank_alpha: f64,
        /// Sets the PageRank iteration cap.
        max_power_iterations: usize,
        /// Sets the Fiedler eigen-solver cap.
        max_eigen_iterations: Option<usize>,
        /// Sets the threshold sweep cut.
        similarity_cut: f64,
        /// Sets the neighbor-degree weight.
        neighbor_strength: f64,
        /// Sets the matching noise amplitude.
        matching_noise: f64,
        /// Sets the seed score blend.
        seed_blend: Option<SeedBlend>,
        /// Sets the random seed.
        rng_seed: Option<u64>,
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
