use std::path::PathBuf;

use clap::Parser;
use netalign_common::*;

/// Seed-and-extend global aligner for protein interaction networks
#[derive(Parser, Debug)]
#[command(name = "netalign")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Edge list of the first network (two node names per line)
    #[arg(long)]
    pub graph1: PathBuf,
    /// Edge list of the second network
    #[arg(long)]
    pub graph2: PathBuf,
    /// Similarity triples (name1, name2, score); missing pairs score zero
    #[arg(short = 's', long)]
    pub similarity: PathBuf,
    /// Topology-free similarity triples for seed pairing and NBS
    #[arg(long)]
    pub seed_similarity: Option<PathBuf>,
    /// Directory receiving the alignment, its conserved edges and the report
    #[arg(short = 'o', long, default_value = "alignment")]
    pub output: PathBuf,

    /// Alignment procedure
    #[arg(long, value_enum, default_value = "seed-extend")]
    pub strategy: StrategyArg,
    /// Seed node ranking
    #[arg(long, value_enum, default_value = "degree")]
    pub seed_ranking: SeedRankingArg,
    /// Node order for ranking, frontier selection and padding
    #[arg(long, value_enum, default_value = "degree")]
    pub node_order: NodeOrderArg,
    /// Extension strategy
    #[arg(long, value_enum, default_value = "batched")]
    pub extend: ExtendArg,
    /// Candidate scoring for best-first extension
    #[arg(long, value_enum, default_value = "common-neighbor")]
    pub scoring: PairScoringArg,
    /// Assignment solver
    #[arg(long, value_enum, default_value = "exact")]
    pub matching: MatchingArg,
    /// Centrality weighting annealing swaps and seed blending
    #[arg(long, value_enum, default_value = "betweenness")]
    pub weight_centrality: CentralityArg,

    #[arg(long, default_value_t = 1400)]
    pub max_seed_size: usize,
    #[arg(long, default_value_t = 0.3)]
    pub seed_keep_ratio: f64,
    #[arg(long, default_value_t = 3000)]
    pub max_extend_size: usize,
    #[arg(long, default_value_t = 0.01)]
    pub extend_keep_ratio: f64,
    /// Weight of topological support against similarity in batched rounds
    #[arg(long, default_value_t = 0.9)]
    pub topo_strength: f64,
    #[arg(long, default_value_t = 0.0001)]
    pub bad_edge_cost: f64,
    #[arg(long, default_value_t = 10.0)]
    pub t_high: f64,
    #[arg(long, default_value_t = 9.9)]
    pub t_low: f64,
    #[arg(long, default_value_t = 0.99)]
    pub cooling: f64,
    #[arg(long, default_value_t = 2)]
    pub swap_size: usize,
    #[arg(long)]
    pub max_anneal_iterations: Option<usize>,
    #[arg(long, default_value_t = 0.85)]
    pub pagerank_alpha: f64,
    #[arg(long, default_value_t = 20)]
    pub max_power_iterations: usize,
    /// Cap on eigen-solver sweeps for the Fiedler vector
    #[arg(long)]
    pub max_eigen_iterations: Option<usize>,
    /// Minimum similarity for threshold seeding
    #[arg(long, default_value_t = 150.0)]
    pub similarity_cut: f64,
    #[arg(long, default_value_t = 0.0)]
    pub neighbor_strength: f64,
    /// Amplitude of uniform noise added to assignment scores
    #[arg(long, default_value_t = 0.0)]
    pub matching_noise: f64,
    /// Seed blend weights: similarity,centrality-gap,degree-gap
    #[arg(long, value_parser = parse_seed_blend, allow_hyphen_values = true)]
    pub seed_blend: Option<SeedBlend>,
    /// Random seed; drawn from the OS when omitted
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        let extend = match self.extend {
            ExtendArg::Batched => ExtendStrategy::Batched {
                penalize_bad_edges: false,
            },
            ExtendArg::BatchedPenalized => ExtendStrategy::Batched {
                penalize_bad_edges: true,
            },
            ExtendArg::BestFirst => ExtendStrategy::SingleBestFirst(self.scoring.into()),
        };
        Config::builder()
            .strategy(self.strategy.into())
            .seed_ranking(self.seed_ranking.into())
            .node_order(self.node_order.into())
            .extend(extend)
            .matching(self.matching.into())
            .weight_centrality(self.weight_centrality.into())
            .max_seed_size(self.max_seed_size)
            .seed_keep_ratio(self.seed_keep_ratio)
            .max_extend_size(self.max_extend_size)
            .extend_keep_ratio(self.extend_keep_ratio)
            .topo_strength(self.topo_strength)
            .bad_edge_cost(self.bad_edge_cost)
            .t_high(self.t_high)
            .t_low(self.t_low)
            .cooling(self.cooling)
            .swap_size(self.swap_size)
            .max_anneal_iterations(self.max_anneal_iterations)
            .seed_pagerank_alpha(self.pagerank_alpha)
            .max_power_iterations(self.max_power_iterations)
            .max_eigen_iterations(self.max_eigen_iterations)
            .similarity_cut(self.similarity_cut)
            .neighbor_strength(self.neighbor_strength)
            .matching_noise(self.matching_noise)
            .seed_blend(self.seed_blend)
            .rng_seed(self.rng_seed)
            .build()
    }
}

/// Command-line argument wrapper for Strategy
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Seed selection plus one extension pass
    #[value(name = "seed-extend")]
    SeedExtend,
    /// Simulated annealing over seed sets
    #[value(name = "anneal")]
    Annealing,
    /// Greedy assignment over the whole similarity table
    #[value(name = "greedy")]
    Greedy,
    /// Exact assignment over the whole similarity table
    #[value(name = "max-weight")]
    MaxWeight,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SeedExtend => Strategy::SeedExtend,
            StrategyArg::Annealing => Strategy::Annealing,
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::MaxWeight => Strategy::MaxWeight,
        }
    }
}

/// Command-line argument wrapper for CentralityMeasure
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CentralityArg {
    #[value(name = "betweenness")]
    Betweenness,
    #[value(name = "closeness")]
    Closeness,
    #[value(name = "current-flow-betweenness")]
    CurrentFlowBetweenness,
    #[value(name = "current-flow-closeness")]
    CurrentFlowCloseness,
    #[value(name = "fiedler")]
    Fiedler,
}

impl From<CentralityArg> for CentralityMeasure {
    fn from(arg: CentralityArg) -> Self {
        match arg {
            CentralityArg::Betweenness => CentralityMeasure::Betweenness,
            CentralityArg::Closeness => CentralityMeasure::Closeness,
            CentralityArg::CurrentFlowBetweenness => CentralityMeasure::CurrentFlowBetweenness,
            CentralityArg::CurrentFlowCloseness => CentralityMeasure::CurrentFlowCloseness,
            CentralityArg::Fiedler => CentralityMeasure::Fiedler,
        }
    }
}

/// Command-line argument wrapper for SeedRanking
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SeedRankingArg {
    /// Node order
    #[value(name = "degree")]
    Degree,
    #[value(name = "betweenness")]
    Betweenness,
    #[value(name = "closeness")]
    Closeness,
    #[value(name = "current-flow-betweenness")]
    CurrentFlowBetweenness,
    #[value(name = "current-flow-closeness")]
    CurrentFlowCloseness,
    #[value(name = "fiedler")]
    Fiedler,
    /// PageRank restarting at the top-ranked node
    #[value(name = "pagerank-degree")]
    PageRankDegree,
    /// PageRank restarting at the most similar pair
    #[value(name = "pagerank-similarity")]
    PageRankSimilarity,
    /// Pairs above --similarity-cut, most similar first
    #[value(name = "threshold")]
    SimilarityThreshold,
}

impl From<SeedRankingArg> for SeedRanking {
    fn from(arg: SeedRankingArg) -> Self {
        let centrality = SeedRanking::Centrality;
        match arg {
            SeedRankingArg::Degree => SeedRanking::Degree,
            SeedRankingArg::Betweenness => centrality(CentralityMeasure::Betweenness),
            SeedRankingArg::Closeness => centrality(CentralityMeasure::Closeness),
            SeedRankingArg::CurrentFlowBetweenness => {
                centrality(CentralityMeasure::CurrentFlowBetweenness)
            }
            SeedRankingArg::CurrentFlowCloseness => {
                centrality(CentralityMeasure::CurrentFlowCloseness)
            }
            SeedRankingArg::Fiedler => centrality(CentralityMeasure::Fiedler),
            SeedRankingArg::PageRankDegree => SeedRanking::PageRankDegree,
            SeedRankingArg::PageRankSimilarity => SeedRanking::PageRankSimilarity,
            SeedRankingArg::SimilarityThreshold => SeedRanking::SimilarityThreshold,
        }
    }
}

/// Command-line argument wrapper for NodeOrder
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum NodeOrderArg {
    #[value(name = "degree")]
    Degree,
    #[value(name = "neighbor-degree")]
    NeighborDegree,
}

impl From<NodeOrderArg> for NodeOrder {
    fn from(arg: NodeOrderArg) -> Self {
        match arg {
            NodeOrderArg::Degree => NodeOrder::Degree,
            NodeOrderArg::NeighborDegree => NodeOrder::NeighborDegree,
        }
    }
}

/// Extension strategy selector; best-first takes its scoring from --scoring
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExtendArg {
    #[value(name = "batched")]
    Batched,
    #[value(name = "batched-penalized")]
    BatchedPenalized,
    #[value(name = "best-first")]
    BestFirst,
}

/// Command-line argument wrapper for PairScoring
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PairScoringArg {
    #[value(name = "common-neighbor")]
    CommonNeighbor,
    #[value(name = "jaccard")]
    Jaccard,
    #[value(name = "jaccard-gap")]
    JaccardDegreeGap,
    #[value(name = "jaccard-product")]
    JaccardProduct,
    #[value(name = "adamic")]
    Adamic,
    #[value(name = "adamic-gap")]
    AdamicDegreeGap,
    #[value(name = "adamic-product")]
    AdamicProduct,
}

impl From<PairScoringArg> for PairScoring {
    fn from(arg: PairScoringArg) -> Self {
        match arg {
            PairScoringArg::CommonNeighbor => PairScoring::CommonNeighbor,
            PairScoringArg::Jaccard => PairScoring::Jaccard,
            PairScoringArg::JaccardDegreeGap => PairScoring::JaccardDegreeGap,
            PairScoringArg::JaccardProduct => PairScoring::JaccardProduct,
            PairScoringArg::Adamic => PairScoring::Adamic,
            PairScoringArg::AdamicDegreeGap => PairScoring::AdamicDegreeGap,
            PairScoringArg::AdamicProduct => PairScoring::AdamicProduct,
        }
    }
}

/// Command-line argument wrapper for MatchingAlgorithm
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MatchingArg {
    #[value(name = "exact")]
    Exact,
    #[value(name = "greedy")]
    Greedy,
}

impl From<MatchingArg> for MatchingAlgorithm {
    fn from(arg: MatchingArg) -> Self {
        match arg {
            MatchingArg::Exact => MatchingAlgorithm::Exact,
            MatchingArg::Greedy => MatchingAlgorithm::Greedy,
        }
    }
}

/// Parses exactly three comma-separated blend weights.
fn parse_seed_blend(raw: &str) -> Result<SeedBlend, String> {
    let weights = raw
        .split(',')
        .map(|w| w.trim().parse::<f64>().map_err(|e| format!("{w:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match *weights {
        [similarity, centrality_gap, degree_gap] => Ok(SeedBlend {
            similarity,
            centrality_gap,
            degree_gap,
        }),
        _ => Err(format!(
            "expected 3 weights (similarity,centrality-gap,degree-gap), got {}",
            weights.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let args = Args::parse_from(["netalign", "--graph1", "a", "--graph2", "b", "-s", "c"]);
        assert_eq!(args.to_config(), Config::default());
    }

    #[test]
    fn test_best_first_and_blend() {
        let args = Args::parse_from([
            "netalign",
            "--graph1",
            "a",
            "--graph2",
            "b",
            "-s",
            "c",
            "--extend",
            "best-first",
            "--scoring",
            "adamic-product",
            "--seed-blend",
            "0.5,-0.25,-0.25",
            "--seed-ranking",
            "fiedler",
        ]);
        let config = args.to_config();
        assert_eq!(
            config.extend,
            ExtendStrategy::SingleBestFirst(PairScoring::AdamicProduct)
        );
        assert_eq!(
            config.seed_blend,
            Some(SeedBlend {
                similarity: 0.5,
                centrality_gap: -0.25,
                degree_gap: -0.25,
            })
        );
        assert_eq!(
            config.seed_ranking,
            SeedRanking::Centrality(CentralityMeasure::Fiedler)
        );
    }

    #[test]
    fn test_seed_blend_needs_three_weights() {
        let base = ["netalign", "--graph1", "a", "--graph2", "b", "-s", "c"];
        for bad in ["1,2", "1,2,3,4", "1,x,3"] {
            let argv = base.iter().copied().chain(["--seed-blend", bad]);
            assert!(Args::try_parse_from(argv).is_err(), "{bad} was accepted");
        }
        let argv = base.iter().copied().chain(["--seed-blend", "-1,0,2"]);
        let config = Args::try_parse_from(argv).unwrap().to_config();
        assert_eq!(
            config.seed_blend,
            Some(SeedBlend {
                similarity: -1.0,
                centrality_gap: 0.0,
                degree_gap: 2.0,
            })
        );
    }

    #[test]
    fn test_eigen_cap_reaches_config() {
        let args = Args::parse_from([
            "netalign",
            "--graph1",
            "a",
            "--graph2",
            "b",
            "-s",
            "c",
            "--max-eigen-iterations",
            "50",
        ]);
        assert_eq!(args.to_config().max_eigen_iterations, Some(50));
    }
}
