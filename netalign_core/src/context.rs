//! Per-run inputs shared by every component.

use netalign_common::{AlignResult, Config, Graph, NodeIdx, SimilarityMatrix};
use tracing::debug;

use crate::centrality::CentralityCache;
use crate::matcher::BipartiteMatcher;
use crate::order;

/// One organism's graph with its precomputed orderings.
#[derive(Debug)]
pub struct GraphSide<'a> {
    /// The graph itself.
    pub graph: &'a Graph,
    /// All nodes, best first under the configured node order.
    pub order: Vec<NodeIdx>,
    /// First node of each component along `order`.
    pub representatives: Vec<NodeIdx>,
    /// Centrality scores, computed on first use.
    pub centrality: CentralityCache<'a>,
}

impl<'a> GraphSide<'a> {
    fn new(graph: &'a Graph, config: &Config) -> Self {
        let order = order::node_order(graph, config.node_order, config.neighbor_strength);
        let representatives = order::component_representatives(graph, &order);
        Self {
            graph,
            order,
            representatives,
            centrality: CentralityCache::new(graph, config.max_eigen_iterations),
        }
    }
}

/// Immutable view over everything one alignment run reads.
#[derive(Debug)]
pub struct AlignContext<'a> {
    /// Run configuration.
    pub config: &'a Config,
    /// First organism.
    pub side1: GraphSide<'a>,
    /// Second organism.
    pub side2: GraphSide<'a>,
    /// Similarity used for pair scores and extension.
    pub similarity: &'a SimilarityMatrix,
    /// Topology-independent similarity used for seed ranking and pairing.
    pub seed_similarity: &'a SimilarityMatrix,
    /// Assignment solver.
    pub matcher: BipartiteMatcher,
}

impl<'a> AlignContext<'a> {
    /// Validates the inputs and precomputes node orders.
    ///
    /// `seed_similarity` defaults to `similarity`.
    ///
    /// # Errors
    /// Fails on an invalid configuration or a similarity table whose shape
    /// does not match the two graphs.
    pub fn new(
        config: &'a Config,
        g1: &'a Graph,
        g2: &'a Graph,
        similarity: &'a SimilarityMatrix,
        seed_similarity: Option<&'a SimilarityMatrix>,
    ) -> AlignResult<Self> {
        config.validate()?;
        similarity.check_shape(g1.node_count(), g2.node_count())?;
        let seed_similarity = seed_similarity.unwrap_or(similarity);
        seed_similarity.check_shape(g1.node_count(), g2.node_count())?;

        let side1 = GraphSide::new(g1, config);
        let side2 = GraphSide::new(g2, config);
        debug!(
            "context ready: {} and {} component representatives",
            side1.representatives.len(),
            side2.representatives.len()
        );
        Ok(Self {
            config,
            side1,
            side2,
            similarity,
            seed_similarity,
            matcher: BipartiteMatcher::from_config(config),
        })
    }
}
