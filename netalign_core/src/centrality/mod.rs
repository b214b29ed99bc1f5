//! Node centrality measures and their per-graph cache.
//!
//! Every measure is a pure function of the graph, so each is computed at most
//! once per [`CentralityCache`]. Current-flow measures and the Fiedler vector
//! are only defined on a connected graph; they are evaluated on the largest
//! connected component and every other node is left unranked (`None`).

mod current_flow;
mod linalg;
pub mod pagerank;
mod shortest_path;
mod spectral;

use std::cell::OnceCell;

use netalign_common::{CentralityMeasure, Graph, NodeIdx};
use tracing::{info, warn};

/// Lazily computed centrality scores of one graph.
#[derive(Debug)]
pub struct CentralityCache<'g> {
    graph: &'g Graph,
    /// QR sweep cap for the Fiedler eigen-solve.
    eigen_iterations: Option<usize>,
    betweenness: OnceCell<Vec<Option<f64>>>,
    closeness: OnceCell<Vec<Option<f64>>>,
    current_flow_betweenness: OnceCell<Vec<Option<f64>>>,
    current_flow_closeness: OnceCell<Vec<Option<f64>>>,
    fiedler: OnceCell<Vec<Option<f64>>>,
}

impl<'g> CentralityCache<'g> {
    /// Creates an empty cache for `graph`.
    ///
    /// `eigen_iterations` caps the eigen-solver behind the Fiedler measure.
    #[must_use]
    pub const fn new(graph: &'g Graph, eigen_iterations: Option<usize>) -> Self {
        Self {
            graph,
            eigen_iterations,
            betweenness: OnceCell::new(),
            closeness: OnceCell::new(),
            current_flow_betweenness: OnceCell::new(),
            current_flow_closeness: OnceCell::new(),
            fiedler: OnceCell::new(),
        }
    }

    /// The graph this cache belongs to.
    #[must_use]
    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Score of every node under `measure`; `None` marks unranked nodes.
    pub fn scores(&self, measure: CentralityMeasure) -> &[Option<f64>] {
        let graph = self.graph;
        let eigen_iterations = self.eigen_iterations;
        match measure {
            CentralityMeasure::Betweenness => self.betweenness.get_or_init(|| {
                info!("computing betweenness over {} nodes", graph.node_count());
                shortest_path::betweenness(graph).into_iter().map(Some).collect()
            }),
            CentralityMeasure::Closeness => self.closeness.get_or_init(|| {
                info!("computing closeness over {} nodes", graph.node_count());
                shortest_path::closeness(graph).into_iter().map(Some).collect()
            }),
            CentralityMeasure::CurrentFlowBetweenness => {
                self.current_flow_betweenness.get_or_init(|| {
                    on_largest_component(graph, measure, current_flow::betweenness)
                })
            }
            CentralityMeasure::CurrentFlowCloseness => self
                .current_flow_closeness
                .get_or_init(|| on_largest_component(graph, measure, current_flow::closeness)),
            CentralityMeasure::Fiedler => self.fiedler.get_or_init(|| {
                on_largest_component(graph, measure, |g, nodes| {
                    spectral::fiedler_vector(g, nodes, eigen_iterations)
                })
            }),
        }
    }

    /// Nodes ranked best first under `measure`.
    ///
    /// Higher scores rank first, except for the Fiedler vector, which ranks
    /// ascending. Ties and unranked nodes follow `fallback`, a best-first
    /// node order covering the whole graph.
    pub fn ranking(&self, measure: CentralityMeasure, fallback: &[NodeIdx]) -> Vec<NodeIdx> {
        let scores = self.scores(measure);
        let ascending = measure == CentralityMeasure::Fiedler;
        let (mut ranked, unranked): (Vec<NodeIdx>, Vec<NodeIdx>) =
            fallback.iter().copied().partition(|v| scores[v.as_usize()].is_some());
        ranked.sort_by(|a, b| {
            let (x, y) = (
                scores[a.as_usize()].unwrap_or(0.0),
                scores[b.as_usize()].unwrap_or(0.0),
            );
            if ascending { x.total_cmp(&y) } else { y.total_cmp(&x) }
        });
        ranked.extend(unranked);
        ranked
    }

    /// Non-negative sampling weight of every node under `measure`.
    ///
    /// Unranked nodes weigh zero; signed measures use their magnitude.
    pub fn weights(&self, measure: CentralityMeasure) -> Vec<f64> {
        self.scores(measure)
            .iter()
            .map(|s| s.map_or(0.0, f64::abs))
            .collect()
    }
}

fn on_largest_component(
    graph: &Graph,
    measure: CentralityMeasure,
    compute: impl FnOnce(&Graph, &[NodeIdx]) -> Option<Vec<f64>>,
) -> Vec<Option<f64>> {
    let nodes = graph.largest_component();
    info!(
        "computing {:?} over largest component ({} of {} nodes)",
        measure,
        nodes.len(),
        graph.node_count()
    );
    let mut scores = vec![None; graph.node_count()];
    match compute(graph, &nodes) {
        Some(values) => {
            for (v, value) in nodes.iter().zip(values) {
                scores[v.as_usize()] = Some(value);
            }
        }
        None => warn!("{:?} could not be computed, leaving all nodes unranked", measure),
    }
    scores
}
