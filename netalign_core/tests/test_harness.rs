#![allow(dead_code)]

use std::sync::Once;

use netalign_common::{Config, ConfigBuilder, Graph, SimilarityMatrix};
use netalign_core::{Aligner, AlignmentReport, verify};

static INIT: Once = Once::new();

pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct AlignSpec {
    pub nodes1: usize,
    pub edges1: &'static [(usize, usize)],
    pub nodes2: usize,
    pub edges2: &'static [(usize, usize)],
    /// Sparse similarity entries; everything else scores zero.
    pub similarity: &'static [(usize, usize, f64)],
    pub expected_ce: usize,
    /// Exact expected mapping as `(node1, node2)`, if the scenario pins one.
    pub expected_pairs: Option<&'static [(usize, usize)]>,
    /// Optional configuration builder to override defaults
    pub config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>,
}

impl Default for AlignSpec {
    fn default() -> Self {
        Self {
            nodes1: 0,
            edges1: &[],
            nodes2: 0,
            edges2: &[],
            similarity: &[],
            expected_ce: 0,
            expected_pairs: None,
            config_fn: None,
        }
    }
}

/// Path on four nodes, shared by several scenarios.
pub const PATH4: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 3)];

pub const IDENTITY4: &[(usize, usize, f64)] = &[(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0), (3, 3, 1.0)];

#[track_caller]
pub fn run_align_test(spec: AlignSpec) -> Result<AlignmentReport, Box<dyn std::error::Error>> {
    setup_test_logging();

    let g1 = Graph::from_edges(spec.nodes1, spec.edges1.iter().copied())?;
    let g2 = Graph::from_edges(spec.nodes2, spec.edges2.iter().copied())?;
    let sim = SimilarityMatrix::from_entries(spec.nodes1, spec.nodes2, spec.similarity.iter().copied())?;

    let mut config_builder = Config::builder().rng_seed(Some(7));
    if let Some(f) = spec.config_fn {
        config_builder = f(config_builder);
    }
    let config = config_builder.build();

    let report = Aligner::new(&config, &g1, &g2, &sim, None)?.run()?;

    if report.metrics.conserved_edges != spec.expected_ce {
        tracing::error!(
            "Test Failed: expected {} conserved edges, found {}.\nPairs: {:?}\nRounds: {:?}",
            spec.expected_ce,
            report.metrics.conserved_edges,
            report.pairs,
            report.rounds
        );
    }
    assert_eq!(report.metrics.conserved_edges, spec.expected_ce, "conserved edge mismatch");
    assert_eq!(report.pair_edges.len(), spec.expected_ce);
    assert_eq!(verify(&report.pairs), report.pairs, "report pairs are not one-to-one");

    if let Some(expected) = spec.expected_pairs {
        let mut got: Vec<(usize, usize)> = report
            .pairs
            .iter()
            .map(|p| (p.node1.as_usize(), p.node2.as_usize()))
            .collect();
        got.sort_unstable();
        assert_eq!(got, expected, "alignment mismatch");
    }
    Ok(report)
}

#[macro_export]
macro_rules! align_test {
    (name: $test_name:ident, spec: $spec:expr) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_align_test($spec)?;
            Ok(())
        }
    };
}
