//! Seed-and-extend global alignment of protein interaction networks.
//!
//! A run picks high-confidence seed pairs, pairs them with an assignment
//! solver, grows the mapping outward through the neighborhoods of aligned
//! nodes, optionally anneals over seed perturbations, and finally verifies
//! and scores the mapping. [`Aligner`] drives the whole pipeline; the stages
//! are exposed for callers that need them separately.

pub mod aligner;
pub mod alignment;
pub mod anneal;
pub mod centrality;
pub mod context;
pub mod extend;
pub mod matcher;
pub mod metrics;
pub mod order;
pub mod seed;
pub mod utils;
pub mod verify;

pub use aligner::{Aligner, AlignmentReport};
pub use alignment::Alignment;
pub use anneal::{AnnealOutcome, AnnealStep, AnnealingController};
pub use context::AlignContext;
pub use extend::{Extension, ExtensionEngine, RoundStats};
pub use matcher::{BipartiteMatcher, DenseMatrix};
pub use metrics::Metrics;
pub use seed::{SeedOutcome, SeedSelector, SeedSet};
pub use verify::verify;
