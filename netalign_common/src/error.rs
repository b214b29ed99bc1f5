//! Error types for alignment runs.
//!
//! Malformed input and invalid configuration are reported before any search
//! begins. Mid-run failures all come from the assignment solver (a
//! non-finite score, or no complete matching found) and abort the whole run.

use thiserror::Error;

/// Errors that can occur while preparing or running an alignment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    // === Input errors (raised while building graphs and tables) ===
    /// Similarity table does not cover every node pair.
    #[error("similarity table has {actual} entries, expected {rows} x {cols} = {expected}")]
    DimensionMismatch {
        /// Number of rows (nodes of the first graph).
        rows: usize,
        /// Number of columns (nodes of the second graph).
        cols: usize,
        /// Required entry count.
        expected: usize,
        /// Supplied entry count.
        actual: usize,
    },

    /// An edge refers to a node beyond the graph's node count.
    #[error("edge endpoint {node} out of range for graph with {node_count} nodes")]
    NodeOutOfRange {
        /// Offending endpoint.
        node: usize,
        /// Node count of the graph being built.
        node_count: usize,
    },

    /// A similarity entry is NaN or infinite.
    #[error("non-finite similarity at flat index {index}")]
    NonFiniteSimilarity {
        /// Row-major index of the entry.
        index: usize,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // === Solver errors ===
    /// A cost handed to the assignment solver is NaN or infinite.
    #[error("non-finite assignment cost at ({row}, {col})")]
    NonFiniteCost {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
    },

    /// The assignment solver failed to reach a complete matching.
    #[error("assignment solver failed: {0}")]
    AssignmentFailed(String),

    /// A cost matrix whose buffer length disagrees with its shape.
    #[error("cost matrix has {actual} entries, expected {rows} x {cols}")]
    MalformedCostMatrix {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
        /// Supplied entry count.
        actual: usize,
    },
}

impl AlignError {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result alias used throughout the engine.
pub type AlignResult<T> = Result<T, AlignError>;
