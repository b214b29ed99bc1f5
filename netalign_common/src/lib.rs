//! Shared data model for the network aligner.
//!
//! This crate provides the graph and similarity inputs, the pair records the
//! engine produces, the run configuration and the error type used across the
//! workspace.

mod config;
mod error;
pub mod graph;
mod pair;
mod similarity;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::graph::{Components, Graph, NodeIdx};
pub use crate::pair::*;
pub use crate::similarity::*;
