//! Weighted one-to-one assignment between two node subsets.
//!
//! Callers hand the matcher a dense score table (higher is better) and get
//! back `(row, col)` index pairs. The exact solver maximizes the total score;
//! the greedy solver sweeps entries in descending order.

mod exact;
mod greedy;

use netalign_common::{AlignError, AlignResult, Config, MatchingAlgorithm};
use rand::Rng;
use tracing::trace;

/// Dense row-major matrix of assignment scores or costs.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DenseMatrix {
    /// Wraps a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`AlignError::MalformedCostMatrix`] if the length is not
    /// `rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> AlignResult<Self> {
        if values.len() != rows * cols {
            return Err(AlignError::MalformedCostMatrix {
                rows,
                cols,
                actual: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    /// Builds a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(f(i, j));
            }
        }
        Self { rows, cols, values }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.cols + j]
    }

    /// Returns true if either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Flat row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable flat row-major values.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// The transposed matrix.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i))
    }

    /// Fails on the first NaN or infinite entry.
    ///
    /// # Errors
    /// Returns [`AlignError::NonFiniteCost`] with the entry's coordinate.
    pub fn check_finite(&self) -> AlignResult<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(AlignError::NonFiniteCost {
                row: index / self.cols,
                col: index % self.cols,
            }),
            None => Ok(()),
        }
    }
}

/// Assignment solver configured from the run configuration.
#[derive(Clone, Copy, Debug)]
pub struct BipartiteMatcher {
    algorithm: MatchingAlgorithm,
    noise: f64,
}

impl BipartiteMatcher {
    /// Creates a matcher with an explicit algorithm and no noise.
    #[must_use]
    pub const fn new(algorithm: MatchingAlgorithm) -> Self {
        Self {
            algorithm,
            noise: 0.0,
        }
    }

    /// Creates the matcher described by the configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            algorithm: config.matching,
            noise: config.matching_noise,
        }
    }

    /// Pairs rows with columns to maximize the total score.
    ///
    /// Exact mode returns pairs ordered by row; greedy mode returns them in
    /// the order they were taken. With a non-zero noise amplitude, exact mode
    /// adds a uniform perturbation drawn from `rng` to every score first.
    ///
    /// # Errors
    /// Returns [`AlignError::NonFiniteCost`] if any score is NaN or infinite.
    pub fn maximize<R: Rng + ?Sized>(
        &self,
        scores: &DenseMatrix,
        rng: &mut R,
    ) -> AlignResult<Vec<(usize, usize)>> {
        scores.check_finite()?;
        if scores.is_empty() {
            return Ok(Vec::new());
        }
        trace!(
            "matching {}x{} with {:?}",
            scores.rows(),
            scores.cols(),
            self.algorithm
        );
        match self.algorithm {
            MatchingAlgorithm::Greedy => greedy::assign(scores),
            MatchingAlgorithm::Exact => {
                let mut cost = scores.clone();
                for v in cost.values_mut() {
                    let jitter = if self.noise > 0.0 {
                        self.noise * rng.random::<f64>()
                    } else {
                        0.0
                    };
                    *v = -(*v + jitter);
                }
                exact::minimize(&cost)
            }
        }
    }
}
