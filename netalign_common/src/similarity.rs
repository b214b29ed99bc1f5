//! Dense node-similarity table.

use crate::{AlignError, AlignResult, NodeIdx};

/// Dense `rows x cols` similarity scores, row-major.
///
/// Rows index nodes of the first graph, columns nodes of the second.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Wraps a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`AlignError::DimensionMismatch`] if `values.len() != rows * cols`
    /// and [`AlignError::NonFiniteSimilarity`] on NaN or infinite entries.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> AlignResult<Self> {
        let expected = rows * cols;
        if values.len() != expected {
            return Err(AlignError::DimensionMismatch {
                rows,
                cols,
                expected,
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AlignError::NonFiniteSimilarity { index });
        }
        Ok(Self { rows, cols, values })
    }

    /// An all-zero table.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Builds a table from sparse `(row, col, score)` entries; absent pairs
    /// score zero and repeated coordinates keep the last value.
    ///
    /// # Errors
    /// Fails on out-of-range coordinates or non-finite scores.
    pub fn from_entries<I>(rows: usize, cols: usize, entries: I) -> AlignResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut table = Self::zeros(rows, cols);
        for (i, j, score) in entries {
            if i >= rows {
                return Err(AlignError::NodeOutOfRange {
                    node: i,
                    node_count: rows,
                });
            }
            if j >= cols {
                return Err(AlignError::NodeOutOfRange {
                    node: j,
                    node_count: cols,
                });
            }
            let index = table.v_ind(i, j);
            if !score.is_finite() {
                return Err(AlignError::NonFiniteSimilarity { index });
            }
            table.values[index] = score;
        }
        Ok(table)
    }

    /// Checks that the table matches the node counts of both graphs.
    ///
    /// # Errors
    /// Returns [`AlignError::DimensionMismatch`] when the shape differs.
    pub fn check_shape(&self, rows: usize, cols: usize) -> AlignResult<()> {
        if self.rows != rows || self.cols != cols {
            return Err(AlignError::DimensionMismatch {
                rows,
                cols,
                expected: rows * cols,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Flat index of `(i, j)`.
    #[must_use]
    pub const fn v_ind(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Similarity of node `a` in the first graph and `b` in the second.
    #[must_use]
    pub fn get(&self, a: NodeIdx, b: NodeIdx) -> f64 {
        self.values[self.v_ind(a.as_usize(), b.as_usize())]
    }

    /// One row of the table.
    #[must_use]
    pub fn row(&self, a: NodeIdx) -> &[f64] {
        let start = a.as_usize() * self.cols;
        &self.values[start..start + self.cols]
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

    /// Flat row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Coordinate of the largest entry; first in row-major order on ties.
    #[must_use]
    pub fn argmax(&self) -> Option<(NodeIdx, NodeIdx)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &v) in self.values.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((index, v));
            }
        }
        best.map(|(index, _)| {
            (
                NodeIdx::from(index / self.cols),
                NodeIdx::from(index % self.cols),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = SimilarityMatrix::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            AlignError::DimensionMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let err = SimilarityMatrix::new(1, 2, vec![0.0, f64::NAN]).unwrap_err();
        assert_eq!(err, AlignError::NonFiniteSimilarity { index: 1 });
    }

    #[test]
    fn test_row_major_access() {
        let s = SimilarityMatrix::new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.v_ind(1, 2), 5);
        assert_eq!(s.get(NodeIdx::new(1), NodeIdx::new(0)), 3.0);
        assert_eq!(s.row(NodeIdx::new(0)), &[0.0, 1.0, 2.0]);
        assert_eq!(s.argmax(), Some((NodeIdx::new(1), NodeIdx::new(2))));
    }

    #[test]
    fn test_from_entries() {
        let s = SimilarityMatrix::from_entries(2, 2, [(0, 1, 4.0), (1, 1, 2.0)]).unwrap();
        assert_eq!(s.values(), &[0.0, 4.0, 0.0, 2.0]);
        assert!(SimilarityMatrix::from_entries(2, 2, [(2, 0, 1.0)]).is_err());
    }

    #[test]
    fn test_empty_argmax() {
        assert_eq!(SimilarityMatrix::zeros(0, 3).argmax(), None);
    }
}
