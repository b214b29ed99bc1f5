//! Exact assignment through the Kuhn-Munkres solver.

use munkres::{WeightMatrix, solve_assignment};
use netalign_common::{AlignError, AlignResult};

use super::DenseMatrix;

/// Minimum-cost assignment of `min(rows, cols)` pairs, sorted by row.
///
/// A rectangular table is padded to a square one with zero-cost dummy rows
/// or columns, and pairs that land on padding are dropped.
///
/// # Errors
/// Returns [`AlignError::NonFiniteCost`] on NaN or infinite entries and
/// [`AlignError::AssignmentFailed`] if the solver gives up.
pub(super) fn minimize(cost: &DenseMatrix) -> AlignResult<Vec<(usize, usize)>> {
    cost.check_finite()?;
    if cost.is_empty() {
        return Ok(Vec::new());
    }
    let (rows, cols) = (cost.rows(), cost.cols());
    let n = rows.max(cols);
    let mut weights = WeightMatrix::from_fn(n, |(i, j)| {
        if i < rows && j < cols { cost.get(i, j) } else { 0.0 }
    });
    let positions = solve_assignment(&mut weights)
        .map_err(|err| AlignError::AssignmentFailed(format!("{err:?} on {rows}x{cols}")))?;

    let mut pairs: Vec<_> = positions
        .into_iter()
        .map(|p| (p.row, p.column))
        .filter(|&(i, j)| i < rows && j < cols)
        .collect();
    pairs.sort_unstable();
    Ok(pairs)
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use itertools::Itertools;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    /// Small cost matrix with distinct entries.
    #[derive(Clone, Debug)]
    struct SmallCost(DenseMatrix);

    impl Arbitrary for SmallCost {
        fn arbitrary(g: &mut Gen) -> Self {
            let rows = usize::arbitrary(g) % 6 + 1;
            let cols = usize::arbitrary(g) % 6 + 1;
            let values: Vec<f64> = (0..rows * cols)
                .map(|k| f64::from(i16::arbitrary(g)) + k as f64 * 1e-3)
                .collect();
            Self(DenseMatrix::from_fn(rows, cols, |i, j| values[i * cols + j]))
        }
    }

    fn total(cost: &DenseMatrix, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(i, j)| cost.get(i, j)).sum()
    }

    fn brute_force(cost: &DenseMatrix) -> f64 {
        let (n, m) = (cost.rows(), cost.cols());
        if n <= m {
            (0..m)
                .permutations(n)
                .map(|cols| (0..n).map(|i| cost.get(i, cols[i])).sum::<f64>())
                .fold(f64::INFINITY, f64::min)
        } else {
            brute_force(&cost.transposed())
        }
    }

    quickcheck! {
        fn prop_matches_brute_force(c: SmallCost) -> bool {
            let pairs = minimize(&c.0).unwrap();
            let size_ok = pairs.len() == c.0.rows().min(c.0.cols());
            let rows_unique = pairs.iter().map(|p| p.0).all_unique();
            let cols_unique = pairs.iter().map(|p| p.1).all_unique();
            let optimal = (total(&c.0, &pairs) - brute_force(&c.0)).abs() < 1e-6;
            size_ok && rows_unique && cols_unique && optimal
        }
    }

    #[test]
    fn test_known_square() {
        let m = DenseMatrix::new(3, 3, vec![4.0, 1.0, 3.0, 2.0, 0.0, 5.0, 3.0, 2.0, 2.0]).unwrap();
        let pairs = minimize(&m).unwrap();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (2, 2)]);
        assert_eq!(total(&m, &pairs), 5.0);
    }

    #[test]
    fn test_tall_matrix_drops_padding() {
        let m = DenseMatrix::new(3, 1, vec![3.0, 1.0, 2.0]).unwrap();
        assert_eq!(minimize(&m).unwrap(), vec![(1, 0)]);
    }

    #[test]
    fn test_wide_matrix_with_negative_costs() {
        // Padding costs zero, so negative real costs must still win.
        let m = DenseMatrix::new(2, 4, vec![-1.0, -5.0, -2.0, 0.0, -4.0, -6.0, -1.0, 0.0]).unwrap();
        let pairs = minimize(&m).unwrap();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
        assert_eq!(total(&m, &pairs), -9.0);
    }
}
