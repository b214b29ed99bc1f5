use netalign_common::AlignResult;

use super::DenseMatrix;

/// Sweeps entries by descending score, taking a pair whenever both its row
/// and column are still free. Equal scores keep row-major order.
pub(super) fn assign(scores: &DenseMatrix) -> AlignResult<Vec<(usize, usize)>> {
    let (rows, cols) = (scores.rows(), scores.cols());
    let mut order: Vec<usize> = (0..rows * cols).collect();
    let values = scores.values();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let limit = rows.min(cols);
    let mut row_used = vec![false; rows];
    let mut col_used = vec![false; cols];
    let mut pairs = Vec::with_capacity(limit);
    for index in order {
        let (i, j) = (index / cols, index % cols);
        if row_used[i] || col_used[j] {
            continue;
        }
        row_used[i] = true;
        col_used[j] = true;
        pairs.push((i, j));
        if pairs.len() == limit {
            break;
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_order_and_early_stop() {
        let m = DenseMatrix::new(2, 3, vec![1.0, 5.0, 2.0, 4.0, 6.0, 0.0]).unwrap();
        assert_eq!(assign(&m).unwrap(), vec![(1, 1), (0, 2)]);
    }
}
