/// Division that yields `0` instead of NaN or infinity on a zero denominator.
#[inline]
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Divides every column of a row-major `rows x cols` buffer by its sum.
///
/// Columns summing to zero become all zeros.
pub fn normalize_columns(values: &mut [f64], rows: usize, cols: usize) {
    debug_assert_eq!(values.len(), rows * cols);
    let mut sums = vec![0.0; cols];
    for row in values.chunks_exact(cols.max(1)) {
        for (sum, v) in sums.iter_mut().zip(row) {
            *sum += v;
        }
    }
    for row in values.chunks_exact_mut(cols.max(1)) {
        for (v, &sum) in row.iter_mut().zip(&sums) {
            *v = safe_div(*v, sum);
        }
    }
}

/// Divides every row of a row-major `rows x cols` buffer by its L1 norm.
pub fn normalize_rows_l1(values: &mut [f64], cols: usize) {
    for row in values.chunks_exact_mut(cols.max(1)) {
        let norm: f64 = row.iter().map(|v| v.abs()).sum();
        for v in row.iter_mut() {
            *v = safe_div(*v, norm);
        }
    }
}

/// How many of `len` items to drop so that roughly `keep_ratio` survive.
pub fn removal_count(len: usize, keep_ratio: f64) -> usize {
    let drop = ((1.0 - keep_ratio) * len as f64).floor();
    if drop <= 0.0 { 0 } else { (drop as usize).min(len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_safe_div_zero() {
        assert_eq!(safe_div(3.0, 0.0), 0.0);
        assert_eq!(safe_div(3.0, 2.0), 1.5);
    }

    #[test]
    fn test_normalize_columns() {
        let mut v = vec![1.0, 0.0, 3.0, 0.0];
        normalize_columns(&mut v, 2, 2);
        assert_eq!(v, vec![0.25, 0.0, 0.75, 0.0]);
    }

    #[test]
    fn test_normalize_rows() {
        let mut v = vec![1.0, -3.0, 0.0, 0.0];
        normalize_rows_l1(&mut v, 2);
        assert_eq!(v, vec![0.25, -0.75, 0.0, 0.0]);
    }

    #[rstest]
    #[case(10, 0.3, 7)]
    #[case(3, 1.0, 0)]
    #[case(4, 0.0, 4)]
    #[case(0, 0.3, 0)]
    #[case(1, 0.3, 0)]
    fn test_removal_count(#[case] len: usize, #[case] ratio: f64, #[case] expected: usize) {
        assert_eq!(removal_count(len, ratio), expected);
    }
}
