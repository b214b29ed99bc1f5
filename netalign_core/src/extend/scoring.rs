//! Candidate-pair score increments for best-first extension.
//!
//! Committing the pair `(a1, a2)` adds one increment to every unaligned
//! candidate `(i1, i2)` with `i1` adjacent to `a1` and `i2` adjacent to `a2`.
//! Jaccard variants weigh by the candidate's degrees, Adamic variants by the
//! committed pair's degrees.

use netalign_common::PairScoring;

use crate::utils::safe_div;

/// Degrees of the two nodes of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairDegrees {
    /// Degree in the first graph.
    pub first: usize,
    /// Degree in the second graph.
    pub second: usize,
}

impl PairDegrees {
    /// Sum of both degrees.
    #[must_use]
    pub const fn sum(self) -> usize {
        self.first + self.second
    }

    /// Absolute degree difference.
    #[must_use]
    pub const fn gap(self) -> usize {
        self.first.abs_diff(self.second)
    }
}

/// Score added to a candidate when a neighboring pair is committed.
#[must_use]
pub fn increment(scoring: PairScoring, candidate: PairDegrees, committed: PairDegrees) -> f64 {
    match scoring {
        PairScoring::CommonNeighbor => 1.0,
        PairScoring::Jaccard => safe_div(1.0, candidate.sum() as f64),
        PairScoring::JaccardDegreeGap => 1.0 / (1.0 + candidate.gap() as f64),
        PairScoring::JaccardProduct => safe_div(
            1.0,
            candidate.sum() as f64 * (1.0 + candidate.gap() as f64),
        ),
        PairScoring::Adamic => safe_div(1.0, log_sum(committed)),
        PairScoring::AdamicDegreeGap => 1.0 / (1.0 + log_gap(committed)),
        PairScoring::AdamicProduct => {
            safe_div(1.0, log_sum(committed) * (1.0 + log_gap(committed)))
        }
    }
}

/// `ln(d1 + d2)`, clamped to zero where the logarithm is not positive.
fn log_sum(d: PairDegrees) -> f64 {
    (d.sum() as f64).ln().max(0.0)
}

fn log_gap(d: PairDegrees) -> f64 {
    (1.0 + d.gap() as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const fn degrees(first: usize, second: usize) -> PairDegrees {
        PairDegrees { first, second }
    }

    #[rstest]
    #[case(PairScoring::CommonNeighbor, 1.0)]
    #[case(PairScoring::Jaccard, 1.0 / 5.0)]
    #[case(PairScoring::JaccardDegreeGap, 1.0 / 2.0)]
    #[case(PairScoring::JaccardProduct, 1.0 / 10.0)]
    #[case(PairScoring::Adamic, 1.0 / 4f64.ln())]
    #[case(PairScoring::AdamicDegreeGap, 1.0)]
    #[case(PairScoring::AdamicProduct, 1.0 / 4f64.ln())]
    fn test_increments(#[case] scoring: PairScoring, #[case] expected: f64) {
        let got = increment(scoring, degrees(2, 3), degrees(2, 2));
        assert!((got - expected).abs() < 1e-12, "{scoring:?}: {got}");
    }

    #[test]
    fn test_zero_degrees_do_not_blow_up() {
        for scoring in [PairScoring::Jaccard, PairScoring::JaccardProduct, PairScoring::Adamic] {
            assert_eq!(increment(scoring, degrees(0, 0), degrees(0, 0)), 0.0);
        }
        assert_eq!(
            increment(PairScoring::AdamicProduct, degrees(1, 1), degrees(1, 0)),
            0.0
        );
    }
}
