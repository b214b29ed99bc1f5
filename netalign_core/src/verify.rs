//! Reduction of a raw pair list to a one-to-one mapping.

use std::collections::HashSet;

use netalign_common::{NodeIdx, Pair};
use tracing::debug;

/// Keeps each pair only if neither endpoint belongs to an earlier kept pair.
///
/// The input order decides conflicts, and the output preserves it.
#[must_use]
pub fn verify(pairs: &[Pair]) -> Vec<Pair> {
    let mut seen1: HashSet<NodeIdx> = HashSet::with_capacity(pairs.len());
    let mut seen2: HashSet<NodeIdx> = HashSet::with_capacity(pairs.len());
    let verified: Vec<Pair> = pairs
        .iter()
        .filter(|p| {
            if seen1.contains(&p.node1) || seen2.contains(&p.node2) {
                return false;
            }
            seen1.insert(p.node1);
            seen2.insert(p.node2);
            true
        })
        .copied()
        .collect();
    if verified.len() < pairs.len() {
        debug!("verifier dropped {} conflicting pairs", pairs.len() - verified.len());
    }
    verified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u32, b: u32) -> Pair {
        Pair::new(NodeIdx::new(a), NodeIdx::new(b), 0.0)
    }

    #[test]
    fn test_first_seen_wins() {
        let raw = [pair(0, 0), pair(0, 1), pair(1, 0), pair(1, 1), pair(2, 1)];
        assert_eq!(verify(&raw), vec![pair(0, 0), pair(1, 1)]);
    }

    #[test]
    fn test_rejected_pairs_claim_nothing() {
        let raw = [pair(0, 0), pair(1, 0), pair(1, 2)];
        assert_eq!(verify(&raw), vec![pair(0, 0), pair(1, 2)]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;

    fn pairs_from(raw: &[(u8, u8)]) -> Vec<Pair> {
        raw.iter()
            .map(|&(a, b)| Pair::new(NodeIdx::new(a.into()), NodeIdx::new(b.into()), 0.0))
            .collect()
    }

    quickcheck! {
        fn prop_output_is_injective(raw: Vec<(u8, u8)>) -> bool {
            let out = verify(&pairs_from(&raw));
            let firsts: HashSet<_> = out.iter().map(|p| p.node1).collect();
            let seconds: HashSet<_> = out.iter().map(|p| p.node2).collect();
            firsts.len() == out.len() && seconds.len() == out.len()
        }

        fn prop_verify_is_idempotent(raw: Vec<(u8, u8)>) -> bool {
            let once = verify(&pairs_from(&raw));
            verify(&once) == once
        }
    }
}
