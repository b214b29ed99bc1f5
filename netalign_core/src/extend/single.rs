//! Best-first extension, one pair at a time.

use std::cmp::Ordering;

use itertools::Itertools;
use netalign_common::{NodeIdx, Pair, PairScoring};
use rand::Rng;
use tracing::{debug, trace};

use super::priority::IndexedMaxHeap;
use super::scoring::{self, PairDegrees};
use crate::alignment::Alignment;
use crate::context::AlignContext;

/// Heap priority of a candidate pair.
///
/// Higher score wins, then the smaller degree gap, then the smaller degree
/// sum, then a random draw fixed when the candidate first appears.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    score: f64,
    gap: usize,
    sum: usize,
    jitter: u64,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.gap.cmp(&self.gap))
            .then_with(|| other.sum.cmp(&self.sum))
            .then_with(|| self.jitter.cmp(&other.jitter))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Flat similarity indices sorted by descending similarity, consumed in
/// order when no candidate has topological support.
struct SimilarityFallback {
    order: Vec<usize>,
    next: usize,
    cols: usize,
}

impl SimilarityFallback {
    fn new(ctx: &AlignContext<'_>) -> Self {
        let values = ctx.similarity.values();
        Self {
            order: (0..values.len())
                .sorted_by(|&a, &b| values[b].total_cmp(&values[a]))
                .collect(),
            next: 0,
            cols: ctx.similarity.cols(),
        }
    }

    fn next_free(&mut self, alignment: &Alignment) -> Option<(NodeIdx, NodeIdx)> {
        while let Some(&k) = self.order.get(self.next) {
            self.next += 1;
            let (a, b) = (NodeIdx::from(k / self.cols), NodeIdx::from(k % self.cols));
            if alignment.is_free1(a) && alignment.is_free2(b) {
                return Some((a, b));
            }
        }
        None
    }
}

struct Frontier<'c, 'a, R: ?Sized> {
    ctx: &'c AlignContext<'a>,
    scoring: PairScoring,
    heap: IndexedMaxHeap<(NodeIdx, NodeIdx), Candidate>,
    /// Second-graph partners of the candidates involving each first-graph
    /// node. Entries may be stale; removal skips them.
    by_node1: Vec<Vec<NodeIdx>>,
    by_node2: Vec<Vec<NodeIdx>>,
    rng: &'c mut R,
}

impl<R: Rng + ?Sized> Frontier<'_, '_, R> {
    /// Drops every candidate that shares an endpoint with `pair`.
    fn retire(&mut self, pair: Pair) {
        for b in std::mem::take(&mut self.by_node1[pair.node1.as_usize()]) {
            self.heap.remove(&(pair.node1, b));
        }
        for a in std::mem::take(&mut self.by_node2[pair.node2.as_usize()]) {
            self.heap.remove(&(a, pair.node2));
        }
    }

    /// Credits every free neighbor pair of a newly committed pair.
    fn support(&mut self, pair: Pair, alignment: &Alignment) {
        let (g1, g2) = (self.ctx.side1.graph, self.ctx.side2.graph);
        let committed = PairDegrees {
            first: g1.degree(pair.node1),
            second: g2.degree(pair.node2),
        };
        for &x in g1.neighbors(pair.node1) {
            if !alignment.is_free1(x) {
                continue;
            }
            for &y in g2.neighbors(pair.node2) {
                if !alignment.is_free2(y) {
                    continue;
                }
                let candidate = PairDegrees {
                    first: g1.degree(x),
                    second: g2.degree(y),
                };
                let delta = scoring::increment(self.scoring, candidate, committed);
                let priority = match self.heap.get(&(x, y)) {
                    Some(&current) => Candidate {
                        score: current.score + delta,
                        ..current
                    },
                    None => {
                        self.by_node1[x.as_usize()].push(y);
                        self.by_node2[y.as_usize()].push(x);
                        Candidate {
                            score: delta,
                            gap: candidate.gap(),
                            sum: candidate.sum(),
                            jitter: self.rng.random(),
                        }
                    }
                };
                self.heap.push_or_update((x, y), priority);
            }
        }
    }
}

pub(super) fn run<R: Rng + ?Sized>(
    ctx: &AlignContext<'_>,
    alignment: &mut Alignment,
    scoring: PairScoring,
    rng: &mut R,
) {
    let mut frontier = Frontier {
        ctx,
        scoring,
        heap: IndexedMaxHeap::new(),
        by_node1: vec![Vec::new(); ctx.side1.graph.node_count()],
        by_node2: vec![Vec::new(); ctx.side2.graph.node_count()],
        rng,
    };
    for &seed in alignment.pairs() {
        frontier.support(seed, alignment);
    }

    let mut fallback: Option<SimilarityFallback> = None;
    let mut fallback_picks = 0usize;
    while !alignment.is_saturated() {
        let supported = frontier
            .heap
            .peek()
            .filter(|(_, c)| c.score > 0.0)
            .map(|(&key, _)| key);
        let (a, b) = match supported {
            Some(key) => key,
            None => {
                let fallback = fallback.get_or_insert_with(|| SimilarityFallback::new(ctx));
                let Some(key) = fallback.next_free(alignment) else {
                    break;
                };
                fallback_picks += 1;
                key
            }
        };
        let pair = Pair::new(a, b, ctx.similarity.get(a, b));
        if !alignment.commit(pair) {
            // Only reachable through a stale heap entry; drop it and move on.
            frontier.heap.remove(&(a, b));
            continue;
        }
        trace!("committed {} -> {}", a, b);
        frontier.retire(pair);
        frontier.support(pair, alignment);
    }
    debug!(
        "best-first extension done: {} pairs, {} from similarity fallback",
        alignment.len(),
        fallback_picks
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(score: f64, gap: usize, sum: usize, jitter: u64) -> Candidate {
        Candidate {
            score,
            gap,
            sum,
            jitter,
        }
    }

    #[test]
    fn test_candidate_ordering() {
        assert!(candidate(2.0, 5, 9, 0) > candidate(1.0, 0, 0, 9));
        assert!(candidate(1.0, 0, 9, 0) > candidate(1.0, 1, 0, 9));
        assert!(candidate(1.0, 1, 2, 0) > candidate(1.0, 1, 4, 9));
        assert!(candidate(1.0, 1, 2, 7) > candidate(1.0, 1, 2, 3));
    }
}
