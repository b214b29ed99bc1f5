//! Shortest-path centralities: betweenness (Brandes) and closeness.

use std::collections::VecDeque;

use netalign_common::{Graph, NodeIdx};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Normalized betweenness centrality of every node.
///
/// Values are scaled by `2 / ((n - 1)(n - 2))`, so a star's hub scores 1.
pub fn betweenness(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();

    #[cfg(feature = "rayon")]
    let raw = (0..n)
        .into_par_iter()
        .map(|s| source_dependencies(graph, s))
        .reduce(|| vec![0.0; n], add_into);
    #[cfg(not(feature = "rayon"))]
    let raw = (0..n)
        .map(|s| source_dependencies(graph, s))
        .fold(vec![0.0; n], add_into);

    // Every unordered pair was counted from both endpoints.
    let scale = if n > 2 {
        1.0 / ((n - 1) as f64 * (n - 2) as f64)
    } else {
        0.5
    };
    raw.into_iter().map(|b| b * scale).collect()
}

/// Closeness centrality scaled by the reachable fraction of the graph.
///
/// For a node reaching `r - 1` others at total distance `d`, the score is
/// `(r - 1) / d * (r - 1) / (n - 1)`; isolated nodes score 0.
pub fn closeness(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();

    #[cfg(feature = "rayon")]
    let iter = (0..n).into_par_iter();
    #[cfg(not(feature = "rayon"))]
    let iter = 0..n;

    iter.map(|s| {
        let dist = bfs_distances(graph, s);
        let (reached, total) = dist
            .iter()
            .flatten()
            .fold((0usize, 0usize), |(r, t), &d| (r + usize::from(d > 0), t + d));
        if total == 0 || n <= 1 {
            return 0.0;
        }
        let reached = reached as f64;
        (reached / total as f64) * (reached / (n - 1) as f64)
    })
    .collect()
}

fn add_into(mut acc: Vec<f64>, other: Vec<f64>) -> Vec<f64> {
    for (a, b) in acc.iter_mut().zip(other) {
        *a += b;
    }
    acc
}

fn bfs_distances(graph: &Graph, source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; graph.node_count()];
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for w in graph.neighbors(NodeIdx::from(v)) {
            let w = w.as_usize();
            if dist[w].is_none() {
                dist[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    dist
}

/// Pair dependencies accumulated from a single source.
fn source_dependencies(graph: &Graph, s: usize) -> Vec<f64> {
    let n = graph.node_count();
    let mut stack = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut delta = vec![0.0_f64; n];

    sigma[s] = 1.0;
    dist[s] = Some(0);
    let mut queue = VecDeque::from([s]);
    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let dv = dist[v].unwrap_or(0);
        for w in graph.neighbors(NodeIdx::from(v)) {
            let w = w.as_usize();
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
            if dist[w] == Some(dv + 1) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut bc = vec![0.0_f64; n];
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
        }
        if w != s {
            bc[w] += delta[w];
        }
    }
    bc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(leaves: usize) -> Graph {
        Graph::from_edges(leaves + 1, (1..=leaves).map(|i| (0, i))).unwrap()
    }

    #[test]
    fn test_star_betweenness() {
        let bc = betweenness(&star(4));
        assert!((bc[0] - 1.0).abs() < 1e-12);
        assert!(bc[1..].iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_path_betweenness() {
        let g = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        assert_eq!(betweenness(&g), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_closeness_with_isolated_node() {
        let g = Graph::from_edges(4, [(0, 1), (1, 2)]).unwrap();
        let c = closeness(&g);
        // Node 1 reaches 2 of 3 others at total distance 2.
        assert!((c[1] - (2.0 / 2.0) * (2.0 / 3.0)).abs() < 1e-12);
        assert_eq!(c[3], 0.0);
        assert!(c[1] > c[0]);
    }
}
