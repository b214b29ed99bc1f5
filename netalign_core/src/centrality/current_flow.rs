//! Current-flow (electrical) centralities on a connected node set.
//!
//! Both measures treat edges as unit resistors and read potentials off the
//! Laplacian pseudo-inverse `C`.

use netalign_common::{Graph, NodeIdx};

use super::linalg;

/// Current-flow betweenness of each node in `nodes`, normalized so that a
/// path's middle node scores 1.
///
/// For an edge `(s, t)` the current it carries between sources `a` and `b`
/// is `r[a] - r[b]` with `r = C[s,:] - C[t,:]`, so summing over all pairs only
/// needs `r` sorted once per edge.
pub fn betweenness(graph: &Graph, nodes: &[NodeIdx]) -> Option<Vec<f64>> {
    let k = nodes.len();
    if k <= 2 {
        return Some(vec![0.0; k]);
    }
    let c = linalg::laplacian_pseudoinverse(graph, nodes)?;
    let local = linalg::local_index(graph, nodes);

    let mut acc = vec![0.0; k];
    for (s, &v) in nodes.iter().enumerate() {
        for &w in graph.neighbors(v) {
            let Some(t) = local[w.as_usize()] else {
                continue;
            };
            if t < s {
                continue;
            }
            let mut r: Vec<f64> = (0..k).map(|x| c[(s, x)] - c[(t, x)]).collect();
            r.sort_by(|a, b| b.total_cmp(a));
            let through: f64 = r
                .iter()
                .enumerate()
                .map(|(rank, &x)| x * (k as f64 - 1.0 - 2.0 * rank as f64))
                .sum();
            acc[s] += through;
            acc[t] += through;
        }
    }

    // Each node carries the full unit current of the k - 1 pairs it terminates.
    let norm = (k - 1) as f64 * (k - 2) as f64;
    Some(
        acc.into_iter()
            .map(|a| ((a - (k - 1) as f64) / norm).max(0.0))
            .collect(),
    )
}

/// Current-flow closeness (information centrality): the inverse of the summed
/// effective resistance from each node to every other node in `nodes`.
pub fn closeness(graph: &Graph, nodes: &[NodeIdx]) -> Option<Vec<f64>> {
    let k = nodes.len();
    if k <= 1 {
        return Some(vec![0.0; k]);
    }
    let c = linalg::laplacian_pseudoinverse(graph, nodes)?;
    Some(
        (0..k)
            .map(|v| {
                let resistance: f64 = (0..k)
                    .map(|w| c[(v, v)] + c[(w, w)] - 2.0 * c[(v, w)])
                    .sum();
                crate::utils::safe_div(1.0, resistance)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(g: &Graph) -> Vec<NodeIdx> {
        g.nodes().collect()
    }

    #[test]
    fn test_path_middle_carries_everything() {
        let g = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        let b = betweenness(&g, &all(&g)).unwrap();
        assert!(b[0].abs() < 1e-9 && b[2].abs() < 1e-9);
        assert!((b[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_with_chord() {
        let g = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)]).unwrap();
        let b = betweenness(&g, &all(&g)).unwrap();
        let expected = [0.424242, 0.151515, 0.424242, 0.242424, 0.242424];
        for (got, want) in b.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{got} vs {want}");
        }
    }

    #[test]
    fn test_closeness_prefers_center() {
        let g = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let c = closeness(&g, &all(&g)).unwrap();
        // Resistances on a path are hop distances: 1+1+2+2 from the center.
        assert!((c[2] - 1.0 / 6.0).abs() < 1e-9);
        assert!(c[2] > c[1] && c[1] > c[0]);
    }
}
