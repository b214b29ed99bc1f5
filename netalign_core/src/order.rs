//! Degree-based node orderings.

use netalign_common::{Graph, NodeIdx, NodeOrder};

/// Ordering key of every node.
pub fn order_keys(graph: &Graph, order: NodeOrder, neighbor_strength: f64) -> Vec<f64> {
    graph
        .nodes()
        .map(|v| {
            let own = graph.degree(v) as f64;
            match order {
                NodeOrder::Degree => own,
                NodeOrder::NeighborDegree => {
                    let around: usize = graph.neighbors(v).iter().map(|&w| graph.degree(w)).sum();
                    own + neighbor_strength * around as f64
                }
            }
        })
        .collect()
}

/// All nodes, highest key first; equal keys keep ascending index.
pub fn node_order(graph: &Graph, order: NodeOrder, neighbor_strength: f64) -> Vec<NodeIdx> {
    let keys = order_keys(graph, order, neighbor_strength);
    let mut nodes: Vec<NodeIdx> = graph.nodes().collect();
    nodes.sort_by(|a, b| keys[b.as_usize()].total_cmp(&keys[a.as_usize()]));
    nodes
}

/// First node of each connected component met while scanning `order`.
pub fn component_representatives(graph: &Graph, order: &[NodeIdx]) -> Vec<NodeIdx> {
    let components = graph.components();
    let mut seen = vec![false; components.count()];
    let mut reps = Vec::with_capacity(components.count());
    for &v in order {
        let label = components.label(v);
        if !seen[label] {
            seen[label] = true;
            reps.push(v);
            if reps.len() == components.count() {
                break;
            }
        }
    }
    reps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_order_is_stable() {
        let g = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
        let order = node_order(&g, NodeOrder::Degree, 0.0);
        assert_eq!(order, [1, 2, 0, 3].map(NodeIdx::new).to_vec());
    }

    #[test]
    fn test_neighbor_degree_breaks_ties() {
        // Leaves 3 and 4 hang off the hub 2; leaf 0 hangs off 1.
        let g = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (2, 4)]).unwrap();
        let order = node_order(&g, NodeOrder::NeighborDegree, 0.5);
        assert_eq!(order[0], NodeIdx::new(2));
        assert_eq!(order[4], NodeIdx::new(0));
    }

    #[test]
    fn test_one_representative_per_component() {
        let g = Graph::from_edges(5, [(0, 1), (1, 2), (3, 4)]).unwrap();
        let order = node_order(&g, NodeOrder::Degree, 0.0);
        assert_eq!(
            component_representatives(&g, &order),
            vec![NodeIdx::new(1), NodeIdx::new(3)]
        );
    }
}
