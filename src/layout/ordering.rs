use std::collections::VecDeque;

use super::graph::FlowGraph;

/// Breadth-first visit order from the root, then any unreached nodes in
/// arena order. Returns `rank[node] = position`.
pub(super) fn stable_order(graph: &FlowGraph) -> Vec<usize> {
    let n = graph.len();
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    if let Some(root) = graph.root {
        let mut queue = VecDeque::from([root]);
        visited[root] = true;
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for &child in &graph.children[current] {
                if !visited[child] {
                    visited[child] = true;
                    queue.push_back(child);
                }
            }
        }
    }

    let reached = order.len();
    for (idx, seen) in visited.iter().enumerate() {
        if !seen {
            order.push(idx);
        }
    }
    if reached < n {
        tracing::debug!(unreached = n - reached, "nodes not reachable from root");
    }

    let mut rank = vec![0usize; n];
    for (pos, node) in order.into_iter().enumerate() {
        rank[node] = pos;
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::graph::graph_from_edges;

    #[test]
    fn bfs_visits_siblings_before_grandchildren() {
        let graph = graph_from_edges(
            "R",
            &[("R", "A", "1"), ("A", "C", "1"), ("R", "B", "2"), ("B", "D", "1")],
        );
        // arena: R, A, C, B, D
        let rank = stable_order(&graph);
        let by_rank = |id: &str| rank[graph.position(id).unwrap()];
        assert_eq!(by_rank("R"), 0);
        assert_eq!(by_rank("A"), 1);
        assert_eq!(by_rank("B"), 2);
        assert_eq!(by_rank("C"), 3);
        assert_eq!(by_rank("D"), 4);
    }

    #[test]
    fn unreached_nodes_follow_in_arena_order() {
        let graph = graph_from_edges("R", &[("X", "Y", "1"), ("R", "A", "1")]);
        // arena: X, Y, R, A
        let rank = stable_order(&graph);
        assert_eq!(rank[2], 0);
        assert_eq!(rank[3], 1);
        assert_eq!(rank[0], 2);
        assert_eq!(rank[1], 3);
    }

    #[test]
    fn missing_root_falls_back_to_arena_order() {
        let graph = graph_from_edges("nope", &[("A", "B", "1")]);
        assert_eq!(stable_order(&graph), vec![0, 1]);
    }
}
