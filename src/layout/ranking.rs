use super::graph::FlowGraph;

/// Longest-path depth from the root for every reachable node.
///
/// Relaxes every edge until nothing changes, bounded by
/// `node_count + slack` rounds. Only cyclic input can hit the bound; the
/// levels are then left as they were at that point.
pub(super) fn assign_levels(graph: &FlowGraph, slack: usize) -> Vec<Option<usize>> {
    let mut levels: Vec<Option<usize>> = vec![None; graph.len()];
    let Some(root) = graph.root else {
        return levels;
    };
    levels[root] = Some(0);

    let max_rounds = graph.len() + slack;
    let mut converged = false;
    let mut rounds = 0;
    while rounds < max_rounds {
        rounds += 1;
        let mut changed = false;
        for edge in &graph.edges {
            let Some(from_level) = levels[edge.from] else {
                continue;
            };
            let proposed = from_level + 1;
            if levels[edge.to].is_none_or(|current| proposed > current) {
                levels[edge.to] = Some(proposed);
                changed = true;
            }
        }
        if !changed {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::debug!(rounds, "level assignment converged");
    } else {
        tracing::warn!(rounds, "level assignment hit the iteration cap; graph may be cyclic");
    }
    levels
}

/// Groups leveled nodes into per-level buckets sorted by stable order.
pub(super) fn bucket_levels(levels: &[Option<usize>], rank: &[usize]) -> Vec<Vec<usize>> {
    let max_level = levels.iter().flatten().copied().max();
    let Some(max_level) = max_level else {
        return Vec::new();
    };
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); max_level + 1];
    for (idx, level) in levels.iter().enumerate() {
        if let Some(level) = level {
            buckets[*level].push(idx);
        }
    }
    for bucket in &mut buckets {
        bucket.sort_by_key(|idx| rank[*idx]);
    }
    buckets
}
