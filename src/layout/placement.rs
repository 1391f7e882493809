use crate::config::LayoutConfig;

use super::graph::FlowGraph;

/// Seeds an x for every leveled node: leaves packed left to right in stable
/// order, then parents (deepest first) at the mean of their children.
///
/// Siblings may still overlap afterwards; the sweep resolves that.
pub(super) fn initial_positions(
    graph: &FlowGraph,
    levels: &[Option<usize>],
    rank: &[usize],
    config: &LayoutConfig,
) -> Vec<Option<f32>> {
    let mut xs: Vec<Option<f32>> = vec![None; graph.len()];

    let mut leaves: Vec<usize> = (0..graph.len())
        .filter(|idx| levels[*idx].is_some() && graph.is_leaf(*idx))
        .collect();
    leaves.sort_by_key(|idx| rank[*idx]);

    let mut prev: Option<(f32, f32)> = None;
    for idx in leaves {
        let width = graph.width(idx);
        let x = match prev {
            None => 0.0,
            Some((prev_x, prev_width)) => {
                prev_x + prev_width / 2.0 + config.sibling_gutter + width / 2.0
            }
        };
        xs[idx] = Some(x);
        prev = Some((x, width));
    }

    let mut by_depth: Vec<usize> = (0..graph.len())
        .filter(|idx| levels[*idx].is_some())
        .collect();
    by_depth.sort_by(|a, b| levels[*b].cmp(&levels[*a]).then(rank[*a].cmp(&rank[*b])));

    let keep = config.blend_weight;
    for idx in by_depth {
        let child_xs: Vec<f32> = graph.children[idx]
            .iter()
            .filter_map(|child| xs[*child])
            .collect();
        if child_xs.is_empty() {
            if xs[idx].is_none() {
                let positioned = xs.iter().flatten().count();
                xs[idx] = Some(positioned as f32 * config.horizontal_gap);
            }
            continue;
        }
        let avg = child_xs.iter().sum::<f32>() / child_xs.len() as f32;
        // Leaves are the only nodes seeded earlier, so for now every parent
        // takes the plain mean and the blend arm stays dormant.
        xs[idx] = Some(match xs[idx] {
            Some(existing) => existing * keep + avg * (1.0 - keep),
            None => avg,
        });
    }

    xs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::graph::graph_from_edges;
    use crate::layout::ordering::stable_order;
    use crate::layout::ranking::assign_levels;

    fn seed(root: &str, edges: &[(&str, &str, &str)]) -> (FlowGraph, Vec<Option<f32>>) {
        let graph = graph_from_edges(root, edges);
        let config = LayoutConfig::default();
        let levels = assign_levels(&graph, config.level_iteration_slack);
        let rank = stable_order(&graph);
        let xs = initial_positions(&graph, &levels, &rank, &config);
        (graph, xs)
    }

    #[test]
    fn leaves_are_packed_with_gutter() {
        let (graph, xs) = seed("R", &[("R", "A", "1"), ("R", "B", "2")]);
        let a = xs[1].unwrap();
        let b = xs[2].unwrap();
        assert_eq!(a, 0.0);
        let expected = graph.width(1) / 2.0 + 120.0 + graph.width(2) / 2.0;
        assert!((b - a - expected).abs() < 1e-3);
    }

    #[test]
    fn parent_sits_over_children_mean() {
        let (_, xs) = seed("R", &[("R", "A", "1"), ("R", "B", "2")]);
        let mean = (xs[1].unwrap() + xs[2].unwrap()) / 2.0;
        assert!((xs[0].unwrap() - mean).abs() < 1e-3);
    }

    #[test]
    fn unreachable_nodes_get_no_seed() {
        let (_, xs) = seed("R", &[("R", "A", "1"), ("X", "Y", "1")]);
        assert!(xs[0].is_some());
        assert!(xs[1].is_some());
        assert!(xs[2].is_none());
        assert!(xs[3].is_none());
    }

    #[test]
    fn every_leveled_node_is_seeded() {
        let (graph, xs) = seed(
            "R",
            &[("R", "A", "1"), ("R", "B", "2"), ("A", "O", "p"), ("B", "O", "q")],
        );
        assert_eq!(xs.iter().flatten().count(), graph.len());
    }
}
