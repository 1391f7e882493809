mod emit;
mod error;
mod graph;
mod nudge;
mod ordering;
mod placement;
mod ranking;
mod sweep;
mod text;
pub(crate) mod types;
pub use types::*;
use emit::*;
use error::*;
use graph::*;
use nudge::*;
use ordering::*;
use placement::*;
use ranking::*;
use sweep::*;

use crate::config::LayoutConfig;
use crate::ir::QuestionTable;

/// Lays out a question table as a top-down flowchart.
///
/// Stages: arena extraction, BFS stable order, longest-path levels, leaf
/// seeding, one top-down and one bottom-up alignment sweep, manual nudges,
/// then translation into a positive viewport. Returns the fallback layout
/// when nothing is reachable from the root.
pub fn compute_layout(table: &QuestionTable, config: &LayoutConfig) -> Layout {
    let graph = extract_graph(table, config);
    if graph.is_empty() || graph.root.is_none() {
        return compute_fallback_layout(config);
    }

    let rank = stable_order(&graph);
    let levels = assign_levels(&graph, config.level_iteration_slack);
    let mut buckets = bucket_levels(&levels, &rank);
    let mut xs = initial_positions(&graph, &levels, &rank, config);

    let priorities: Vec<f32> = graph
        .ids
        .iter()
        .map(|id| config.priority.get(id).copied().unwrap_or(0.0))
        .collect();
    let ctx = SweepContext {
        graph: &graph,
        rank: &rank,
        priorities: &priorities,
        gutter: config.sibling_gutter,
    };
    sweep(&ctx, &mut buckets, &mut xs);
    apply_nudges(&ctx, &config.nudges, &levels, &mut buckets, &mut xs);

    let layout = emit_layout(&graph, &buckets, &xs, &rank, config);
    tracing::debug!(
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        levels = layout.max_level + 1,
        width = layout.width,
        height = layout.height,
        "computed flowchart layout"
    );
    layout
}
