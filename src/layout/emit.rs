use std::cmp::Ordering;

use crate::config::LayoutConfig;

use super::graph::FlowGraph;
use super::text::edge_label_width;
use super::{EdgeLayout, LabelBox, Layout, LayoutNode, Segment};

/// Translates placed nodes into a positive viewport and derives edge
/// geometry. Only nodes present in `buckets` are emitted.
pub(super) fn emit_layout(
    graph: &FlowGraph,
    buckets: &[Vec<usize>],
    xs: &[Option<f32>],
    rank: &[usize],
    config: &LayoutConfig,
) -> Layout {
    let min_x = placed(buckets, xs)
        .map(|(idx, x)| x - graph.width(idx) / 2.0)
        .fold(f32::INFINITY, f32::min);
    let max_x = placed(buckets, xs)
        .map(|(idx, x)| x + graph.width(idx) / 2.0)
        .fold(f32::NEG_INFINITY, f32::max);
    let span = (max_x - min_x).max(0.0);
    let shift = config.padding_x - min_x;
    let max_level = buckets.len().saturating_sub(1);

    let mut slot: Vec<Option<usize>> = vec![None; graph.len()];
    let mut nodes: Vec<LayoutNode> = Vec::new();
    for (level, bucket) in buckets.iter().enumerate() {
        let mut row: Vec<(usize, f32)> = bucket
            .iter()
            .filter_map(|idx| xs[*idx].map(|x| (*idx, x)))
            .collect();
        row.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(rank[a.0].cmp(&rank[b.0]))
        });
        for (idx, x) in row {
            let block = &graph.blocks[idx];
            slot[idx] = Some(nodes.len());
            nodes.push(LayoutNode {
                id: graph.ids[idx].clone(),
                text: graph.texts[idx].clone(),
                kind: graph.kinds[idx],
                label: block.clone(),
                width: block.width,
                height: block.height,
                level,
                x: x + shift,
                y: config.padding_y + level as f32 * config.vertical_gap,
                parent_count: graph.distinct_parent_count(idx, |parent| xs[parent].is_some()),
            });
        }
    }

    let mut edges = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let (Some(from), Some(to)) = (slot[edge.from], slot[edge.to]) else {
            tracing::debug!(
                from = %graph.ids[edge.from],
                to = %graph.ids[edge.to],
                "skipping edge with an unplaced endpoint"
            );
            continue;
        };
        edges.push(edge_geometry(&nodes[from], &nodes[to], &edge.label, config));
    }

    Layout {
        nodes,
        edges,
        width: config
            .min_canvas_width
            .max(span + config.padding_x * 2.0),
        height: config
            .min_canvas_height
            .max(max_level as f32 * config.vertical_gap + config.padding_y * 2.0),
        max_level,
        fallback: None,
    }
}

fn placed<'a>(
    buckets: &'a [Vec<usize>],
    xs: &'a [Option<f32>],
) -> impl Iterator<Item = (usize, f32)> + 'a {
    buckets
        .iter()
        .flatten()
        .filter_map(move |idx| xs[*idx].map(|x| (*idx, x)))
}

/// Splits the source-to-target line around a label box at its midpoint.
pub(super) fn edge_geometry(
    from: &LayoutNode,
    to: &LayoutNode,
    label: &str,
    config: &LayoutConfig,
) -> EdgeLayout {
    let (x1, y1) = (from.x, from.bottom());
    let (x2, y2) = (to.x, to.top() - config.arrow_clearance);
    let mid_x = (x1 + x2) / 2.0;
    let mid_y = (y1 + y2) / 2.0;

    let dx = x2 - x1;
    let dy = y2 - y1;
    let length = dx.hypot(dy).max(1.0);
    let (ux, uy) = (dx / length, dy / length);

    let label_width = edge_label_width(label, config);
    let gap_half = label_width / 2.0 + config.edge_label.gap;

    EdgeLayout {
        from: from.id.clone(),
        to: to.id.clone(),
        label: label.to_string(),
        head: Segment {
            x1,
            y1,
            x2: mid_x - ux * gap_half,
            y2: mid_y - uy * gap_half,
        },
        tail: Segment {
            x1: mid_x + ux * gap_half,
            y1: mid_y + uy * gap_half,
            x2,
            y2,
        },
        label_box: LabelBox {
            x: mid_x,
            y: mid_y,
            width: label_width,
            height: config.edge_label.height,
        },
    }
}
