//! Hand-tuned horizontal offsets for specific nodes.
//!
//! Runs after the sweep and touches only the nodes listed in
//! `LayoutConfig::nudges`; an empty table leaves the layout untouched.

use std::collections::BTreeMap;

use super::sweep::{SweepContext, respace_level};

pub(super) fn apply_nudges(
    ctx: &SweepContext<'_>,
    nudges: &BTreeMap<String, f32>,
    levels: &[Option<usize>],
    buckets: &mut [Vec<usize>],
    xs: &mut [Option<f32>],
) {
    if nudges.is_empty() {
        return;
    }
    let mut touched: Vec<usize> = Vec::new();
    for (id, offset) in nudges {
        let Some(idx) = ctx.graph.position(id) else {
            tracing::debug!(node = %id, "nudge target not in graph");
            continue;
        };
        let (Some(level), Some(x)) = (levels[idx], xs[idx]) else {
            tracing::debug!(node = %id, "nudge target was not placed");
            continue;
        };
        xs[idx] = Some(x + offset);
        tracing::debug!(node = %id, offset, "applied manual nudge");
        if !touched.contains(&level) {
            touched.push(level);
        }
    }
    for level in touched {
        respace_level(ctx, &mut buckets[level], xs);
    }
}
