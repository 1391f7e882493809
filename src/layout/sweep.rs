use std::cmp::Ordering;

use super::graph::FlowGraph;

/// Shared inputs of the alignment passes.
pub(super) struct SweepContext<'a> {
    pub graph: &'a FlowGraph,
    pub rank: &'a [usize],
    pub priorities: &'a [f32],
    pub gutter: f32,
}

impl SweepContext<'_> {
    fn compare(&self, a: (usize, f32), b: (usize, f32)) -> Ordering {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                self.priorities[a.0]
                    .partial_cmp(&self.priorities[b.0])
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.rank[a.0].cmp(&self.rank[b.0]))
    }

    /// Sorts `targets` and places them left to right, pushing each node
    /// right until it clears its left neighbour by the gutter.
    pub(super) fn pack(&self, mut targets: Vec<(usize, f32)>, xs: &mut [Option<f32>]) -> Vec<usize> {
        targets.sort_by(|a, b| self.compare(*a, *b));
        let mut prev: Option<(f32, f32)> = None;
        for &(idx, target) in &targets {
            let width = self.graph.width(idx);
            let x = match prev {
                None => target,
                Some((prev_x, prev_width)) => {
                    target.max(prev_x + prev_width / 2.0 + self.gutter + width / 2.0)
                }
            };
            xs[idx] = Some(x);
            prev = Some((x, width));
        }
        targets.into_iter().map(|(idx, _)| idx).collect()
    }

    fn align(&self, bucket: &mut Vec<usize>, neighbors: &[Vec<usize>], xs: &mut [Option<f32>]) {
        if bucket.is_empty() {
            return;
        }
        let targets: Vec<(usize, f32)> = bucket
            .iter()
            .map(|&idx| {
                let current = xs[idx].unwrap_or(0.0);
                let placed: Vec<f32> = neighbors[idx].iter().filter_map(|n| xs[*n]).collect();
                let base = if placed.is_empty() {
                    current
                } else {
                    placed.iter().sum::<f32>() / placed.len() as f32
                };
                (idx, base + self.priorities[idx])
            })
            .collect();
        *bucket = self.pack(targets, xs);
    }
}

/// One top-down pass (align to parents) followed by one bottom-up pass
/// (align to children). Level 0 is never moved.
pub(super) fn sweep(ctx: &SweepContext<'_>, buckets: &mut [Vec<usize>], xs: &mut [Option<f32>]) {
    if buckets.len() <= 1 {
        return;
    }
    for level in 1..buckets.len() {
        ctx.align(&mut buckets[level], &ctx.graph.parents, xs);
    }
    for level in (1..buckets.len() - 1).rev() {
        ctx.align(&mut buckets[level], &ctx.graph.children, xs);
    }
}

/// Re-packs one level in current x order without any alignment target.
pub(super) fn respace_level(ctx: &SweepContext<'_>, bucket: &mut Vec<usize>, xs: &mut [Option<f32>]) {
    let targets: Vec<(usize, f32)> = bucket
        .iter()
        .map(|&idx| (idx, xs[idx].unwrap_or(0.0)))
        .collect();
    *bucket = ctx.pack(targets, xs);
}
