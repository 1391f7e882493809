use crate::config::LayoutConfig;

use super::{FallbackLayout, Layout};

/// Layout for input with nothing to draw: no nodes, no edges, and the
/// configured message centered on the minimum canvas.
pub(super) fn compute_fallback_layout(config: &LayoutConfig) -> Layout {
    let width = config.min_canvas_width.max(1.0);
    let height = config.min_canvas_height.max(1.0);
    tracing::debug!("emitting fallback layout");
    Layout {
        nodes: Vec::new(),
        edges: Vec::new(),
        width,
        height,
        max_level: 0,
        fallback: Some(FallbackLayout {
            message: config.fallback_message.clone(),
            x: width / 2.0,
            y: height / 2.0,
        }),
    }
}
