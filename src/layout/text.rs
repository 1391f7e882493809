use crate::config::LayoutConfig;
use crate::ir::NodeKind;

use super::TextBlock;

/// Wraps and sizes a node label for its kind.
///
/// Widths are estimated from character counts rather than font metrics, so
/// the result only depends on the text and the config.
pub(super) fn measure_node(text: &str, kind: NodeKind, config: &LayoutConfig) -> TextBlock {
    let rule = config.size_rule(kind);
    let lines = wrap_line(text, rule.wrap_width, config.wrap_char_width);
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = rule
        .min_width
        .max(longest as f32 * config.measure_char_width + rule.padding_x);
    let height = rule
        .min_height
        .max(lines.len() as f32 * config.line_height + config.node_padding_y);
    TextBlock {
        lines,
        width,
        height,
    }
}

/// Greedy word wrap against `max_width` where each char costs `char_width`.
/// A single word longer than the budget keeps its own line.
pub(super) fn wrap_line(text: &str, max_width: f32, char_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if candidate.chars().count() as f32 * char_width <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

pub(super) fn edge_label_width(label: &str, config: &LayoutConfig) -> f32 {
    let label_cfg = &config.edge_label;
    label_cfg
        .min_width
        .max(label.chars().count() as f32 * label_cfg.char_width + label_cfg.padding * 2.0)
}
