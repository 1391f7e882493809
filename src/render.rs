use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::ir::NodeKind;
use crate::layout::{EdgeLayout, FallbackLayout, Layout, LayoutNode, Segment};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" preserveAspectRatio=\"xMidYMin meet\" role=\"img\" aria-label=\"Decision flowchart\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if let Some(fallback) = &layout.fallback {
        svg.push_str(&fallback_svg(fallback, theme));
        svg.push_str("</svg>");
        return svg;
    }

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrowhead\" markerWidth=\"10\" markerHeight=\"10\" refX=\"9\" refY=\"3\" orient=\"auto\"><polygon points=\"0 0, 10 3, 0 6\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    for edge in &layout.edges {
        svg.push_str(&edge_svg(edge, theme));
    }

    for node in &layout.nodes {
        svg.push_str(&node_svg(node, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn line_svg(segment: &Segment, theme: &Theme, marker: bool) -> String {
    let marker = if marker {
        " marker-end=\"url(#arrowhead)\""
    } else {
        ""
    };
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\"{marker}/>",
        segment.x1, segment.y1, segment.x2, segment.y2, theme.line_color
    )
}

fn edge_svg(edge: &EdgeLayout, theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str("<g class=\"edge\">");
    out.push_str(&line_svg(&edge.head, theme, false));
    out.push_str(&line_svg(&edge.tail, theme, true));

    let label = &edge.label_box;
    out.push_str(&format!(
        "<g transform=\"translate({:.2}, {:.2})\">",
        label.x, label.y
    ));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\"/>",
        -label.width / 2.0,
        -label.height / 2.0,
        label.width,
        label.height,
        theme.edge_label_background,
        theme.edge_label_border
    ));
    out.push_str(&format!(
        "<text text-anchor=\"middle\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"700\" fill=\"{}\">{}</text>",
        theme.edge_label_font_size / 3.0,
        escape_xml(&theme.font_family),
        theme.edge_label_font_size,
        theme.text_color,
        escape_xml(&edge.label)
    ));
    out.push_str("</g></g>");
    out
}

fn node_svg(node: &LayoutNode, theme: &Theme, config: &LayoutConfig) -> String {
    let (fill, stroke, class) = match node.kind {
        NodeKind::Question => (&theme.question_fill, &theme.question_border, "question"),
        NodeKind::Outcome => (&theme.outcome_fill, &theme.outcome_border, "outcome"),
    };
    let multi_path = config.show_path_count && node.parent_count >= 2;
    let stroke_attrs = if multi_path {
        "stroke-width=\"3\" stroke-dasharray=\"5,5\""
    } else {
        "stroke-width=\"2\""
    };

    let mut out = String::new();
    out.push_str(&format!("<g class=\"node {class}\">"));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" fill=\"{fill}\" stroke=\"{stroke}\" {stroke_attrs}/>",
        node.x - node.width / 2.0,
        node.top(),
        node.width,
        node.height,
    ));

    let line_height = config.line_height;
    let total = node.label.lines.len() as f32 * line_height;
    let start_y = node.y - total / 2.0 + line_height * 0.75;
    for (idx, line) in node.label.lines.iter().enumerate() {
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            node.x,
            start_y + idx as f32 * line_height,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color,
            escape_xml(line)
        ));
    }

    if multi_path {
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-style=\"italic\" font-weight=\"500\" fill=\"{}\">({} paths)</text>",
            node.x,
            node.bottom() + theme.note_font_size * 1.6,
            escape_xml(&theme.font_family),
            theme.note_font_size,
            theme.note_color,
            node.parent_count
        ));
    }

    out.push_str("</g>");
    out
}

fn fallback_svg(fallback: &FallbackLayout, theme: &Theme) -> String {
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        fallback.x,
        fallback.y,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.note_color,
        escape_xml(&fallback.message)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_font(&theme.font_family);
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn primary_font(family: &str) -> String {
    family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .find(|part| !part.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
