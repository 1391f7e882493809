use crate::ir::NodeKind;
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub max_level: usize,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub fallback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub text: String,
    pub kind: NodeKind,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label_lines: Vec<String>,
    pub parent_count: usize,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub label: String,
    pub segments: [[f32; 4]; 2],
    pub label_box: [f32; 4],
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                text: node.text.clone(),
                kind: node.kind,
                level: node.level,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                label_lines: node.label.lines.clone(),
                parent_count: node.parent_count,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                label: edge.label.clone(),
                segments: [
                    [edge.head.x1, edge.head.y1, edge.head.x2, edge.head.y2],
                    [edge.tail.x1, edge.tail.y1, edge.tail.x2, edge.tail.y2],
                ],
                label_box: [
                    edge.label_box.x,
                    edge.label_box.y,
                    edge.label_box.width,
                    edge.label_box.height,
                ],
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            max_level: layout.max_level,
            nodes,
            edges,
            fallback: layout.fallback.as_ref().map(|f| f.message.clone()),
        }
    }
}

pub fn layout_dump_json(layout: &Layout) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&LayoutDump::from_layout(layout))?)
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_layout(layout))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::QuestionTable;
    use crate::layout::compute_layout;

    #[test]
    fn dump_lists_kinds_in_lowercase() {
        let mut table = QuestionTable::new();
        table.ensure_question("start", "Go?");
        table.add_answer("start", "yes", "Gone");
        let layout = compute_layout(&table, &LayoutConfig::default());
        let json = layout_dump_json(&layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][0]["kind"], "question");
        assert_eq!(value["nodes"][1]["kind"], "outcome");
        assert_eq!(value["edges"][0]["label"], "yes");
        assert!(value["fallback"].is_null());
    }
}
