use crate::ir::NodeKind;

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// A placed node. `x`/`y` are the box center in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub text: String,
    pub kind: NodeKind,
    pub label: TextBlock,
    pub width: f32,
    pub height: f32,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    /// Distinct incoming neighbours.
    pub parent_count: usize,
}

impl LayoutNode {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// An edge split into two segments around its label box.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub label: String,
    pub head: Segment,
    pub tail: Segment,
    pub label_box: LabelBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackLayout {
    pub message: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<EdgeLayout>,
    pub width: f32,
    pub height: f32,
    pub max_level: usize,
    /// Present exactly when there is nothing to draw.
    pub fallback: Option<FallbackLayout>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes_at_level(&self, level: usize) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |node| node.level == level)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeLayout> + 'a {
        self.edges.iter().filter(move |edge| edge.to == id)
    }
}
