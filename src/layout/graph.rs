use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::{NodeKind, QuestionTable};

use super::TextBlock;
use super::text::measure_node;

#[derive(Debug, Clone)]
pub(super) struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub label: String,
}

/// Arena form of the question table. Every per-node vector is indexed by
/// the node's first-seen position.
#[derive(Debug, Clone)]
pub(super) struct FlowGraph {
    pub ids: Vec<String>,
    pub texts: Vec<String>,
    pub kinds: Vec<NodeKind>,
    pub blocks: Vec<TextBlock>,
    pub edges: Vec<GraphEdge>,
    pub children: Vec<Vec<usize>>,
    pub parents: Vec<Vec<usize>>,
    pub root: Option<usize>,
    index: HashMap<String, usize>,
}

impl FlowGraph {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn width(&self, idx: usize) -> f32 {
        self.blocks[idx].width
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn is_leaf(&self, idx: usize) -> bool {
        self.children[idx].is_empty()
    }

    /// Distinct parents of `idx` accepted by `keep`.
    pub fn distinct_parent_count(&self, idx: usize, keep: impl Fn(usize) -> bool) -> usize {
        let mut seen: Vec<usize> = self.parents[idx].iter().copied().filter(|p| keep(*p)).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

pub(super) fn extract_graph(table: &QuestionTable, config: &LayoutConfig) -> FlowGraph {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ids: Vec<String> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();

    let mut intern = |id: &str, ids: &mut Vec<String>| -> usize {
        if let Some(idx) = index.get(id) {
            return *idx;
        }
        let idx = ids.len();
        ids.push(id.to_string());
        index.insert(id.to_string(), idx);
        idx
    };

    for question in table.questions.values() {
        let from = intern(&question.id, &mut ids);
        for answer in &question.answers {
            let to = intern(&answer.next, &mut ids);
            edges.push(GraphEdge {
                from,
                to,
                label: answer.value.clone(),
            });
        }
    }

    let mut children = vec![Vec::new(); ids.len()];
    let mut parents = vec![Vec::new(); ids.len()];
    for edge in &edges {
        children[edge.from].push(edge.to);
        parents[edge.to].push(edge.from);
    }

    let mut texts = Vec::with_capacity(ids.len());
    let mut kinds = Vec::with_capacity(ids.len());
    let mut blocks = Vec::with_capacity(ids.len());
    for id in &ids {
        let kind = table.kind_of(id);
        let text = table.text_of(id).to_string();
        blocks.push(measure_node(&text, kind, config));
        texts.push(text);
        kinds.push(kind);
    }

    let root = index.get(&table.root).copied();
    if root.is_none() && !ids.is_empty() {
        tracing::warn!(root = %table.root, "root question not found in table");
    }

    tracing::debug!(nodes = ids.len(), edges = edges.len(), "extracted decision graph");

    FlowGraph {
        ids,
        texts,
        kinds,
        blocks,
        edges,
        children,
        parents,
        root,
        index,
    }
}

#[cfg(test)]
pub(super) fn graph_from_edges(root: &str, edges: &[(&str, &str, &str)]) -> FlowGraph {
    extract_graph(
        &super::tests::table_from_edges(root, edges),
        &LayoutConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let graph = graph_from_edges(
            "R",
            &[("R", "A", "x"), ("R", "B", "y"), ("A", "O", "p"), ("B", "O", "q")],
        );
        assert_eq!(graph.ids, vec!["R", "A", "B", "O"]);
        assert_eq!(graph.root, Some(0));
        assert_eq!(graph.position("O"), Some(3));
        assert_eq!(graph.position("missing"), None);
        assert_eq!(graph.children[0], vec![1, 2]);
        assert_eq!(graph.parents[3], vec![1, 2]);
        assert_eq!(graph.kinds[3], NodeKind::Outcome);
        assert_eq!(graph.kinds[1], NodeKind::Question);
        assert_eq!(graph.distinct_parent_count(3, |_| true), 2);
        assert_eq!(graph.distinct_parent_count(3, |p| p != 1), 1);
    }

    #[test]
    fn duplicate_answers_keep_both_edges() {
        let graph = graph_from_edges("R", &[("R", "O", "a"), ("R", "O", "b")]);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.children[0], vec![1, 1]);
        assert_eq!(graph.distinct_parent_count(1, |_| true), 1);
    }

    #[test]
    fn missing_root_is_reported_as_none() {
        let graph = graph_from_edges("nope", &[("R", "O", "a")]);
        assert_eq!(graph.root, None);
        assert!(!graph.is_empty());
    }

    #[test]
    fn outcome_text_is_its_id() {
        let graph = graph_from_edges("R", &[("R", "Spiritual but not religious", "no")]);
        assert_eq!(graph.texts[1], "Spiritual but not religious");
        assert_eq!(graph.blocks[1].lines.len(), 2);
    }
}
