use crate::ir::NodeKind;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_FALLBACK_MESSAGE: &str = "Unable to load flowchart data.";

/// Box sizing for one node kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSizeRule {
    /// Wrap budget in approximate pixels (`chars * wrap_char_width`).
    pub wrap_width: f32,
    pub min_width: f32,
    pub padding_x: f32,
    pub min_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeLabelConfig {
    pub min_width: f32,
    pub char_width: f32,
    pub padding: f32,
    pub height: f32,
    /// Extra clearance between the label box and each line segment.
    pub gap: f32,
}

impl Default for EdgeLabelConfig {
    fn default() -> Self {
        Self {
            min_width: 70.0,
            char_width: 11.0,
            padding: 10.0,
            height: 32.0,
            gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub question: NodeSizeRule,
    pub outcome: NodeSizeRule,
    pub wrap_char_width: f32,
    pub measure_char_width: f32,
    pub line_height: f32,
    pub node_padding_y: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub sibling_gutter: f32,
    pub min_canvas_width: f32,
    pub min_canvas_height: f32,
    /// Extra relaxation rounds beyond the node count.
    pub level_iteration_slack: usize,
    /// Weight kept from an existing tentative x when re-averaging children.
    pub blend_weight: f32,
    pub arrow_clearance: f32,
    pub edge_label: EdgeLabelConfig,
    /// Per-node sweep bias; also the secondary sort key within a level.
    pub priority: BTreeMap<String, f32>,
    /// Post-sweep x offsets for known-bad placements.
    pub nudges: BTreeMap<String, f32>,
    pub show_path_count: bool,
    pub fallback_message: String,
}

impl LayoutConfig {
    pub fn size_rule(&self, kind: NodeKind) -> &NodeSizeRule {
        match kind {
            NodeKind::Question => &self.question,
            NodeKind::Outcome => &self.outcome,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            question: NodeSizeRule {
                wrap_width: 240.0,
                min_width: 280.0,
                padding_x: 50.0,
                min_height: 70.0,
            },
            outcome: NodeSizeRule {
                wrap_width: 100.0,
                min_width: 120.0,
                padding_x: 40.0,
                min_height: 50.0,
            },
            wrap_char_width: 5.5,
            measure_char_width: 14.0,
            line_height: 26.0,
            node_padding_y: 20.0,
            horizontal_gap: 340.0,
            vertical_gap: 360.0,
            padding_x: 220.0,
            padding_y: 220.0,
            sibling_gutter: 120.0,
            min_canvas_width: 1300.0,
            min_canvas_height: 900.0,
            level_iteration_slack: 5,
            blend_weight: 0.5,
            arrow_clearance: 10.0,
            edge_label: EdgeLabelConfig::default(),
            priority: BTreeMap::new(),
            nudges: BTreeMap::new(),
            show_path_count: true,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1300.0,
            height: 900.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    question_color: Option<String>,
    question_border_color: Option<String>,
    outcome_color: Option<String>,
    outcome_border_color: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    edge_label_background: Option<String>,
    edge_label_border: Option<String>,
    edge_label_font_size: Option<f32>,
    note_color: Option<String>,
    note_font_size: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeSizeFile {
    wrap_width: Option<f32>,
    min_width: Option<f32>,
    padding_x: Option<f32>,
    min_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgeLabelFile {
    min_width: Option<f32>,
    char_width: Option<f32>,
    padding: Option<f32>,
    height: Option<f32>,
    gap: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowchartConfigFile {
    question: Option<NodeSizeFile>,
    outcome: Option<NodeSizeFile>,
    wrap_char_width: Option<f32>,
    measure_char_width: Option<f32>,
    line_height: Option<f32>,
    node_padding_y: Option<f32>,
    horizontal_gap: Option<f32>,
    vertical_gap: Option<f32>,
    padding_x: Option<f32>,
    padding_y: Option<f32>,
    sibling_gutter: Option<f32>,
    min_canvas_width: Option<f32>,
    min_canvas_height: Option<f32>,
    level_iteration_slack: Option<usize>,
    blend_weight: Option<f32>,
    arrow_clearance: Option<f32>,
    edge_label: Option<EdgeLabelFile>,
    priority: Option<BTreeMap<String, f32>>,
    nudges: Option<BTreeMap<String, f32>>,
    show_path_count: Option<bool>,
    fallback_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    flowchart: Option<FlowchartConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::from_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme name, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }
    config.render.background = config.theme.background.clone();

    if let Some(flow) = parsed.flowchart {
        apply_flowchart_config(&mut config.layout, flow);
    }

    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.question_color {
        theme.question_fill = v;
    }
    if let Some(v) = vars.question_border_color {
        theme.question_border = v;
    }
    if let Some(v) = vars.outcome_color {
        theme.outcome_fill = v;
    }
    if let Some(v) = vars.outcome_border_color {
        theme.outcome_border = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.line_color {
        theme.line_color = v;
    }
    if let Some(v) = vars.edge_label_background {
        theme.edge_label_background = v;
    }
    if let Some(v) = vars.edge_label_border {
        theme.edge_label_border = v;
    }
    if let Some(v) = vars.edge_label_font_size {
        theme.edge_label_font_size = v;
    }
    if let Some(v) = vars.note_color {
        theme.note_color = v;
    }
    if let Some(v) = vars.note_font_size {
        theme.note_font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
}

fn apply_size_rule(rule: &mut NodeSizeRule, file: NodeSizeFile) {
    if let Some(v) = file.wrap_width {
        rule.wrap_width = v;
    }
    if let Some(v) = file.min_width {
        rule.min_width = v;
    }
    if let Some(v) = file.padding_x {
        rule.padding_x = v;
    }
    if let Some(v) = file.min_height {
        rule.min_height = v;
    }
}

fn apply_flowchart_config(layout: &mut LayoutConfig, flow: FlowchartConfigFile) {
    if let Some(rule) = flow.question {
        apply_size_rule(&mut layout.question, rule);
    }
    if let Some(rule) = flow.outcome {
        apply_size_rule(&mut layout.outcome, rule);
    }
    if let Some(v) = flow.wrap_char_width {
        layout.wrap_char_width = v;
    }
    if let Some(v) = flow.measure_char_width {
        layout.measure_char_width = v;
    }
    if let Some(v) = flow.line_height {
        layout.line_height = v;
    }
    if let Some(v) = flow.node_padding_y {
        layout.node_padding_y = v;
    }
    if let Some(v) = flow.horizontal_gap {
        layout.horizontal_gap = v;
    }
    if let Some(v) = flow.vertical_gap {
        layout.vertical_gap = v;
    }
    if let Some(v) = flow.padding_x {
        layout.padding_x = v;
    }
    if let Some(v) = flow.padding_y {
        layout.padding_y = v;
    }
    if let Some(v) = flow.sibling_gutter {
        layout.sibling_gutter = v;
    }
    if let Some(v) = flow.min_canvas_width {
        layout.min_canvas_width = v;
    }
    if let Some(v) = flow.min_canvas_height {
        layout.min_canvas_height = v;
    }
    if let Some(v) = flow.level_iteration_slack {
        layout.level_iteration_slack = v;
    }
    if let Some(v) = flow.blend_weight {
        layout.blend_weight = v.clamp(0.0, 1.0);
    }
    if let Some(v) = flow.arrow_clearance {
        layout.arrow_clearance = v;
    }
    if let Some(label) = flow.edge_label {
        if let Some(v) = label.min_width {
            layout.edge_label.min_width = v;
        }
        if let Some(v) = label.char_width {
            layout.edge_label.char_width = v;
        }
        if let Some(v) = label.padding {
            layout.edge_label.padding = v;
        }
        if let Some(v) = label.height {
            layout.edge_label.height = v;
        }
        if let Some(v) = label.gap {
            layout.edge_label.gap = v;
        }
    }
    if let Some(v) = flow.priority {
        layout.priority = v;
    }
    if let Some(v) = flow.nudges {
        layout.nudges = v;
    }
    if let Some(v) = flow.show_path_count {
        layout.show_path_count = v;
    }
    if let Some(v) = flow.fallback_message {
        layout.fallback_message = v;
    }
}
