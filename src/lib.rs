#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;
pub mod view;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Answer, NodeKind, Question, QuestionTable};
pub use layout::{Layout, compute_layout};
pub use parser::{ParseError, parse_question_table};
pub use render::render_svg;
pub use theme::Theme;
pub use view::FlowchartView;

/// Theme plus layout settings for one-shot rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Parses a question table and renders it to SVG.
pub fn render_with_options(source: &str, options: RenderOptions) -> Result<String, ParseError> {
    let table = parse_question_table(source)?;
    let layout = compute_layout(&table, &options.layout);
    Ok(render_svg(&layout, &options.theme, &options.layout))
}

pub fn render(source: &str) -> Result<String, ParseError> {
    render_with_options(source, RenderOptions::default())
}
