use once_cell::unsync::OnceCell;

use crate::config::LayoutConfig;
use crate::ir::QuestionTable;
use crate::layout::{Layout, compute_layout};
use crate::render::render_svg;
use crate::theme::Theme;

/// A flowchart bound to one fixed question table.
///
/// The layout is computed on first use and reused for the lifetime of the
/// view.
#[derive(Debug)]
pub struct FlowchartView {
    table: QuestionTable,
    theme: Theme,
    config: LayoutConfig,
    layout: OnceCell<Layout>,
}

impl FlowchartView {
    pub fn new(table: QuestionTable, theme: Theme, config: LayoutConfig) -> Self {
        Self {
            table,
            theme,
            config,
            layout: OnceCell::new(),
        }
    }

    pub fn table(&self) -> &QuestionTable {
        &self.table
    }

    pub fn layout(&self) -> &Layout {
        self.layout
            .get_or_init(|| compute_layout(&self.table, &self.config))
    }

    pub fn is_fallback(&self) -> bool {
        self.layout().fallback.is_some()
    }

    pub fn render_svg(&self) -> String {
        render_svg(self.layout(), &self.theme, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_computed_once() {
        let mut table = QuestionTable::new();
        table.ensure_question("start", "Go?");
        table.add_answer("start", "yes", "Gone");
        let view = FlowchartView::new(table, Theme::classic(), LayoutConfig::default());
        let first: *const Layout = view.layout();
        let second: *const Layout = view.layout();
        assert_eq!(first, second);
        assert!(!view.is_fallback());
        assert!(view.render_svg().contains("Gone"));
    }

    #[test]
    fn empty_view_reports_fallback() {
        let view = FlowchartView::new(QuestionTable::new(), Theme::classic(), LayoutConfig::default());
        assert!(view.is_fallback());
        assert!(view.render_svg().contains("Unable to load flowchart data."));
    }
}
