use decision_flowchart::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowchartRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    show_path_count: Option<bool>,
}

fn build_render_options(options: FlowchartRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(show) = options.show_path_count {
        render_options.layout.show_path_count = show;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_flowchart_svg(source: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<FlowchartRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        FlowchartRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(source, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use decision_flowchart::render_with_options;

    use crate::{FlowchartRenderOptions, build_render_options};

    #[test]
    fn renders_quiz_with_answer_labels() {
        let source = r#"{
            root: "start",
            questions: {
                start: {
                    text: "Ready?",
                    answers: [{ value: "Yes", next: "go" }, { value: "No", next: "Stay" }],
                },
                go: {
                    text: "Really?",
                    answers: [{ value: "Sure", next: "Gone" }, { value: "Hmm", next: "Stay" }],
                },
            },
        }"#;

        let svg = render_with_options(source, build_render_options(FlowchartRenderOptions::default()))
            .expect("quiz should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Yes"));
        assert!(svg.contains("(2 paths)"));
    }

    #[test]
    fn options_override_theme_fields() {
        let options: FlowchartRenderOptions =
            serde_json::from_str(r#"{"theme":"modern","fontSize":20,"showPathCount":false}"#).unwrap();
        let render = build_render_options(options);
        assert_eq!(render.theme.font_size, 20.0);
        assert!(!render.layout.show_path_count);
    }
}
