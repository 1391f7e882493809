use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub question_fill: String,
    pub question_border: String,
    pub outcome_fill: String,
    pub outcome_border: String,
    pub text_color: String,
    pub line_color: String,
    pub edge_label_background: String,
    pub edge_label_border: String,
    pub edge_label_font_size: f32,
    pub note_color: String,
    pub note_font_size: f32,
    pub background: String,
}

impl Theme {
    /// Palette of the original portfolio flowchart page.
    pub fn classic() -> Self {
        Self {
            font_family: "system-ui, -apple-system, \"Segoe UI\", sans-serif".to_string(),
            font_size: 24.0,
            question_fill: "#E8F1FF".to_string(),
            question_border: "#4A7BD0".to_string(),
            outcome_fill: "#FFF4D6".to_string(),
            outcome_border: "#D49B00".to_string(),
            text_color: "#1F2933".to_string(),
            line_color: "#666666".to_string(),
            edge_label_background: "#FFFFFF".to_string(),
            edge_label_border: "#D5D9DF".to_string(),
            edge_label_font_size: 18.0,
            note_color: "#666666".to_string(),
            note_font_size: 16.0,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 22.0,
            question_fill: "#F8FAFF".to_string(),
            question_border: "#C7D2E5".to_string(),
            outcome_fill: "#EEF2F8".to_string(),
            outcome_border: "#7A8AA6".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            edge_label_background: "#FFFFFF".to_string(),
            edge_label_border: "#D7E0F0".to_string(),
            edge_label_font_size: 16.0,
            note_color: "#7A8AA6".to_string(),
            note_font_size: 15.0,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "base" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
