use serde::{Deserialize, Serialize};

/// Colors for scenario previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub boundary_stroke: String,
    pub offset_root_fill: String,
    pub anchor_fill: String,
    pub anchor_stroke: String,
    pub panel_fill: String,
    pub panel_stroke: String,
    pub attempt_stroke: String,
    pub text_color: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            boundary_stroke: "#7A8AA6".to_string(),
            offset_root_fill: "#F7FAFF".to_string(),
            anchor_fill: "#EEF2F8".to_string(),
            anchor_stroke: "#1C2430".to_string(),
            panel_fill: "#ECECFF".to_string(),
            panel_stroke: "#9370DB".to_string(),
            attempt_stroke: "#D7E0F0".to_string(),
            text_color: "#1C2430".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#1B1C1D".to_string(),
            boundary_stroke: "#767676".to_string(),
            offset_root_fill: "#262728".to_string(),
            anchor_fill: "#333435".to_string(),
            anchor_stroke: "#DDDDDD".to_string(),
            panel_fill: "#2C2C54".to_string(),
            panel_stroke: "#A291FB".to_string(),
            attempt_stroke: "#444546".to_string(),
            text_color: "#F2F2F2".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "light" | "default" => Some(Self::light()),
            "dark" | "inverted" => Some(Self::dark()),
            _ => None,
        }
    }
}
