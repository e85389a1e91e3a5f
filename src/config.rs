use crate::error::{PositionError, Result};
use crate::placement::Placement;
use crate::search::{LastResort, SearchPolicy, Strategy};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-panel positioning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Placement tried first.
    pub position: Placement,
    /// Shift along the anchor edge.
    pub offset: f32,
    /// Gap between anchor and panel.
    pub distance_away: f32,
    /// Overrun tolerated before a placement counts as offstage.
    pub jitter: f32,
    pub max_search_depth: u32,
    pub prefer: Strategy,
    pub last_resort: LastResort,
    pub force_position: bool,
    pub arrow_pixels_from_edge: f32,
    pub set_fluid_width: bool,
    /// Panel sits inline next to its anchor; anchor margins are folded in.
    pub inline: bool,
    /// Basic panels have no arrow, so no arrow centering.
    pub basic: bool,
    /// Panel uses the fluid variant.
    pub fluid: bool,
    /// Explicit direction; `None` asks the geometry provider.
    pub rtl: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            position: Placement::TOP_LEFT,
            offset: 0.0,
            distance_away: 0.0,
            jitter: 2.0,
            max_search_depth: 15,
            prefer: Strategy::Opposite,
            last_resort: LastResort::Disabled,
            force_position: false,
            arrow_pixels_from_edge: 20.0,
            set_fluid_width: true,
            inline: false,
            basic: false,
            fluid: false,
            rtl: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("offset", self.offset),
            ("distanceAway", self.distance_away),
            ("jitter", self.jitter),
            ("arrowPixelsFromEdge", self.arrow_pixels_from_edge),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(PositionError::Config(format!("{name} must be finite")));
            }
        }
        if self.jitter < 0.0 {
            return Err(PositionError::Config("jitter must not be negative".to_string()));
        }
        Ok(())
    }

    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            jitter: self.jitter,
            max_search_depth: self.max_search_depth,
            prefer: self.prefer,
            last_resort: self.last_resort,
            force_position: self.force_position,
        }
    }

    /// Arrow distance when arrow centering should be considered.
    pub fn arrow_centering(&self) -> Option<f32> {
        (!self.basic).then_some(self.arrow_pixels_from_edge)
    }
}

/// Parse settings from JSON, accepting JSON5 (comments, trailing commas,
/// unquoted keys) as a fallback.
pub fn parse_settings(contents: &str) -> anyhow::Result<Settings> {
    let settings: Settings = match serde_json::from_str(contents) {
        Ok(settings) => settings,
        Err(json_err) if json_err.is_syntax() || json_err.is_eof() => {
            json5::from_str(contents).context("settings are neither JSON nor JSON5")?
        }
        Err(json_err) => return Err(json_err.into()),
    };
    settings.validate()?;
    Ok(settings)
}

pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    parse_settings(&contents).with_context(|| format!("invalid settings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.position, Placement::TOP_LEFT);
        assert_eq!(settings.jitter, 2.0);
        assert_eq!(settings.max_search_depth, 15);
        assert_eq!(settings.prefer, Strategy::Opposite);
        assert_eq!(settings.last_resort, LastResort::Disabled);
        assert!(!settings.force_position);
        assert_eq!(settings.arrow_pixels_from_edge, 20.0);
        assert!(settings.set_fluid_width);
    }

    #[test]
    fn parses_camel_case_json() {
        let settings = parse_settings(
            r#"{"position": "bottom center", "distanceAway": 4, "prefer": "adjacent",
                "lastResort": "right center", "maxSearchDepth": 3}"#,
        )
        .unwrap();
        assert_eq!(settings.position, Placement::BOTTOM_CENTER);
        assert_eq!(settings.distance_away, 4.0);
        assert_eq!(settings.prefer, Strategy::Adjacent);
        assert_eq!(settings.last_resort, LastResort::Fixed(Placement::RIGHT_CENTER));
        assert_eq!(settings.max_search_depth, 3);
        assert_eq!(settings.jitter, 2.0);
    }

    #[test]
    fn falls_back_to_json5() {
        let settings = parse_settings(
            "{\n  // lenient\n  position: 'left center',\n  lastResort: true,\n}",
        )
        .unwrap();
        assert_eq!(settings.position, Placement::LEFT_CENTER);
        assert_eq!(settings.last_resort, LastResort::Current);
    }

    #[test]
    fn rejects_unknown_placement() {
        let err = parse_settings(r#"{"position": "top middle"}"#).unwrap_err();
        assert!(format!("{err:#}").contains("top middle"));
    }

    #[test]
    fn rejects_negative_jitter() {
        assert!(parse_settings(r#"{"jitter": -1}"#).is_err());
    }

    #[test]
    fn basic_variant_disables_arrow_centering() {
        let settings = Settings {
            basic: true,
            ..Default::default()
        };
        assert_eq!(settings.arrow_centering(), None);
        assert_eq!(Settings::default().arrow_centering(), Some(20.0));
    }
}
