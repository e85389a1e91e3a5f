use crate::config::Settings;
use crate::memory::MemorySurface;
use crate::placement::Placement;
use crate::positioner::{PositionReport, Positioner};
use crate::text_metrics::{PanelText, measure_panel};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A page and panel settings, as read from a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub settings: Settings,
    pub surface: MemorySurface,
    /// Sizes the panel from text when the surface gives no panel size.
    #[serde(default)]
    pub panel_text: Option<PanelText>,
    /// Overrides `settings.position` for this run.
    #[serde(default)]
    pub requested: Option<Placement>,
}

impl Scenario {
    /// The surface to position against, with the panel sized from text if needed.
    pub fn prepared_surface(&self) -> MemorySurface {
        let mut surface = self.surface.clone();
        if surface.panel.is_none()
            && let Some(text) = &self.panel_text
        {
            let size = measure_panel(text);
            surface.panel = Some(size);
            if surface.container_width == 0.0 {
                surface.container_width = size.width;
            }
        }
        surface
    }

    /// Position the panel once, returning the final surface and the report.
    pub fn run(&self) -> anyhow::Result<(MemorySurface, PositionReport)> {
        let mut surface = self.prepared_surface();
        let mut positioner = Positioner::new(self.settings.clone())?;
        let report = positioner.compute_position(&mut surface, self.requested)?;
        Ok((surface, report))
    }
}

pub fn parse_scenario(contents: &str) -> anyhow::Result<Scenario> {
    match serde_json::from_str(contents) {
        Ok(scenario) => Ok(scenario),
        Err(json_err) if json_err.is_syntax() || json_err.is_eof() => {
            json5::from_str(contents).context("scenario is neither JSON nor JSON5")
        }
        Err(json_err) => Err(json_err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchOutcome;

    const SCENARIO: &str = r#"{
        "settings": {"position": "bottom left"},
        "surface": {
            "anchor": {"top": 100, "left": 100, "width": 50, "height": 20},
            "panel": {"width": 80, "height": 30},
            "offsetRoot": {"top": 0, "left": 0, "width": 800, "height": 600},
            "boundary": {"kind": "window", "viewport": {"width": 800, "height": 600}}
        }
    }"#;

    #[test]
    fn runs_a_json_scenario() {
        let scenario = parse_scenario(SCENARIO).unwrap();
        let (surface, report) = scenario.run().unwrap();
        assert!(matches!(
            report.outcome,
            SearchOutcome::Placed {
                placement: Placement::BOTTOM_LEFT,
                ..
            }
        ));
        assert_eq!(surface.panel_rect().top, 120.0);
    }

    #[test]
    fn json5_scenario_with_text_panel() {
        let scenario = parse_scenario(
            "{
              // panel sized from its text
              requested: 'top center',
              surface: {
                anchor: {top: 200, left: 200, width: 40, height: 20},
                panel: null,
                boundary: {kind: 'window', viewport: {width: 800, height: 600}},
              },
              panelText: {lines: ['Add to cart']},
            }",
        )
        .unwrap();
        let surface = scenario.prepared_surface();
        let panel = surface.panel.unwrap();
        assert!(panel.width > 30.0);
        assert_eq!(surface.container_width, panel.width);
        assert_eq!(scenario.requested, Some(Placement::TOP_CENTER));
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let scenario = parse_scenario(
            r#"{"surface": {"anchor": null, "panel": {"width": 1, "height": 1},
                "boundary": {"kind": "window", "viewport": {"width": 10, "height": 10}}}}"#,
        )
        .unwrap();
        let err = scenario.run().unwrap_err();
        assert!(err.to_string().contains("anchor"));
    }
}
