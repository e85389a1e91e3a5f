use popup_placer::scenario::{Scenario, parse_scenario};
use popup_placer::theme::Theme;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewOutput {
    result: popup_placer::PositionResult,
    svg: String,
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn evaluate(scenario_json: &str) -> Result<String, String> {
    let scenario: Scenario = parse_scenario(scenario_json).map_err(|error| format!("{error:#}"))?;
    let (_, report) = scenario.run().map_err(|error| format!("{error:#}"))?;
    serde_json::to_string(&report.result()).map_err(|error| error.to_string())
}

/// Position the panel described by a JSON/JSON5 scenario and return the result as JSON.
#[wasm_bindgen]
pub fn compute_position_json(scenario_json: &str) -> Result<String, JsValue> {
    evaluate(scenario_json).map_err(to_js)
}

#[wasm_bindgen]
pub fn preview_scenario_svg(scenario_json: &str, theme: Option<String>) -> Result<String, JsValue> {
    let theme = match theme.as_deref() {
        Some(name) => Theme::by_name(name).ok_or_else(|| to_js(format!("Unknown theme {name:?}")))?,
        None => Theme::light(),
    };
    let scenario = parse_scenario(scenario_json).map_err(to_js)?;
    let (surface, report) = scenario.run().map_err(to_js)?;
    let output = PreviewOutput {
        result: report.result(),
        svg: popup_placer::render::render_svg(&surface, &report, &theme),
    };
    serde_json::to_string(&output).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use crate::evaluate;

    #[test]
    fn flips_below_when_the_top_overflows() {
        let scenario = r#"{
            settings: { position: "top left" },
            surface: {
                anchor: { top: 10, left: 100, width: 40, height: 20 },
                panel: { width: 80, height: 30 },
                offsetRoot: { top: 0, left: 0, width: 400, height: 300 },
                boundary: { kind: "window", viewport: { width: 400, height: 300 } },
            },
        }"#;

        let json = evaluate(scenario).expect("scenario should position");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["placement"], "bottom left");
        assert_eq!(value["edges"]["top"], 30.0);
        assert_eq!(value["edges"]["left"], 100.0);
        assert_eq!(value["edges"]["bottom"], "auto");
    }

    #[test]
    fn malformed_scenario_is_an_error() {
        assert!(evaluate("{ surface: ").is_err());
    }
}
