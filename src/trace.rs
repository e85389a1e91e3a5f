use crate::config::Settings;
use crate::placement::Placement;
use crate::positioner::PositionReport;
use crate::search::SearchOutcome;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDump {
    pub outcome: String,
    pub placement: Option<String>,
    pub requested: String,
    pub jitter: f32,
    pub max_search_depth: u32,
    pub boundary: [f32; 4],
    pub popup: [f32; 2],
    pub attempts: Vec<AttemptDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptDump {
    pub depth: u32,
    pub placement: String,
    /// top, left, bottom, right; `null` for `auto`
    pub edges: [Option<f32>; 4],
    /// top, left, right, bottom
    pub distances: [f32; 4],
    pub offstage: Vec<String>,
}

impl TraceDump {
    pub fn from_report(report: &PositionReport, settings: &Settings, requested: Placement) -> Self {
        let (outcome, placement) = match &report.outcome {
            SearchOutcome::Placed {
                placement, forced, ..
            } => {
                let outcome = match forced {
                    Some(reason) => format!("placed ({reason:?})"),
                    None => "placed".to_string(),
                };
                (outcome, Some(placement.to_string()))
            }
            SearchOutcome::Unplaceable { last } => ("unplaceable".to_string(), Some(last.to_string())),
            SearchOutcome::Skipped => ("skipped".to_string(), None),
        };
        let calc = &report.calculations;
        let attempts = report
            .attempts
            .iter()
            .map(|attempt| AttemptDump {
                depth: attempt.depth,
                placement: attempt.placement.to_string(),
                edges: [
                    attempt.edges.top.px(),
                    attempt.edges.left.px(),
                    attempt.edges.bottom.px(),
                    attempt.edges.right.px(),
                ],
                distances: [
                    attempt.distances.top,
                    attempt.distances.left,
                    attempt.distances.right,
                    attempt.distances.bottom,
                ],
                offstage: attempt
                    .offstage
                    .iter()
                    .map(|side| format!("{side:?}").to_lowercase())
                    .collect(),
            })
            .collect();

        TraceDump {
            outcome,
            placement,
            requested: requested.to_string(),
            jitter: settings.jitter,
            max_search_depth: settings.max_search_depth,
            boundary: [
                calc.boundary.top,
                calc.boundary.left,
                calc.boundary.bottom,
                calc.boundary.right,
            ],
            popup: [calc.popup.width, calc.popup.height],
            attempts,
        }
    }
}

pub fn write_trace(
    path: &Path,
    report: &PositionReport,
    settings: &Settings,
    requested: Placement,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = TraceDump::from_report(report, settings, requested);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
