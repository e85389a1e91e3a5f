use crate::apply::{FluidWidth, apply};
use crate::calculations::{CalcOptions, Calculations};
use crate::config::Settings;
use crate::error::Result;
use crate::overflow::{BoundaryDistances, distance_from_boundary};
use crate::placement::Placement;
use crate::resolver::{EdgeBox, ResolveTuning, resolve};
use crate::search::{Attempt, ForceReason, Probe, SearchOutcome, SearchState, run_search};
use crate::surface::Surface;
use serde::Serialize;
use tracing::debug;

/// Caller-facing result of [`Positioner::compute_position`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeBox>,
}

/// Full account of one positioning sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionReport {
    pub outcome: SearchOutcome,
    pub attempts: Vec<Attempt>,
    pub calculations: Calculations,
}

impl PositionReport {
    pub fn result(&self) -> PositionResult {
        match &self.outcome {
            SearchOutcome::Placed {
                placement, edges, ..
            } => PositionResult {
                success: true,
                placement: Some(*placement),
                edges: Some(*edges),
            },
            SearchOutcome::Unplaceable { .. } | SearchOutcome::Skipped => PositionResult {
                success: false,
                placement: None,
                edges: None,
            },
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Placed { .. })
    }

    pub fn forced(&self) -> Option<ForceReason> {
        match self.outcome {
            SearchOutcome::Placed { forced, .. } => forced,
            _ => None,
        }
    }
}

type UnplaceableHook = Box<dyn FnMut(Placement)>;

/// Positions one floating panel. Holds the panel's settings and its private
/// search bookkeeping.
pub struct Positioner {
    settings: Settings,
    state: SearchState,
    on_unplaceable: Option<UnplaceableHook>,
}

impl std::fmt::Debug for Positioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Positioner")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("on_unplaceable", &self.on_unplaceable.is_some())
            .finish()
    }
}

impl Positioner {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            state: SearchState::default(),
            on_unplaceable: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    /// Called with the last placement tried when no placement fits.
    pub fn on_unplaceable(mut self, hook: impl FnMut(Placement) + 'static) -> Self {
        self.on_unplaceable = Some(Box::new(hook));
        self
    }

    /// Place the panel by a placement name, as handed over from markup or
    /// configuration.
    pub fn compute_position_named<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        placement: &str,
    ) -> Result<PositionReport> {
        let placement = placement.parse()?;
        self.compute_position(surface, Some(placement))
    }

    /// Run one positioning sequence against `surface`.
    ///
    /// `requested` defaults to the configured position. On success the
    /// winning edges are written to the surface; when nothing fits the
    /// unplaceable hook fires and nothing is applied.
    pub fn compute_position<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        requested: Option<Placement>,
    ) -> Result<PositionReport> {
        let start = requested.unwrap_or(self.settings.position);
        let rtl = self.settings.rtl.unwrap_or_else(|| surface.is_rtl());
        let calc = Calculations::from_provider(
            &*surface,
            CalcOptions {
                inline: self.settings.inline,
                fluid_width: self.settings.set_fluid_width && self.settings.fluid,
                rtl,
            },
        )?;
        let tuning = ResolveTuning {
            offset: self.settings.offset,
            distance_away: self.settings.distance_away,
            arrow_centering: self.settings.arrow_centering(),
            rtl,
        };

        if calc.target.is_hidden() {
            debug!("Anchor is hidden, not positioning");
            return Ok(PositionReport {
                outcome: SearchOutcome::Skipped,
                attempts: Vec::new(),
                calculations: calc,
            });
        }

        surface.add_search_marker();
        let policy = self.settings.search_policy();
        let report = {
            let mut probe = SurfaceProbe {
                surface: &mut *surface,
                calc: &calc,
                tuning: &tuning,
            };
            run_search(&mut probe, start, &mut self.state, &policy)
        };
        let report = match report {
            Ok(report) => report,
            Err(err) => {
                surface.remove_search_marker();
                return Err(err);
            }
        };

        match &report.outcome {
            SearchOutcome::Placed {
                placement, edges, ..
            } => {
                let fluid = FluidWidth {
                    enabled: self.settings.set_fluid_width,
                    panel_is_fluid: self.settings.fluid,
                };
                apply(surface, *placement, edges, &calc, fluid);
            }
            SearchOutcome::Unplaceable { last } => {
                surface.remove_search_marker();
                if let Some(hook) = self.on_unplaceable.as_mut() {
                    hook(*last);
                }
            }
            SearchOutcome::Skipped => surface.remove_search_marker(),
        }

        Ok(PositionReport {
            outcome: report.outcome,
            attempts: report.attempts,
            calculations: calc,
        })
    }
}

/// Position a panel once with a throwaway [`Positioner`].
pub fn compute_position<S: Surface + ?Sized>(
    surface: &mut S,
    requested: Option<Placement>,
    settings: &Settings,
) -> Result<PositionReport> {
    Positioner::new(settings.clone())?.compute_position(surface, requested)
}

/// Resolves against a fixed snapshot, commits through the surface and reads
/// the panel offset straight back.
struct SurfaceProbe<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    calc: &'a Calculations,
    tuning: &'a ResolveTuning,
}

impl<S: Surface + ?Sized> Probe for SurfaceProbe<'_, S> {
    fn resolve(&mut self, placement: Placement) -> Result<Option<EdgeBox>> {
        Ok(resolve(placement, self.calc, self.tuning))
    }

    fn measure(&mut self, placement: Placement, edges: &EdgeBox) -> BoundaryDistances {
        self.surface.set_placement(placement);
        self.surface.set_edges(edges);
        let offset = self.surface.panel_offset();
        distance_from_boundary(offset, self.calc)
    }
}
