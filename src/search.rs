//! Retry loop that walks placements until one fits inside the boundary.
//!
//! The loop is iterative: [`SearchState`] is threaded through explicitly and
//! every transition goes through [`SearchState::advance`], so the walk can be
//! driven by any [`Probe`] without a live page.

use crate::error::Result;
use crate::overflow::{BoundaryDistances, Side};
use crate::placement::Placement;
use crate::resolver::EdgeBox;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// How the next placement is chosen after an overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Flip to the other side of the anchor.
    #[default]
    Opposite,
    /// Step the alignment forward along the same side.
    Adjacent,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Opposite => f.write_str("opposite"),
            Strategy::Adjacent => f.write_str("adjacent"),
        }
    }
}

/// What to do once the retry budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastResort {
    /// Report the panel as unplaceable.
    #[default]
    Disabled,
    /// Keep whatever placement the search ended on.
    Current,
    /// Force a specific placement.
    Fixed(Placement),
}

impl Serialize for LastResort {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            LastResort::Disabled => serializer.serialize_bool(false),
            LastResort::Current => serializer.serialize_bool(true),
            LastResort::Fixed(placement) => placement.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LastResort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLastResort {
            Flag(bool),
            Name(String),
        }

        match RawLastResort::deserialize(deserializer)? {
            RawLastResort::Flag(false) => Ok(LastResort::Disabled),
            RawLastResort::Flag(true) => Ok(LastResort::Current),
            RawLastResort::Name(name) => name
                .parse()
                .map(LastResort::Fixed)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Per-panel retry bookkeeping. Empty between sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    depth: u32,
    tried: BTreeSet<Placement>,
}

impl SearchState {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn tried(&self) -> &BTreeSet<Placement> {
        &self.tried
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0 && self.tried.is_empty()
    }

    pub fn reset(&mut self) {
        self.depth = 0;
        self.tried.clear();
    }

    /// Record `current` as tried and pick its successor.
    pub fn advance(&mut self, current: Placement, strategy: Strategy) -> Placement {
        debug!(placement = %current, "Recording last position tried");
        self.tried.insert(current);
        let candidate = match strategy {
            Strategy::Opposite => Some(current.opposite()),
            Strategy::Adjacent => current.adjacent(),
        };
        let next = match candidate {
            Some(next) if !self.tried.contains(&next) => {
                debug!(placement = %next, %strategy, "Trying strategy");
                next
            }
            _ => {
                let backup = current.backup();
                debug!(placement = %backup, "Using backup position");
                backup
            }
        };
        self.depth += 1;
        next
    }
}

/// Fixed knobs for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchPolicy {
    pub jitter: f32,
    pub max_search_depth: u32,
    pub prefer: Strategy,
    pub last_resort: LastResort,
    pub force_position: bool,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            jitter: 2.0,
            max_search_depth: 15,
            prefer: Strategy::Opposite,
            last_resort: LastResort::Disabled,
            force_position: false,
        }
    }
}

/// The search's view of the page.
pub trait Probe {
    /// Candidate box for `placement`; `None` when nothing should be positioned.
    fn resolve(&mut self, placement: Placement) -> Result<Option<EdgeBox>>;

    /// Tentatively commit `edges` and measure how far the panel now sits from
    /// the boundary.
    fn measure(&mut self, placement: Placement, edges: &EdgeBox) -> BoundaryDistances;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ForceReason {
    /// `forcePosition` was set.
    Requested,
    /// The retry budget ran out and a last resort applied.
    LastResort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SearchOutcome {
    Placed {
        placement: Placement,
        edges: EdgeBox,
        #[serde(skip_serializing_if = "Option::is_none")]
        forced: Option<ForceReason>,
    },
    Unplaceable {
        last: Placement,
    },
    /// The anchor is hidden; nothing was positioned.
    Skipped,
}

/// One resolve/measure cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub placement: Placement,
    pub depth: u32,
    pub edges: EdgeBox,
    pub distances: BoundaryDistances,
    pub offstage: Vec<Side>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub attempts: Vec<Attempt>,
}

/// Walk placements starting at `start` until one fits or the budget is spent.
///
/// `state` is reset before returning, whatever the outcome.
pub fn run_search<P: Probe + ?Sized>(
    probe: &mut P,
    start: Placement,
    state: &mut SearchState,
    policy: &SearchPolicy,
) -> Result<SearchReport> {
    let report = search_loop(probe, start, state, policy);
    state.reset();
    report
}

fn search_loop<P: Probe + ?Sized>(
    probe: &mut P,
    start: Placement,
    state: &mut SearchState,
    policy: &SearchPolicy,
) -> Result<SearchReport> {
    let mut attempts = Vec::new();
    let mut placement = start;
    loop {
        let depth = state.depth();
        let resort = match policy.last_resort {
            LastResort::Fixed(resort)
                if depth == policy.max_search_depth && !policy.force_position =>
            {
                if resort != placement {
                    debug!(placement = %resort, "Search depth reached, using last resort position");
                }
                placement = resort;
                true
            }
            _ => false,
        };

        let Some(edges) = probe.resolve(placement)? else {
            debug!(placement = %placement, "Anchor is hidden, skipping positioning");
            return Ok(SearchReport {
                outcome: SearchOutcome::Skipped,
                attempts,
            });
        };
        let distances = probe.measure(placement, &edges);
        let offstage = distances.offstage_sides(policy.jitter);
        let onstage = offstage.is_empty();
        attempts.push(Attempt {
            placement,
            depth,
            edges,
            distances,
            offstage,
        });

        if resort || policy.force_position || onstage {
            let forced = if resort {
                Some(ForceReason::LastResort)
            } else if onstage {
                debug!(placement = %placement, "Position is on stage");
                None
            } else {
                Some(ForceReason::Requested)
            };
            return Ok(SearchReport {
                outcome: SearchOutcome::Placed {
                    placement,
                    edges,
                    forced,
                },
                attempts,
            });
        }

        debug!(placement = %placement, depth, "Position is outside boundary");
        if depth < policy.max_search_depth {
            placement = state.advance(placement, policy.prefer);
            debug!(placement = %placement, "Trying new position");
            continue;
        }

        if policy.last_resort == LastResort::Current {
            debug!(placement = %placement, "No position found, using last resort position");
            return Ok(SearchReport {
                outcome: SearchOutcome::Placed {
                    placement,
                    edges,
                    forced: Some(ForceReason::LastResort),
                },
                attempts,
            });
        }
        warn!(last = %placement, "Popup could not find a position to display");
        return Ok(SearchReport {
            outcome: SearchOutcome::Unplaceable { last: placement },
            attempts,
        });
    }
}
