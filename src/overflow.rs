use crate::calculations::Calculations;
use crate::geometry::Point;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Left,
    Right,
    Bottom,
}

/// Signed distance from each panel edge to the boundary; negative values
/// mean that edge sits outside.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundaryDistances {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundaryDistances {
    fn sides(&self) -> [(Side, f32); 4] {
        [
            (Side::Top, self.top),
            (Side::Left, self.left),
            (Side::Right, self.right),
            (Side::Bottom, self.bottom),
        ]
    }

    /// Sides overrunning the boundary by more than `jitter`.
    pub fn offstage_sides(&self, jitter: f32) -> Vec<Side> {
        self.sides()
            .into_iter()
            .filter(|(_, distance)| *distance < -jitter)
            .map(|(side, _)| side)
            .collect()
    }

    pub fn is_offstage(&self, jitter: f32) -> bool {
        self.sides().iter().any(|(_, distance)| *distance < -jitter)
    }
}

/// Distances for a panel whose page offset is `offset`.
pub fn distance_from_boundary(offset: Point, calc: &Calculations) -> BoundaryDistances {
    let boundary = &calc.boundary;
    BoundaryDistances {
        top: offset.top - boundary.top,
        left: offset.left - boundary.left,
        right: boundary.right - (offset.left + calc.popup.width),
        bottom: boundary.bottom - (offset.top + calc.popup.height),
    }
}
