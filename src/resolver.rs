use crate::calculations::Calculations;
use crate::placement::{Horizontal, Placement, Vertical};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

/// One absolute-positioning edge: a pixel value or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Edge {
    Px(f32),
    #[default]
    Auto,
}

impl Edge {
    pub fn px(self) -> Option<f32> {
        match self {
            Edge::Px(value) => Some(value),
            Edge::Auto => None,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Edge::Auto)
    }
}

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Edge::Px(value) => serializer.serialize_f32(*value),
            Edge::Auto => serializer.serialize_str("auto"),
        }
    }
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEdge {
            Number(f32),
            Keyword(String),
        }

        match RawEdge::deserialize(deserializer)? {
            RawEdge::Number(value) => Ok(Edge::Px(value)),
            RawEdge::Keyword(word) if word == "auto" => Ok(Edge::Auto),
            RawEdge::Keyword(word) => Err(serde::de::Error::custom(format!(
                "expected a number or \"auto\", got {word:?}"
            ))),
        }
    }
}

/// The four absolute-positioning edges of a candidate panel box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeBox {
    pub top: Edge,
    pub left: Edge,
    pub bottom: Edge,
    pub right: Edge,
}

impl EdgeBox {
    pub fn numeric_count(&self) -> usize {
        [self.top, self.left, self.bottom, self.right]
            .iter()
            .filter(|edge| !edge.is_auto())
            .count()
    }
}

/// Numeric inputs to [`resolve`] that stay fixed for a positioning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolveTuning {
    pub offset: f32,
    pub distance_away: f32,
    /// `Some(arrow_pixels_from_edge)` when arrow centering applies.
    pub arrow_centering: Option<f32>,
    pub rtl: bool,
}

/// Compute the candidate box for `placement`.
///
/// Returns `None` when the anchor is hidden (zero box, not an SVG graphic);
/// nothing should be positioned in that case.
pub fn resolve(placement: Placement, calc: &Calculations, tuning: &ResolveTuning) -> Option<EdgeBox> {
    if calc.target.is_hidden() {
        return None;
    }
    let placement = if tuning.rtl {
        placement.mirrored()
    } else {
        placement
    };
    let target = &calc.target;
    let popup = &calc.popup;
    let parent = &calc.parent;

    let mut offset = tuning.offset;
    let mut distance_away = tuning.distance_away;

    if let Some(arrow) = tuning.arrow_centering
        && target.width <= arrow * 2.0
    {
        match placement.horizontal() {
            Horizontal::Left => offset += target.width / 2.0 - arrow,
            Horizontal::Right => offset -= target.width / 2.0 - arrow,
            Horizontal::Center => {}
        }
        trace!(%placement, offset, "Adjusting offset to center arrow on small anchor");
    }

    match placement.vertical() {
        Vertical::Left | Vertical::Right => {
            offset += target.margin.top;
            distance_away -= target.margin.left;
        }
        Vertical::Top => {
            offset += target.margin.left;
            distance_away -= target.margin.top;
        }
        Vertical::Bottom => {
            offset += target.margin.left;
            distance_away += target.margin.top;
        }
    }

    let above = parent.height - target.top + distance_away;
    let below = target.top + target.height + distance_away;
    let align_left = target.left + offset;
    let align_center = target.left + target.width / 2.0 - popup.width / 2.0 + offset;
    let align_right = parent.width - target.left - target.width - offset;
    let middle = target.top + target.height / 2.0 - popup.height / 2.0 + offset;

    use Edge::{Auto, Px};
    let (top, left, bottom, right) = match (placement.vertical(), placement.horizontal()) {
        (Vertical::Top, Horizontal::Left) => (Auto, Px(align_left), Px(above), Auto),
        (Vertical::Top, Horizontal::Center) => (Auto, Px(align_center), Px(above), Auto),
        (Vertical::Top, Horizontal::Right) => (Auto, Auto, Px(above), Px(align_right)),
        (Vertical::Left, _) => (
            Px(middle),
            Auto,
            Auto,
            Px(parent.width - target.left + distance_away),
        ),
        (Vertical::Right, _) => (
            Px(middle),
            Px(target.left + target.width + distance_away),
            Auto,
            Auto,
        ),
        (Vertical::Bottom, Horizontal::Left) => (Px(below), Px(align_left), Auto, Auto),
        (Vertical::Bottom, Horizontal::Center) => (Px(below), Px(align_center), Auto, Auto),
        (Vertical::Bottom, Horizontal::Right) => (Px(below), Auto, Auto, Px(align_right)),
    };
    Some(EdgeBox {
        top,
        left,
        bottom,
        right,
    })
}
