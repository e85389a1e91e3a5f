use crate::error::PositionError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static PLACEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(top|bottom|left|right)[\s_-]+(left|center|right)\s*$")
        .expect("placement pattern is valid")
});

/// Side of the anchor the panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vertical {
    Top,
    Bottom,
    Left,
    Right,
}

/// Alignment of the panel along the chosen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

impl Vertical {
    pub fn as_str(self) -> &'static str {
        match self {
            Vertical::Top => "top",
            Vertical::Bottom => "bottom",
            Vertical::Left => "left",
            Vertical::Right => "right",
        }
    }

    /// Whether the horizontal modifier may step along a top/bottom edge.
    pub fn has_adjacents(self) -> bool {
        matches!(self, Vertical::Top | Vertical::Bottom)
    }

    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "top" => Some(Vertical::Top),
            "bottom" => Some(Vertical::Bottom),
            "left" => Some(Vertical::Left),
            "right" => Some(Vertical::Right),
            _ => None,
        }
    }
}

impl Horizontal {
    pub fn as_str(self) -> &'static str {
        match self {
            Horizontal::Left => "left",
            Horizontal::Center => "center",
            Horizontal::Right => "right",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "left" => Some(Horizontal::Left),
            "center" => Some(Horizontal::Center),
            "right" => Some(Horizontal::Right),
            _ => None,
        }
    }
}

/// One of the eight anchor-relative placements.
///
/// Construction goes through [`Placement::new`] or parsing, so a value of this
/// type is always one of the canonical combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    vertical: Vertical,
    horizontal: Horizontal,
}

impl Placement {
    pub const TOP_LEFT: Placement = Placement::raw(Vertical::Top, Horizontal::Left);
    pub const TOP_CENTER: Placement = Placement::raw(Vertical::Top, Horizontal::Center);
    pub const TOP_RIGHT: Placement = Placement::raw(Vertical::Top, Horizontal::Right);
    pub const RIGHT_CENTER: Placement = Placement::raw(Vertical::Right, Horizontal::Center);
    pub const BOTTOM_RIGHT: Placement = Placement::raw(Vertical::Bottom, Horizontal::Right);
    pub const BOTTOM_CENTER: Placement = Placement::raw(Vertical::Bottom, Horizontal::Center);
    pub const BOTTOM_LEFT: Placement = Placement::raw(Vertical::Bottom, Horizontal::Left);
    pub const LEFT_CENTER: Placement = Placement::raw(Vertical::Left, Horizontal::Center);

    /// All placements in backup rotation order.
    pub const ALL: [Placement; 8] = [
        Placement::TOP_LEFT,
        Placement::TOP_CENTER,
        Placement::TOP_RIGHT,
        Placement::RIGHT_CENTER,
        Placement::BOTTOM_RIGHT,
        Placement::BOTTOM_CENTER,
        Placement::BOTTOM_LEFT,
        Placement::LEFT_CENTER,
    ];

    const fn raw(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Pairs `left`/`right` sides only with `center`.
    pub fn new(vertical: Vertical, horizontal: Horizontal) -> Option<Self> {
        if !vertical.has_adjacents() && horizontal != Horizontal::Center {
            return None;
        }
        Some(Self::raw(vertical, horizontal))
    }

    pub fn vertical(self) -> Vertical {
        self.vertical
    }

    pub fn horizontal(self) -> Horizontal {
        self.horizontal
    }

    pub fn name(self) -> &'static str {
        match (self.vertical, self.horizontal) {
            (Vertical::Top, Horizontal::Left) => "top left",
            (Vertical::Top, Horizontal::Center) => "top center",
            (Vertical::Top, Horizontal::Right) => "top right",
            (Vertical::Bottom, Horizontal::Left) => "bottom left",
            (Vertical::Bottom, Horizontal::Center) => "bottom center",
            (Vertical::Bottom, Horizontal::Right) => "bottom right",
            (Vertical::Left, _) => "left center",
            (Vertical::Right, _) => "right center",
        }
    }

    /// Mirror across the vertical axis: whichever component lies on the
    /// horizontal axis flips between left and right. Applying it twice is
    /// the identity.
    pub fn mirrored(self) -> Self {
        match self.vertical {
            Vertical::Left => Self::raw(Vertical::Right, self.horizontal),
            Vertical::Right => Self::raw(Vertical::Left, self.horizontal),
            Vertical::Top | Vertical::Bottom => {
                let horizontal = match self.horizontal {
                    Horizontal::Left => Horizontal::Right,
                    Horizontal::Right => Horizontal::Left,
                    Horizontal::Center => Horizontal::Center,
                };
                Self::raw(self.vertical, horizontal)
            }
        }
    }

    /// Flip the side of the anchor, keeping the modifier.
    pub fn opposite(self) -> Self {
        Self::raw(lookup(&OPPOSITE, self.vertical), self.horizontal)
    }

    /// Step the modifier forward along a top/bottom edge. `None` when the
    /// side has no adjacents or the modifier is already `right`.
    pub fn adjacent(self) -> Option<Self> {
        if !self.vertical.has_adjacents() {
            return None;
        }
        ADJACENT
            .iter()
            .find(|(from, _)| *from == self.horizontal)
            .map(|(_, to)| Self::raw(self.vertical, *to))
    }

    /// Successor in the fixed eight-step rotation.
    pub fn backup(self) -> Self {
        lookup(&BACKUP, self)
    }
}

const OPPOSITE: [(Vertical, Vertical); 4] = [
    (Vertical::Top, Vertical::Bottom),
    (Vertical::Bottom, Vertical::Top),
    (Vertical::Left, Vertical::Right),
    (Vertical::Right, Vertical::Left),
];

const ADJACENT: [(Horizontal, Horizontal); 2] = [
    (Horizontal::Left, Horizontal::Center),
    (Horizontal::Center, Horizontal::Right),
];

const BACKUP: [(Placement, Placement); 8] = [
    (Placement::TOP_LEFT, Placement::TOP_CENTER),
    (Placement::TOP_CENTER, Placement::TOP_RIGHT),
    (Placement::TOP_RIGHT, Placement::RIGHT_CENTER),
    (Placement::RIGHT_CENTER, Placement::BOTTOM_RIGHT),
    (Placement::BOTTOM_RIGHT, Placement::BOTTOM_CENTER),
    (Placement::BOTTOM_CENTER, Placement::BOTTOM_LEFT),
    (Placement::BOTTOM_LEFT, Placement::LEFT_CENTER),
    (Placement::LEFT_CENTER, Placement::TOP_LEFT),
];

fn lookup<K: PartialEq + Copy>(table: &[(K, K)], key: K) -> K {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
        .unwrap_or(key)
}

impl FromStr for Placement {
    type Err = PositionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || PositionError::InvalidPlacement(input.to_string());
        let caps = PLACEMENT_RE.captures(input).ok_or_else(invalid)?;
        let vertical = Vertical::parse(&caps[1]).ok_or_else(invalid)?;
        let horizontal = Horizontal::parse(&caps[2]).ok_or_else(invalid)?;
        Placement::new(vertical, horizontal).ok_or_else(invalid)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_lenient_names() {
        assert_eq!("top left".parse::<Placement>().unwrap(), Placement::TOP_LEFT);
        assert_eq!(
            "  Bottom-Center ".parse::<Placement>().unwrap(),
            Placement::BOTTOM_CENTER
        );
        assert_eq!(
            "right_center".parse::<Placement>().unwrap(),
            Placement::RIGHT_CENTER
        );
    }

    #[test]
    fn rejects_non_canonical_combinations() {
        for bad in ["left top", "left left", "right right", "center", "", "top middle"] {
            let err = bad.parse::<Placement>().unwrap_err();
            assert!(
                matches!(err, PositionError::InvalidPlacement(ref s) if s == bad),
                "{bad:?} should be invalid"
            );
        }
    }

    #[test]
    fn exactly_eight_placements_exist() {
        let mut count = 0;
        for v in [Vertical::Top, Vertical::Bottom, Vertical::Left, Vertical::Right] {
            for h in [Horizontal::Left, Horizontal::Center, Horizontal::Right] {
                if Placement::new(v, h).is_some() {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 8);
        for placement in Placement::ALL {
            assert_eq!(placement.name().parse::<Placement>().unwrap(), placement);
        }
    }

    #[test]
    fn backup_table_is_a_single_cycle() {
        let mut current = Placement::TOP_LEFT;
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(current);
            current = current.backup();
        }
        assert_eq!(current, Placement::TOP_LEFT);
        assert_eq!(seen, Placement::ALL.to_vec());
    }

    #[test]
    fn opposite_flips_side_only() {
        assert_eq!(Placement::TOP_LEFT.opposite(), Placement::BOTTOM_LEFT);
        assert_eq!(Placement::BOTTOM_RIGHT.opposite(), Placement::TOP_RIGHT);
        assert_eq!(Placement::LEFT_CENTER.opposite(), Placement::RIGHT_CENTER);
        for placement in Placement::ALL {
            assert_eq!(placement.opposite().opposite(), placement);
        }
    }

    #[test]
    fn adjacent_steps_forward_without_wrapping() {
        assert_eq!(Placement::TOP_LEFT.adjacent(), Some(Placement::TOP_CENTER));
        assert_eq!(
            Placement::BOTTOM_CENTER.adjacent(),
            Some(Placement::BOTTOM_RIGHT)
        );
        assert_eq!(Placement::TOP_RIGHT.adjacent(), None);
        assert_eq!(Placement::LEFT_CENTER.adjacent(), None);
    }

    #[test]
    fn mirroring_is_involutive() {
        assert_eq!(Placement::TOP_LEFT.mirrored(), Placement::TOP_RIGHT);
        assert_eq!(Placement::LEFT_CENTER.mirrored(), Placement::RIGHT_CENTER);
        assert_eq!(Placement::TOP_CENTER.mirrored(), Placement::TOP_CENTER);
        for placement in Placement::ALL {
            assert_eq!(placement.mirrored().mirrored(), placement);
        }
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Placement::BOTTOM_CENTER).unwrap();
        assert_eq!(json, "\"bottom center\"");
        let back: Placement = serde_json::from_str("\"left-center\"").unwrap();
        assert_eq!(back, Placement::LEFT_CENTER);
        assert!(serde_json::from_str::<Placement>("\"middle\"").is_err());
    }
}
