use crate::error::{PositionError, Result};
use crate::geometry::{Margins, Rect, ScrollOffset, Size};
use crate::surface::{Boundary, GeometryProvider};
use serde::Serialize;
use tracing::trace;

/// Anchor box relative to the offset root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetCalc {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    /// Inline-mode margins; zero when the panel is not inline.
    pub margin: Margins,
    pub svg_graphic: bool,
}

impl TargetCalc {
    /// A zero box on anything but an SVG graphic means the anchor is hidden.
    pub fn is_hidden(&self) -> bool {
        self.width == 0.0 && self.height == 0.0 && !self.svg_graphic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenCalc {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub scroll: ScrollOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryEdges {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

/// Everything one positioning sequence needs to know about the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calculations {
    pub target: TargetCalc,
    pub popup: Size,
    /// Width of the panel's layout container when fluid width is in effect.
    pub container: Option<f32>,
    pub parent: Size,
    pub screen: ScreenCalc,
    pub boundary: BoundaryEdges,
}

/// Inputs to [`Calculations::from_provider`] that come from settings rather
/// than from the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalcOptions {
    pub inline: bool,
    pub fluid_width: bool,
    pub rtl: bool,
}

impl Calculations {
    pub fn build(
        anchor: Rect,
        panel: Size,
        offset_root: Rect,
        boundary: Boundary,
        margins: Margins,
    ) -> Self {
        let screen_rect = boundary.rect();
        let scroll = boundary.scroll();
        let screen = ScreenCalc {
            top: screen_rect.top,
            left: screen_rect.left,
            width: screen_rect.width,
            height: screen_rect.height,
            scroll,
        };
        let top = screen.top + scroll.top;
        let left = screen.left + scroll.left;
        Self {
            target: TargetCalc {
                top: anchor.top - offset_root.top,
                left: anchor.left - offset_root.left,
                width: anchor.width,
                height: anchor.height,
                margin: margins,
                svg_graphic: false,
            },
            popup: panel,
            container: None,
            parent: offset_root.size(),
            screen,
            boundary: BoundaryEdges {
                top,
                left,
                bottom: top + screen.height,
                right: left + screen.width,
            },
        }
    }

    /// Size the panel by its layout container instead of its own width.
    pub fn with_fluid_width(mut self, container_width: f32) -> Self {
        self.container = Some(container_width);
        self.popup.width = container_width;
        self
    }

    pub fn with_svg_anchor(mut self, svg_graphic: bool) -> Self {
        self.target.svg_graphic = svg_graphic;
        self
    }

    pub fn from_provider<G: GeometryProvider + ?Sized>(
        provider: &G,
        options: CalcOptions,
    ) -> Result<Self> {
        let anchor = provider
            .anchor_rect()
            .ok_or(PositionError::NotFound("anchor"))?;
        let panel = provider
            .panel_size()
            .ok_or(PositionError::NotFound("panel"))?;
        let margins = if options.inline {
            provider.inline_margins(options.rtl)
        } else {
            Margins::default()
        };
        let mut calc = Self::build(
            anchor,
            panel,
            provider.offset_root_rect(),
            provider.boundary(),
            margins,
        )
        .with_svg_anchor(provider.anchor_is_svg_graphic());
        if options.fluid_width {
            calc = calc.with_fluid_width(provider.container_width());
        }
        trace!(?calc, "Calculations for positioning");
        Ok(calc)
    }
}
