//! Seams between the positioning engine and whatever owns the real elements.
//!
//! A [`GeometryProvider`] answers measurement questions, a [`StyleSink`]
//! receives writes. The engine commits a tentative [`EdgeBox`] through the sink
//! and immediately reads the resulting panel offset back through the provider;
//! both sides are reached through one `&mut` borrow of the surface, so no other
//! geometry write for the same panel can land between the two.

use crate::geometry::{Margins, Point, Rect, ScrollOffset, Size};
use crate::placement::Placement;
use crate::resolver::EdgeBox;
use serde::{Deserialize, Serialize};

/// The rectangle a panel has to stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Boundary {
    /// The viewport. Its position is the page origin and its scroll is the
    /// window scroll.
    Window {
        viewport: Size,
        #[serde(default)]
        scroll: ScrollOffset,
    },
    /// A scrollable element. `rect` is the element's own page offset, scroll
    /// is read from the element.
    Element {
        rect: Rect,
        #[serde(default)]
        scroll: ScrollOffset,
    },
}

impl Boundary {
    pub fn rect(&self) -> Rect {
        match *self {
            Boundary::Window { viewport, .. } => Rect::new(0.0, 0.0, viewport.width, viewport.height),
            Boundary::Element { rect, .. } => rect,
        }
    }

    pub fn scroll(&self) -> ScrollOffset {
        match *self {
            Boundary::Window { scroll, .. } | Boundary::Element { scroll, .. } => scroll,
        }
    }
}

pub trait GeometryProvider {
    /// Page offset and size of the anchor; `None` when it does not exist.
    fn anchor_rect(&self) -> Option<Rect>;

    /// Outer size of the panel; `None` when it does not exist.
    fn panel_size(&self) -> Option<Size>;

    /// Outer width of the panel's layout container, used for fluid panels.
    fn container_width(&self) -> f32;

    /// Page offset and size of the panel's offset root.
    fn offset_root_rect(&self) -> Rect;

    fn boundary(&self) -> Boundary;

    /// Top and inline-start margins of the anchor.
    fn inline_margins(&self, rtl: bool) -> Margins;

    fn is_rtl(&self) -> bool {
        false
    }

    /// SVG graphics elements report a zero box while still being visible.
    fn anchor_is_svg_graphic(&self) -> bool {
        false
    }

    /// Page offset of the panel as currently committed.
    fn panel_offset(&self) -> Point;
}

pub trait StyleSink {
    fn set_edges(&mut self, edges: &EdgeBox);

    fn set_width(&mut self, width: f32);

    fn set_placement(&mut self, _placement: Placement) {}

    fn add_search_marker(&mut self) {}

    fn remove_search_marker(&mut self) {}
}

/// Anything that can both be measured and written to.
pub trait Surface: GeometryProvider + StyleSink {}

impl<T: GeometryProvider + StyleSink> Surface for T {}
