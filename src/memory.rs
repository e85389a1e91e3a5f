use crate::geometry::{Margins, Point, Rect, Size};
use crate::placement::Placement;
use crate::resolver::{Edge, EdgeBox};
use crate::surface::{Boundary, GeometryProvider, StyleSink};
use serde::{Deserialize, Serialize};

/// Anchor margins as authored; the inline-start one is picked per direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnchorMargins {
    pub top: f32,
    pub left: f32,
    pub right: f32,
}

/// A page held entirely in memory. Committed edges are projected through the
/// offset root the way absolute positioning would lay them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySurface {
    pub anchor: Option<Rect>,
    #[serde(default)]
    pub anchor_svg: bool,
    pub panel: Option<Size>,
    #[serde(default)]
    pub container_width: f32,
    #[serde(default)]
    pub offset_root: Rect,
    pub boundary: Boundary,
    #[serde(default)]
    pub margins: AnchorMargins,
    #[serde(default)]
    pub rtl: bool,
    #[serde(skip)]
    edges: EdgeBox,
    #[serde(skip)]
    width: Option<f32>,
    #[serde(skip)]
    placement: Option<Placement>,
    #[serde(skip)]
    searching: bool,
    #[serde(skip)]
    edge_writes: usize,
}

impl MemorySurface {
    pub fn new(anchor: Rect, panel: Size, boundary: Boundary) -> Self {
        Self {
            anchor: Some(anchor),
            anchor_svg: false,
            panel: Some(panel),
            container_width: panel.width,
            offset_root: Rect::default(),
            boundary,
            margins: AnchorMargins::default(),
            rtl: false,
            edges: EdgeBox::default(),
            width: None,
            placement: None,
            searching: false,
            edge_writes: 0,
        }
    }

    /// A window-sized boundary with the page as offset root.
    pub fn in_window(anchor: Rect, panel: Size, viewport: Size) -> Self {
        let mut surface = Self::new(
            anchor,
            panel,
            Boundary::Window {
                viewport,
                scroll: Point::default(),
            },
        );
        surface.offset_root = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        surface
    }

    pub fn with_offset_root(mut self, offset_root: Rect) -> Self {
        self.offset_root = offset_root;
        self
    }

    pub fn edges(&self) -> &EdgeBox {
        &self.edges
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn edge_writes(&self) -> usize {
        self.edge_writes
    }

    /// Panel box in page coordinates as currently committed.
    pub fn panel_rect(&self) -> Rect {
        self.project(&self.edges)
    }

    /// Panel box in page coordinates if `edges` were committed.
    pub fn project(&self, edges: &EdgeBox) -> Rect {
        let size = self.panel.unwrap_or_default();
        let width = self.width.unwrap_or(size.width);
        let root = self.offset_root;
        Rect::new(
            root.top + project(edges.top, edges.bottom, root.height, size.height),
            root.left + project(edges.left, edges.right, root.width, width),
            width,
            size.height,
        )
    }
}

fn project(near: Edge, far: Edge, extent: f32, size: f32) -> f32 {
    match (near, far) {
        (Edge::Px(near), _) => near,
        (Edge::Auto, Edge::Px(far)) => extent - far - size,
        (Edge::Auto, Edge::Auto) => 0.0,
    }
}

impl GeometryProvider for MemorySurface {
    fn anchor_rect(&self) -> Option<Rect> {
        self.anchor
    }

    fn panel_size(&self) -> Option<Size> {
        self.panel
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn offset_root_rect(&self) -> Rect {
        self.offset_root
    }

    fn boundary(&self) -> Boundary {
        self.boundary
    }

    fn inline_margins(&self, rtl: bool) -> Margins {
        Margins {
            top: self.margins.top,
            left: if rtl {
                self.margins.right
            } else {
                self.margins.left
            },
        }
    }

    fn is_rtl(&self) -> bool {
        self.rtl
    }

    fn anchor_is_svg_graphic(&self) -> bool {
        self.anchor_svg
    }

    fn panel_offset(&self) -> Point {
        self.panel_rect().origin()
    }
}

impl StyleSink for MemorySurface {
    fn set_edges(&mut self, edges: &EdgeBox) {
        self.edges = *edges;
        self.edge_writes += 1;
    }

    fn set_width(&mut self, width: f32) {
        self.width = Some(width);
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    fn add_search_marker(&mut self) {
        self.searching = true;
    }

    fn remove_search_marker(&mut self) {
        self.searching = false;
    }
}
