pub mod apply;
pub mod calculations;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod overflow;
pub mod placement;
pub mod positioner;
pub mod render;
pub mod resolver;
pub mod scenario;
pub mod search;
pub mod surface;
pub mod text_metrics;
pub mod theme;
pub mod trace;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Settings, load_settings, parse_settings};
pub use error::PositionError;
pub use geometry::{Margins, Point, Rect, ScrollOffset, Size};
pub use memory::MemorySurface;
pub use placement::{Horizontal, Placement, Vertical};
pub use positioner::{PositionReport, PositionResult, Positioner, compute_position};
pub use resolver::{Edge, EdgeBox};
pub use search::{LastResort, SearchOutcome, SearchState, Strategy};
pub use surface::{Boundary, GeometryProvider, StyleSink, Surface};
