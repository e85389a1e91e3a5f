use crate::calculations::Calculations;
use crate::placement::Placement;
use crate::resolver::EdgeBox;
use crate::surface::StyleSink;
use tracing::debug;

/// Whether and how fluid panels get their width set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FluidWidth {
    pub enabled: bool,
    pub panel_is_fluid: bool,
}

/// Write a winning placement to the panel.
pub fn apply<S: StyleSink + ?Sized>(
    sink: &mut S,
    placement: Placement,
    edges: &EdgeBox,
    calc: &Calculations,
    fluid: FluidWidth,
) {
    if fluid.enabled
        && fluid.panel_is_fluid
        && let Some(width) = calc.container
    {
        debug!(width, "Automatically setting element width to parent width");
        sink.set_width(width);
    }
    sink.set_placement(placement);
    sink.set_edges(edges);
    sink.remove_search_marker();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Margins, Point, Rect, Size};
    use crate::resolver::Edge;
    use crate::surface::Boundary;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl StyleSink for RecordingSink {
        fn set_edges(&mut self, edges: &EdgeBox) {
            self.calls.push(format!("edges {:?}", edges.top.px()));
        }

        fn set_width(&mut self, width: f32) {
            self.calls.push(format!("width {width}"));
        }

        fn set_placement(&mut self, placement: Placement) {
            self.calls.push(format!("placement {placement}"));
        }

        fn remove_search_marker(&mut self) {
            self.calls.push("unmark".to_string());
        }
    }

    fn calc() -> Calculations {
        Calculations::build(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            Size::new(50.0, 20.0),
            Rect::default(),
            Boundary::Window {
                viewport: Size::new(300.0, 300.0),
                scroll: Point::default(),
            },
            Margins::default(),
        )
    }

    fn edges() -> EdgeBox {
        EdgeBox {
            top: Edge::Px(30.0),
            left: Edge::Px(10.0),
            ..Default::default()
        }
    }

    #[test]
    fn writes_edges_and_clears_marker() {
        let mut sink = RecordingSink::default();
        apply(
            &mut sink,
            Placement::BOTTOM_LEFT,
            &edges(),
            &calc(),
            FluidWidth::default(),
        );
        assert_eq!(
            sink.calls,
            vec!["placement bottom left", "edges Some(30.0)", "unmark"]
        );
    }

    #[test]
    fn fluid_panel_gets_container_width_first() {
        let mut sink = RecordingSink::default();
        let fluid = FluidWidth {
            enabled: true,
            panel_is_fluid: true,
        };
        apply(
            &mut sink,
            Placement::BOTTOM_LEFT,
            &edges(),
            &calc().with_fluid_width(240.0),
            fluid,
        );
        assert_eq!(sink.calls[0], "width 240");
    }

    #[test]
    fn non_fluid_panel_keeps_width() {
        let mut sink = RecordingSink::default();
        let fluid = FluidWidth {
            enabled: true,
            panel_is_fluid: false,
        };
        apply(
            &mut sink,
            Placement::BOTTOM_LEFT,
            &edges(),
            &calc().with_fluid_width(240.0),
            fluid,
        );
        assert!(sink.calls.iter().all(|call| !call.starts_with("width")));
    }
}
