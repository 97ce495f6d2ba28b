//! Typed brush events and listeners

use serde::Serialize;

use crate::index::Range;

/// What a brush gesture produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrushEvent {
    /// Drag began; reset affordance shown
    Start,
    /// Extent changed during a drag and the dimension was filtered
    Brush { extent: Range },
    /// Drag ended; `None` when the selection was cleared
    End { extent: Option<Range> },
}

impl BrushEvent {
    /// `brush` and `brush_end` each require one coordinated re-render
    pub fn triggers_render(&self) -> bool {
        !matches!(self, BrushEvent::Start)
    }
}

/// Observer of brush activity on any chart of a dashboard.
///
/// All methods default to no-ops.
pub trait BrushListener {
    fn on_brush_start(&mut self, _chart: usize) {}

    fn on_brush(&mut self, _chart: usize, _extent: Range) {}

    fn on_brush_end(&mut self, _chart: usize, _extent: Option<Range>) {}
}

/// Route an event to the matching listener method
pub fn dispatch(listener: &mut dyn BrushListener, chart: usize, event: BrushEvent) {
    match event {
        BrushEvent::Start => listener.on_brush_start(chart),
        BrushEvent::Brush { extent } => listener.on_brush(chart, extent),
        BrushEvent::End { extent } => listener.on_brush_end(chart, extent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        starts: usize,
        brushes: Vec<Range>,
        ends: Vec<Option<Range>>,
    }

    impl BrushListener for Tally {
        fn on_brush_start(&mut self, _chart: usize) {
            self.starts += 1;
        }

        fn on_brush(&mut self, _chart: usize, extent: Range) {
            self.brushes.push(extent);
        }

        fn on_brush_end(&mut self, _chart: usize, extent: Option<Range>) {
            self.ends.push(extent);
        }
    }

    #[test]
    fn test_dispatch() {
        let mut tally = Tally::default();
        let r = Range::new(1.0, 2.0);

        dispatch(&mut tally, 0, BrushEvent::Start);
        dispatch(&mut tally, 0, BrushEvent::Brush { extent: r });
        dispatch(&mut tally, 0, BrushEvent::End { extent: None });

        assert_eq!(tally.starts, 1);
        assert_eq!(tally.brushes, vec![r]);
        assert_eq!(tally.ends, vec![None]);
    }

    #[test]
    fn test_render_triggers() {
        assert!(!BrushEvent::Start.triggers_render());
        assert!(BrushEvent::End { extent: None }.triggers_render());
    }
}
