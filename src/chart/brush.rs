//! Brush state machine
//!
//! ```text
//! Idle --start--> Selecting --move--> Selecting --end(non-empty)--> Active
//!                     |                                   \
//!                     +--end(empty)--> Idle                start
//!                                                            \
//!                                                         Selecting
//! ```
//!
//! The brush only computes and stores extents. Filter calls are made by the
//! owning chart, which commits a new extent only after the index accepted it.

use serde::{Deserialize, Serialize};

use super::config::Rounder;
use super::scale::LinearScale;
use crate::index::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushState {
    /// No extent
    Idle,
    /// Drag in progress
    Selecting,
    /// Non-empty extent, no drag
    Active,
}

/// One pointer step of a brush drag, in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum BrushGesture {
    Start { x: f64 },
    Move { x: f64 },
    End,
}

#[derive(Debug, Clone)]
pub struct Brush {
    state: BrushState,
    /// Pixel where the current drag started
    anchor: Option<f64>,
    extent: Option<Range>,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new()
    }
}

impl Brush {
    pub fn new() -> Self {
        Self {
            state: BrushState::Idle,
            anchor: None,
            extent: None,
        }
    }

    pub fn state(&self) -> BrushState {
        self.state
    }

    pub fn extent(&self) -> Option<Range> {
        self.extent
    }

    /// True when there is no extent or it has zero width
    pub fn is_empty(&self) -> bool {
        self.extent.map_or(true, |e| e.is_empty())
    }

    pub fn is_selecting(&self) -> bool {
        self.state == BrushState::Selecting
    }

    /// Begin a drag at pixel `x`, dropping any previous extent.
    ///
    /// A drag that ends without moving is a click and clears the selection.
    pub fn begin(&mut self, x: f64) {
        self.anchor = Some(x);
        self.extent = None;
        self.state = BrushState::Selecting;
    }

    /// Extent the drag would cover if the pointer were at `x`.
    ///
    /// Pixels are clamped to the scale's range; `round` snaps both ends.
    pub fn extent_at(&self, x: f64, scale: &LinearScale, round: Option<Rounder>) -> Option<Range> {
        let anchor = self.anchor?;
        let (min_px, max_px) = scale.range_extent();
        let a = anchor.clamp(min_px, max_px);
        let b = x.clamp(min_px, max_px);

        let (v0, v1) = (scale.invert(a.min(b)), scale.invert(a.max(b)));
        let range = Range::new(v0.min(v1), v0.max(v1));
        Some(match round {
            Some(f) => range.map(f),
            None => range,
        })
    }

    /// Store the extent computed during a drag
    pub fn update(&mut self, extent: Range) {
        self.extent = Some(extent);
    }

    /// End the drag. Returns the surviving extent, `None` if it was empty.
    pub fn finish(&mut self) -> Option<Range> {
        self.anchor = None;
        if self.is_empty() {
            self.clear();
            None
        } else {
            self.state = BrushState::Active;
            self.extent
        }
    }

    /// Set the extent programmatically
    pub fn set(&mut self, extent: Range) {
        self.anchor = None;
        self.extent = Some(extent);
        self.state = BrushState::Active;
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.extent = None;
        self.state = BrushState::Idle;
    }
}
