//! Chart component
//!
//! One bar histogram bound to a single dimension/group pair, with a brush
//! overlaid. The chart keeps the dimension's filter in step with the brush
//! extent and owns its reset affordance.
//!
//! # Rendering
//!
//! - Y domain is `[0, top bucket value]`, recomputed on every render
//! - Brush visuals (clip and reset) are redrawn by `render` only when the
//!   extent was set programmatically; drags update the clip directly
//! - A filter set before the first render survives until mount

use serde::Serialize;
use tracing::{debug, info};

use super::brush::{Brush, BrushGesture, BrushState};
use super::config::ChartConfig;
use super::errors::{ChartError, ChartResult};
use super::events::BrushEvent;
use crate::index::{Bucket, FilterIndex, Range};
use crate::observability::Event;

/// Region of the foreground bars left undimmed, in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipRect {
    pub x: f64,
    pub width: f64,
}

impl ClipRect {
    pub fn full(width: f64) -> Self {
        Self { x: 0.0, width }
    }
}

/// The chart title's "reset" link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResetAffordance {
    /// Chart the link resets
    pub chart: usize,
    pub visible: bool,
}

/// Mounted presentation of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// SVG path for the bars
    pub bars: String,
    pub clip: ClipRect,
    pub reset_visible: bool,
    pub y_max: f64,
    pub extent: Option<Range>,
    /// Completed render passes
    pub renders: u64,
    /// Times the brush visuals were redrawn from a programmatic filter
    pub brush_redraws: u64,
}

#[derive(Debug)]
pub struct Chart {
    id: usize,
    config: ChartConfig,
    brush: Brush,
    brush_dirty: bool,
    reset: ResetAffordance,
    clip: ClipRect,
    view: Option<ChartView>,
}

impl Chart {
    /// Build a chart and apply the configured initial filter.
    pub fn new<I: FilterIndex + ?Sized>(id: usize, config: ChartConfig, index: &mut I) -> ChartResult<Self> {
        let initial = config.initial_filter();
        let mut chart = Self {
            id,
            clip: ClipRect::full(config.width()),
            config,
            brush: Brush::new(),
            brush_dirty: false,
            reset: ResetAffordance {
                chart: id,
                visible: false,
            },
            view: None,
        };

        if initial.is_some() {
            chart.filter(index, initial)?;
        }
        Ok(chart)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn brush_state(&self) -> BrushState {
        self.brush.state()
    }

    pub fn extent(&self) -> Option<Range> {
        self.brush.extent()
    }

    pub fn reset_affordance(&self) -> ResetAffordance {
        self.reset
    }

    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// A programmatic filter is waiting for the next render
    pub fn is_brush_dirty(&self) -> bool {
        self.brush_dirty
    }

    pub fn is_mounted(&self) -> bool {
        self.view.is_some()
    }

    /// Last rendered presentation, `None` before mount
    pub fn view(&self) -> Option<&ChartView> {
        self.view.as_ref()
    }

    /// Feed one brush gesture through the state machine.
    ///
    /// On error nothing changes: the extent is committed only after the
    /// index accepted the new filter.
    pub fn handle<I: FilterIndex + ?Sized>(&mut self, index: &mut I, gesture: BrushGesture) -> ChartResult<BrushEvent> {
        match gesture {
            BrushGesture::Start { x } => {
                self.brush.begin(x);
                self.set_reset_visible(true);
                debug!(chart = self.id, x, "brush start");
                Ok(BrushEvent::Start)
            }
            BrushGesture::Move { x } => {
                if !self.brush.is_selecting() {
                    return Err(ChartError::NoDragInProgress("move"));
                }
                let extent = self
                    .brush
                    .extent_at(x, self.config.x_scale(), self.config.round())
                    .ok_or(ChartError::NoDragInProgress("move"))?;

                index.filter_range(self.config.dimension(), extent)?;
                self.brush.update(extent);
                self.set_clip(self.clip_for(Some(extent)));

                debug!(chart = self.id, low = extent.low, high = extent.high, "brush");
                Ok(BrushEvent::Brush { extent })
            }
            BrushGesture::End => {
                if !self.brush.is_selecting() {
                    return Err(ChartError::NoDragInProgress("end"));
                }
                if self.brush.is_empty() {
                    index.filter_all(self.config.dimension())?;
                }

                let extent = self.brush.finish();
                if extent.is_none() {
                    self.set_reset_visible(false);
                    self.set_clip(ClipRect::full(self.config.width()));
                }

                info!(
                    event = %Event::ChartFilterChanged,
                    chart = self.id,
                    title = %self.config.title(),
                    extent = ?extent,
                    "brush end"
                );
                Ok(BrushEvent::End { extent })
            }
        }
    }

    /// Set (`Some`) or clear (`None`) the filter programmatically.
    ///
    /// An empty range clears. Brush visuals are redrawn on the next render.
    pub fn filter<I: FilterIndex + ?Sized>(&mut self, index: &mut I, range: Option<Range>) -> ChartResult<()> {
        match range.filter(|r| !r.is_empty()) {
            Some(r) => {
                index.filter_range(self.config.dimension(), r)?;
                self.brush.set(r);
            }
            None => {
                index.filter_all(self.config.dimension())?;
                self.brush.clear();
            }
        }
        self.brush_dirty = true;

        info!(
            event = %Event::ChartFilterChanged,
            chart = self.id,
            title = %self.config.title(),
            extent = ?self.brush.extent(),
            "programmatic filter"
        );
        Ok(())
    }

    /// Render against current group state. Mounts on first call.
    pub fn render<I: FilterIndex + ?Sized>(&mut self, index: &I) -> ChartResult<()> {
        let group = self.config.group();
        let buckets = index.group_all(group)?;
        let y_max = index
            .group_top(group, 1)?
            .first()
            .map_or(0.0, |b| b.value as f64);
        let bars = self.bar_path(&buckets, y_max)?;

        let mut view = match self.view.take() {
            Some(view) => view,
            None => self.mount(),
        };

        if self.brush_dirty {
            self.brush_dirty = false;
            view.brush_redraws += 1;
            self.reset.visible = !self.brush.is_empty();
            self.clip = self.clip_for(self.brush.extent());
        }

        view.bars = bars;
        view.clip = self.clip;
        view.reset_visible = self.reset.visible;
        view.y_max = y_max;
        view.extent = self.brush.extent();
        view.renders += 1;
        self.view = Some(view);
        Ok(())
    }

    fn mount(&self) -> ChartView {
        debug!(chart = self.id, title = %self.config.title(), "mount");
        ChartView {
            title: self.config.title().to_string(),
            width: self.config.width(),
            height: self.config.height(),
            bars: String::new(),
            clip: ClipRect::full(self.config.width()),
            reset_visible: false,
            y_max: 0.0,
            extent: None,
            renders: 0,
            brush_redraws: 0,
        }
    }

    /// Clip for an extent; full width when there is none.
    ///
    /// A zero-width extent mid-drag gives a zero-width clip, matching the
    /// empty selection it filters to.
    fn clip_for(&self, extent: Option<Range>) -> ClipRect {
        match extent {
            Some(e) => {
                let x_scale = self.config.x_scale();
                let x0 = x_scale.apply(e.low);
                ClipRect {
                    x: x0,
                    width: (x_scale.apply(e.high) - x0).max(0.0),
                }
            }
            None => ClipRect::full(self.config.width()),
        }
    }

    fn set_clip(&mut self, clip: ClipRect) {
        self.clip = clip;
        if let Some(view) = self.view.as_mut() {
            view.clip = clip;
        }
    }

    fn set_reset_visible(&mut self, visible: bool) {
        self.reset.visible = visible;
        if let Some(view) = self.view.as_mut() {
            view.reset_visible = visible;
        }
    }

    fn bar_path(&self, buckets: &[Bucket], y_max: f64) -> ChartResult<String> {
        let x_scale = self.config.x_scale();
        let y_scale = self.config.y_scale().with_domain([0.0, y_max]);
        let height = self.config.height();
        let bar_width = self.config.bar_width();

        let mut path = String::with_capacity(buckets.len() * 24);
        for bucket in buckets {
            let key = bucket
                .key
                .as_number()
                .ok_or_else(|| ChartError::NonNumericBucket(bucket.key.to_string()))?;
            path.push_str(&format!(
                "M{},{}V{}h{}V{}",
                x_scale.apply(key),
                height,
                y_scale.apply(bucket.value as f64),
                bar_width,
                height
            ));
        }
        Ok(path)
    }
}
