//! Immutable chart configuration
//!
//! Built once through `ChartConfigBuilder`. Only the filter extent changes
//! after construction, and that lives on the `Chart`, not here.

use serde::Serialize;

use super::errors::{ChartError, ChartResult};
use super::scale::LinearScale;
use crate::index::{DimensionId, GroupId, Range};

/// Snapping function applied to brush extents before filtering
pub type Rounder = fn(f64) -> f64;

/// Default bar width in pixels (10px per bucket, 1px gap)
pub const DEFAULT_BAR_WIDTH: f64 = 9.0;

/// Default plot height in pixels
pub const DEFAULT_HEIGHT: f64 = 100.0;

/// Outer margins around the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 20.0,
            left: 10.0,
        }
    }
}

/// Everything a chart needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    title: String,
    margin: Margin,
    x_scale: LinearScale,
    y_scale: LinearScale,
    dimension: DimensionId,
    group: GroupId,
    round: Option<Rounder>,
    filter: Option<Range>,
    bar_width: f64,
}

impl ChartConfig {
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn round(&self) -> Option<Rounder> {
        self.round
    }

    /// Filter applied when the chart is constructed
    pub fn initial_filter(&self) -> Option<Range> {
        self.filter
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Plot width in pixels (upper end of the x range)
    pub fn width(&self) -> f64 {
        self.x_scale.range_extent().1
    }

    /// Plot height in pixels (upper end of the y range)
    pub fn height(&self) -> f64 {
        self.y_scale.range_extent().1
    }
}

/// Builder for `ChartConfig`.
///
/// `dimension`, `group` and `x_scale` are required.
#[derive(Debug, Clone)]
pub struct ChartConfigBuilder {
    title: String,
    margin: Margin,
    x_scale: Option<LinearScale>,
    y_scale: LinearScale,
    dimension: Option<DimensionId>,
    group: Option<GroupId>,
    round: Option<Rounder>,
    filter: Option<Range>,
    bar_width: f64,
}

impl Default for ChartConfigBuilder {
    fn default() -> Self {
        Self {
            title: String::new(),
            margin: Margin::default(),
            x_scale: None,
            y_scale: LinearScale::new([0.0, 0.0], [DEFAULT_HEIGHT, 0.0]),
            dimension: None,
            group: None,
            round: None,
            filter: None,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl ChartConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn x_scale(mut self, scale: LinearScale) -> Self {
        self.x_scale = Some(scale);
        self
    }

    /// Only the range matters; the domain is recomputed on every render
    pub fn y_scale(mut self, scale: LinearScale) -> Self {
        self.y_scale = scale;
        self
    }

    pub fn dimension(mut self, dimension: DimensionId) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    pub fn round(mut self, round: Rounder) -> Self {
        self.round = Some(round);
        self
    }

    pub fn filter(mut self, filter: Option<Range>) -> Self {
        self.filter = filter;
        self
    }

    pub fn bar_width(mut self, width: f64) -> Self {
        self.bar_width = width;
        self
    }

    pub fn build(self) -> ChartResult<ChartConfig> {
        Ok(ChartConfig {
            title: self.title,
            margin: self.margin,
            x_scale: self.x_scale.ok_or(ChartError::MissingXScale)?,
            y_scale: self.y_scale,
            dimension: self.dimension.ok_or(ChartError::MissingDimension)?,
            group: self.group.ok_or(ChartError::MissingGroup)?,
            round: self.round,
            filter: self.filter,
            bar_width: self.bar_width,
        })
    }
}
