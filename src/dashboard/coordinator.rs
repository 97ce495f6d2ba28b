//! Render coordinator
//!
//! Owns the index, the charts in registration order, and the list. Every
//! filter change ends in exactly one `render_all`.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::errors::{DashboardError, DashboardResult};
use crate::chart::{dispatch, BrushEvent, BrushGesture, BrushListener, BrushState, Chart, ChartConfig, ChartView};
use crate::index::{Bucket, Crossfilter, FilterIndex, GroupId, Range};
use crate::list::{format_number, DayView, ListComponent};
use crate::observability::{Event, MetricsRegistry, MetricsSnapshot};

/// Buckets reported per summary group in a snapshot
const SUMMARY_TOP: usize = 5;

/// One renderable view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRef {
    Chart(usize),
    List,
}

/// Matched / total record counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Readout {
    pub matched: usize,
    pub total: usize,
}

impl Readout {
    /// Both counts with thousands separators
    pub fn display(&self) -> (String, String) {
        (
            format_number(self.matched as f64),
            format_number(self.total as f64),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSnapshot {
    pub id: usize,
    pub state: BrushState,
    pub extent: Option<Range>,
    pub view: Option<ChartView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub top: Vec<Bucket>,
}

/// Serializable state of the whole dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub readout: Option<Readout>,
    /// `[matched, total]` as shown to the user
    pub readout_text: Option<(String, String)>,
    pub charts: Vec<ChartSnapshot>,
    pub list: Vec<DayView>,
    pub summaries: Vec<GroupSummary>,
    pub metrics: MetricsSnapshot,
}

pub struct Dashboard<I: FilterIndex = Crossfilter> {
    index: I,
    charts: Vec<Chart>,
    list: ListComponent,
    summaries: Vec<(String, GroupId)>,
    listeners: Vec<Box<dyn BrushListener>>,
    total: Option<usize>,
    readout: Option<Readout>,
    metrics: MetricsRegistry,
}

impl<I: FilterIndex> Dashboard<I> {
    pub fn new(index: I, list: ListComponent) -> Self {
        Self {
            index,
            charts: Vec::new(),
            list,
            summaries: Vec::new(),
            listeners: Vec::new(),
            total: None,
            readout: None,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Register a chart after the existing ones. Returns its position.
    ///
    /// The chart's initial filter is applied to the index immediately.
    pub fn add_chart(&mut self, config: ChartConfig) -> DashboardResult<usize> {
        let id = self.charts.len();
        let chart = Chart::new(id, config, &mut self.index)?;
        self.charts.push(chart);
        Ok(id)
    }

    /// Report the top buckets of `group` in snapshots
    pub fn add_summary_group(&mut self, name: impl Into<String>, group: GroupId) {
        self.summaries.push((name.into(), group));
    }

    pub fn subscribe(&mut self, listener: Box<dyn BrushListener>) {
        self.listeners.push(listener);
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    pub fn chart(&self, id: usize) -> Option<&Chart> {
        self.charts.get(id)
    }

    pub fn list(&self) -> &ListComponent {
        &self.list
    }

    /// Readout of the last completed pass, `None` before the first
    pub fn readout(&self) -> Option<Readout> {
        self.readout
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Record the total once and run the first coordinated pass.
    pub fn mount(&mut self) -> DashboardResult<()> {
        let total = self.index.size();
        self.total = Some(total);
        self.render_all()?;
        info!(
            event = %Event::DashboardMounted,
            charts = self.charts.len(),
            total,
            "dashboard mounted"
        );
        Ok(())
    }

    /// Charts in order, then the list, then the readout.
    ///
    /// The readout is written last so an earlier failure leaves it stale.
    pub fn render_all(&mut self) -> DashboardResult<()> {
        for chart in self.charts.iter_mut() {
            chart.render(&self.index)?;
        }
        self.list.render(&self.index)?;

        let total = *self.total.get_or_insert_with(|| self.index.size());
        let readout = Readout {
            matched: self.index.matched_count(),
            total,
        };
        self.readout = Some(readout);
        self.metrics.increment_render_passes();

        debug!(
            event = %Event::RenderPass,
            matched = readout.matched,
            total = readout.total,
            "render pass"
        );
        Ok(())
    }

    /// Render one view without touching the readout.
    pub fn render(&mut self, view: ViewRef) -> DashboardResult<()> {
        match view {
            ViewRef::Chart(id) => {
                let chart = self.charts.get_mut(id).ok_or(DashboardError::UnknownChart(id))?;
                chart.render(&self.index)?;
            }
            ViewRef::List => {
                self.list.render(&self.index)?;
            }
        }
        self.metrics.increment_view_renders();
        debug!(event = %Event::ViewRendered, view = ?view, "view rendered");
        Ok(())
    }

    /// Deliver one brush gesture to a chart.
    ///
    /// Listeners see every event; `brush` and `brush_end` each trigger one
    /// coordinated pass.
    pub fn brush(&mut self, chart: usize, gesture: BrushGesture) -> DashboardResult<BrushEvent> {
        let result = self.deliver(chart, gesture);
        self.counted(result)
    }

    fn deliver(&mut self, chart: usize, gesture: BrushGesture) -> DashboardResult<BrushEvent> {
        let target = self
            .charts
            .get_mut(chart)
            .ok_or(DashboardError::UnknownChart(chart))?;

        let event = target.handle(&mut self.index, gesture)?;
        self.metrics.increment_brush_gestures();

        for listener in self.listeners.iter_mut() {
            dispatch(listener.as_mut(), chart, event);
        }
        if event.triggers_render() {
            self.render_all()?;
        }
        Ok(event)
    }

    /// Set or clear filters by chart position, then render once.
    ///
    /// Entry `i` applies to chart `i`; charts past the end of `filters` are
    /// left alone.
    pub fn apply_filters(&mut self, filters: &[Option<Range>]) -> DashboardResult<()> {
        let result = self.apply_all(filters);
        self.counted(result)
    }

    fn apply_all(&mut self, filters: &[Option<Range>]) -> DashboardResult<()> {
        if filters.len() > self.charts.len() {
            return Err(DashboardError::TooManyFilters {
                given: filters.len(),
                charts: self.charts.len(),
            });
        }

        for (chart, filter) in self.charts.iter_mut().zip(filters) {
            chart.filter(&mut self.index, *filter)?;
        }
        self.metrics.add_filters_applied(filters.len() as u64);
        info!(event = %Event::FiltersApplied, count = filters.len(), "filters applied");

        self.render_all()
    }

    /// Set or clear one chart's filter, leaving the others, then render.
    pub fn set_filter(&mut self, chart: usize, range: Option<Range>) -> DashboardResult<()> {
        let result = self.apply_one(chart, range);
        self.counted(result)
    }

    fn apply_one(&mut self, chart: usize, range: Option<Range>) -> DashboardResult<()> {
        let target = self
            .charts
            .get_mut(chart)
            .ok_or(DashboardError::UnknownChart(chart))?;
        target.filter(&mut self.index, range)?;
        self.metrics.add_filters_applied(1);

        self.render_all()
    }

    /// Clear one chart's filter, as its reset affordance does, then render.
    pub fn reset_filter(&mut self, chart: usize) -> DashboardResult<()> {
        let result = self.clear_one(chart);
        self.counted(result)
    }

    fn clear_one(&mut self, chart: usize) -> DashboardResult<()> {
        let target = self
            .charts
            .get_mut(chart)
            .ok_or(DashboardError::UnknownChart(chart))?;
        target.filter(&mut self.index, None)?;
        self.metrics.increment_resets();
        info!(event = %Event::FilterReset, chart, "filter reset");

        self.render_all()
    }

    /// Count and log a refused command. Dashboard operations call this on
    /// their own failures; callers use it for input they could not decode.
    pub fn reject(&self, code: &str, error: &dyn fmt::Display) {
        self.metrics.increment_rejected();
        warn!(event = %Event::CommandRejected, code, error = %error, "command rejected");
    }

    fn counted<T>(&self, result: DashboardResult<T>) -> DashboardResult<T> {
        if let Err(e) = &result {
            self.reject(e.code(), e);
        }
        result
    }

    pub fn snapshot(&self) -> DashboardResult<DashboardSnapshot> {
        let charts = self
            .charts
            .iter()
            .map(|chart| ChartSnapshot {
                id: chart.id(),
                state: chart.brush_state(),
                extent: chart.extent(),
                view: chart.view().cloned(),
            })
            .collect();

        let mut summaries = Vec::with_capacity(self.summaries.len());
        for (name, group) in &self.summaries {
            summaries.push(GroupSummary {
                name: name.clone(),
                top: self.index.group_top(*group, SUMMARY_TOP)?,
            });
        }

        Ok(DashboardSnapshot {
            readout: self.readout,
            readout_text: self.readout.map(|r| r.display()),
            charts,
            list: self.list.view(),
            summaries,
            metrics: self.metrics.snapshot(),
        })
    }
}
