//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in a dashboard session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Records ingested into a store
    IngestComplete,
    /// First coordinated render done
    DashboardMounted,
    /// Session input exhausted
    SessionEnd,

    // Filtering
    /// A chart's dimension filter changed
    ChartFilterChanged,
    /// Several filters applied in one batch
    FiltersApplied,
    /// One chart's filter cleared from its reset affordance
    FilterReset,

    // Rendering
    /// Coordinated render of every view
    RenderPass,
    /// Single view re-rendered
    ViewRendered,
    /// Command rejected
    CommandRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::IngestComplete => "INGEST_COMPLETE",
            Event::DashboardMounted => "DASHBOARD_MOUNTED",
            Event::SessionEnd => "SESSION_END",

            Event::ChartFilterChanged => "CHART_FILTER_CHANGED",
            Event::FiltersApplied => "FILTERS_APPLIED",
            Event::FilterReset => "FILTER_RESET",

            Event::RenderPass => "RENDER_PASS",
            Event::ViewRendered => "VIEW_RENDERED",
            Event::CommandRejected => "COMMAND_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
