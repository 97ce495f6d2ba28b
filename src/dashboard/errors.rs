//! # Dashboard Errors
//!
//! The coordinator performs no recovery. Chart and index failures propagate
//! unchanged and leave the readout from the previous pass in place.

use thiserror::Error;

use crate::chart::ChartError;
use crate::index::IndexError;

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    // ==================
    // Addressing Errors
    // ==================
    /// Chart position out of range
    #[error("No chart #{0}")]
    UnknownChart(usize),

    /// More filters than registered charts
    #[error("{given} filters given for {charts} charts")]
    TooManyFilters { given: usize, charts: usize },

    // ==================
    // Component Errors
    // ==================
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl DashboardError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::UnknownChart(_) => "CROSSVIEW_DASHBOARD_UNKNOWN_CHART",
            DashboardError::TooManyFilters { .. } => "CROSSVIEW_DASHBOARD_TOO_MANY_FILTERS",
            DashboardError::Chart(e) => e.code(),
            DashboardError::Index(e) => e.code().code(),
        }
    }
}
