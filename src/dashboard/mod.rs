//! Dashboard subsystem
//!
//! The explicit state object tying one index to its charts and list.
//!
//! # Design Principles
//!
//! - One owner: the dashboard holds the index, charts and list and lends
//!   the index to each component for the duration of a call
//! - No partial re-render: every filter change re-renders every view
//! - Fail loudly: errors propagate, the readout is never updated past one
//!
//! # Invariants
//!
//! - `render_all` order is charts by registration, then list, then readout
//! - Each accepted `brush`/`brush_end` triggers exactly one `render_all`

mod coordinator;
mod errors;
mod flights;

pub use coordinator::{
    ChartSnapshot, Dashboard, DashboardSnapshot, GroupSummary, Readout, ViewRef,
};
pub use errors::{DashboardError, DashboardResult};
pub use flights::{
    build_flight_dashboard, default_date_filter, round_to_day, FlightOptions, DATE_CHART,
    DELAY_CHART, DISTANCE_CHART, HOUR_CHART,
};
