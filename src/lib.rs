//! crossview - linked multi-view filtering over in-memory flight records
//!
//! Brushing one chart narrows every other chart, the detail list and the
//! matched-count readout in one coordinated render pass.

pub mod chart;
pub mod cli;
pub mod dashboard;
pub mod index;
pub mod list;
pub mod observability;
pub mod record;
