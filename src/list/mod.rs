//! Detail list subsystem
//!
//! # Design Principles
//!
//! - Keyed reconciliation: day key for groups, record identity for rows
//! - Nodes live in a generational arena; ids stay valid while listed
//! - Row cells are fixed at creation since records never change
//!
//! # Invariants
//!
//! - A record listed in two consecutive renders keeps the same node
//! - Display order follows the dimension's descending order

mod arena;
mod component;
mod format;

pub use arena::{Arena, NodeId};
pub use component::{
    DayView, FlightRow, ListComponent, ListNode, ReconcileStats, RowView, DEFAULT_LIST_LIMIT,
};
pub use format::{format_change, format_day, format_number, format_time};
