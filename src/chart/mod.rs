//! Chart component subsystem
//!
//! Provides:
//! - `LinearScale`: value-to-pixel mapping
//! - `ChartConfig`: immutable configuration, built once
//! - `Brush`: the drag state machine
//! - `Chart`: histogram + brush bound to one dimension/group pair
//! - `BrushListener`: typed brush callbacks

mod brush;
mod component;
mod config;
mod errors;
mod events;
mod scale;

pub use brush::{Brush, BrushGesture, BrushState};
pub use component::{Chart, ChartView, ClipRect, ResetAffordance};
pub use config::{ChartConfig, ChartConfigBuilder, Margin, Rounder, DEFAULT_BAR_WIDTH, DEFAULT_HEIGHT};
pub use errors::{ChartError, ChartResult};
pub use events::{dispatch, BrushEvent, BrushListener};
pub use scale::LinearScale;
