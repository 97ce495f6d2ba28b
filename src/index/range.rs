//! Filter ranges, handles and group buckets

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::btree::IndexKey;

/// Half-open filter range `[low, high)`.
///
/// A range whose low bound is not strictly below its high bound selects
/// nothing and is considered empty (zero-width or inverted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Range over timestamps, in seconds since the epoch
    pub fn from_datetimes(low: NaiveDateTime, high: NaiveDateTime) -> Self {
        Self::new(
            low.and_utc().timestamp() as f64,
            high.and_utc().timestamp() as f64,
        )
    }

    /// True for zero-width, inverted or NaN ranges
    pub fn is_empty(&self) -> bool {
        !(self.low < self.high)
    }

    pub fn contains(&self, v: f64) -> bool {
        self.low <= v && v < self.high
    }

    /// Apply `f` to both bounds
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.low), f(self.high))
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

impl From<[f64; 2]> for Range {
    fn from(bounds: [f64; 2]) -> Self {
        Range::new(bounds[0], bounds[1])
    }
}

impl From<Range> for [f64; 2] {
    fn from(range: Range) -> Self {
        [range.low, range.high]
    }
}

/// Handle to a dimension registered on an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionId(pub(crate) usize);

impl DimensionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Handle to a group registered on an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One `(key, value)` group bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: IndexKey,
    pub value: u64,
}
