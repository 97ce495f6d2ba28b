//! Filter index subsystem
//!
//! Dimensions and groups are derived, in-memory-only state built from a
//! finished `RecordStore`.
//!
//! # Design Principles
//!
//! - Derived state: the index mirrors the store, never the source of truth
//! - Deterministic: BTreeMap iteration order, ids ascending within a key
//! - One filter per dimension, replaced atomically
//!
//! # Invariants
//!
//! - A group never sees its own dimension's filter (self-exclusion)
//! - The matched set is the intersection of every dimension's filter

mod btree;
mod crossfilter;
mod errors;
mod range;

pub use btree::{IndexKey, ValueTree};
pub use crossfilter::{Accessor, Bucketer, Crossfilter, MAX_DIMENSIONS};
pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use range::{Bucket, DimensionId, GroupId, Range};

use crate::record::{Record, RecordId};

/// Dimension/group capability consumed by charts, the list and the
/// render coordinator.
pub trait FilterIndex {
    /// Replace a dimension's filter with `[low, high)`
    fn filter_range(&mut self, dimension: DimensionId, range: Range) -> IndexResult<()>;

    /// Clear a dimension's filter
    fn filter_all(&mut self, dimension: DimensionId) -> IndexResult<()>;

    /// Up to `n` matched records with the highest dimension values, descending
    fn top(&self, dimension: DimensionId, n: usize) -> IndexResult<Vec<RecordId>>;

    /// Every bucket in key order, counted over the other dimensions' filters
    fn group_all(&self, group: GroupId) -> IndexResult<Vec<Bucket>>;

    /// Up to `n` buckets by descending value
    fn group_top(&self, group: GroupId, n: usize) -> IndexResult<Vec<Bucket>>;

    /// Lookup a record by identity
    fn record(&self, id: RecordId) -> Option<&Record>;

    /// Records passing every dimension's filter
    fn matched_count(&self) -> usize;

    /// Total records
    fn size(&self) -> usize;
}
