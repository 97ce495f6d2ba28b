//! In-memory multi-dimensional filter index
//!
//! Every record carries a filter bitmask with one bit per dimension. A bit is
//! set while the record fails that dimension's filter; a record is matched when
//! its mask is zero.
//!
//! # Invariants
//!
//! - Each dimension holds exactly one filter state, replaced atomically
//! - A group ignores its own dimension's bit (self-exclusion)
//! - Group keys are fixed when the group is built; buckets may drop to zero
//!   but never disappear

use std::collections::BTreeMap;

use tracing::trace;

use super::btree::{IndexKey, ValueTree};
use super::errors::{IndexError, IndexResult};
use super::range::{Bucket, DimensionId, GroupId, Range};
use super::FilterIndex;
use crate::record::{Record, RecordId, RecordStore};

/// Derives a dimension value from a record
pub type Accessor = fn(&Record) -> IndexKey;

/// Maps a dimension value to its bucket key
pub type Bucketer = fn(&IndexKey) -> IndexKey;

/// Number of filter bits per record
pub const MAX_DIMENSIONS: usize = 32;

#[derive(Debug)]
struct Dimension {
    name: String,
    bit: u32,
    /// Value per record, by identity
    values: Vec<IndexKey>,
    tree: ValueTree,
    filter: Option<Range>,
}

impl Dimension {
    fn mask(&self) -> u32 {
        1 << self.bit
    }
}

#[derive(Debug)]
struct Group {
    name: String,
    dimension: DimensionId,
    /// Bucket key per record, by identity
    keys: Vec<IndexKey>,
    /// Distinct bucket keys, ascending
    buckets: Vec<IndexKey>,
}

/// Crossfilter-style index over one `RecordStore`.
#[derive(Debug)]
pub struct Crossfilter {
    store: RecordStore,
    masks: Vec<u32>,
    dimensions: Vec<Dimension>,
    groups: Vec<Group>,
}

impl Crossfilter {
    /// Build an index over a finished store. No dimensions yet.
    pub fn new(store: RecordStore) -> Self {
        let masks = vec![0; store.len()];
        Self {
            store,
            masks,
            dimensions: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Register a dimension keyed by `accessor`.
    pub fn dimension(&mut self, name: impl Into<String>, accessor: Accessor) -> IndexResult<DimensionId> {
        if self.dimensions.len() >= MAX_DIMENSIONS {
            return Err(IndexError::dimension_limit(MAX_DIMENSIONS));
        }

        let values: Vec<IndexKey> = self.store.iter().map(accessor).collect();
        let mut tree = ValueTree::new();
        for (record, value) in self.store.iter().zip(&values) {
            tree.insert(value.clone(), record.identity);
        }

        let id = DimensionId(self.dimensions.len());
        self.dimensions.push(Dimension {
            name: name.into(),
            bit: id.0 as u32,
            values,
            tree,
            filter: None,
        });
        Ok(id)
    }

    /// Register a group on `dimension`, bucketing values with `bucketer`.
    pub fn group(
        &mut self,
        dimension: DimensionId,
        name: impl Into<String>,
        bucketer: Bucketer,
    ) -> IndexResult<GroupId> {
        let dim = self.dim(dimension)?;
        let keys: Vec<IndexKey> = dim.values.iter().map(bucketer).collect();

        let mut buckets = keys.clone();
        buckets.sort();
        buckets.dedup();

        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name: name.into(),
            dimension,
            keys,
            buckets,
        });
        Ok(id)
    }

    /// Current filter of a dimension
    pub fn filter_of(&self, dimension: DimensionId) -> IndexResult<Option<Range>> {
        Ok(self.dim(dimension)?.filter)
    }

    /// Name given at registration
    pub fn dimension_name(&self, dimension: DimensionId) -> IndexResult<&str> {
        Ok(&self.dim(dimension)?.name)
    }

    /// Name given at registration
    pub fn group_name(&self, group: GroupId) -> IndexResult<&str> {
        Ok(&self.grp(group)?.name)
    }

    /// Dimension a group was built on
    pub fn group_dimension(&self, group: GroupId) -> IndexResult<DimensionId> {
        Ok(self.grp(group)?.dimension)
    }

    /// Underlying records
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn dim(&self, dimension: DimensionId) -> IndexResult<&Dimension> {
        self.dimensions
            .get(dimension.0)
            .ok_or_else(|| IndexError::unknown_dimension(dimension.0))
    }

    fn grp(&self, group: GroupId) -> IndexResult<&Group> {
        self.groups
            .get(group.0)
            .ok_or_else(|| IndexError::unknown_group(group.0))
    }
}

impl FilterIndex for Crossfilter {
    fn filter_range(&mut self, dimension: DimensionId, range: Range) -> IndexResult<()> {
        if range.low.is_nan() || range.high.is_nan() || range.low > range.high {
            return Err(IndexError::invalid_range(range.low, range.high));
        }

        let dim = self
            .dimensions
            .get_mut(dimension.0)
            .ok_or_else(|| IndexError::unknown_dimension(dimension.0))?;
        let bit = dim.mask();

        for mask in self.masks.iter_mut() {
            *mask |= bit;
        }
        let low = IndexKey::from_number(range.low);
        let high = IndexKey::from_number(range.high);
        for id in dim.tree.lookup_range(&low, &high) {
            self.masks[id.index()] &= !bit;
        }
        dim.filter = Some(range);

        trace!(dimension = %dim.name, low = range.low, high = range.high, "filter_range");
        Ok(())
    }

    fn filter_all(&mut self, dimension: DimensionId) -> IndexResult<()> {
        let dim = self
            .dimensions
            .get_mut(dimension.0)
            .ok_or_else(|| IndexError::unknown_dimension(dimension.0))?;
        let bit = dim.mask();

        for mask in self.masks.iter_mut() {
            *mask &= !bit;
        }
        dim.filter = None;

        trace!(dimension = %dim.name, "filter_all");
        Ok(())
    }

    fn top(&self, dimension: DimensionId, n: usize) -> IndexResult<Vec<RecordId>> {
        let dim = self.dim(dimension)?;
        Ok(dim
            .tree
            .iter_desc()
            .filter(|(_, id)| self.masks[id.index()] == 0)
            .map(|(_, id)| id)
            .take(n)
            .collect())
    }

    fn group_all(&self, group: GroupId) -> IndexResult<Vec<Bucket>> {
        let grp = self.grp(group)?;
        let own = self.dim(grp.dimension)?.mask();

        let mut counts: BTreeMap<&IndexKey, u64> = grp.buckets.iter().map(|k| (k, 0)).collect();
        for (key, mask) in grp.keys.iter().zip(&self.masks) {
            if mask & !own == 0 {
                if let Some(count) = counts.get_mut(key) {
                    *count += 1;
                }
            }
        }

        Ok(counts
            .into_iter()
            .map(|(key, value)| Bucket {
                key: key.clone(),
                value,
            })
            .collect())
    }

    fn group_top(&self, group: GroupId, n: usize) -> IndexResult<Vec<Bucket>> {
        let mut buckets = self.group_all(group)?;
        // Stable sort keeps ascending keys among equal values
        buckets.sort_by(|a, b| b.value.cmp(&a.value));
        buckets.truncate(n);
        Ok(buckets)
    }

    fn record(&self, id: RecordId) -> Option<&Record> {
        self.store.get(id)
    }

    fn matched_count(&self) -> usize {
        self.masks.iter().filter(|m| **m == 0).count()
    }

    fn size(&self) -> usize {
        self.store.len()
    }
}
