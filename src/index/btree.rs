//! BTreeMap-based value trees
//!
//! Each dimension keeps `BTreeMap<IndexKey, Vec<RecordId>>` for deterministic
//! ordering. Record ids under one key are always sorted ascending.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use crate::record::RecordId;

/// Index key representing a derived attribute value.
///
/// Numbers are stored as order-preserving bits so every key has a total order.
/// Ordering is deterministic: Number < Text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Float value (stored as bits for total ordering)
    Number(u64),
    /// String value
    Text(String),
}

impl IndexKey {
    /// Create a key from a float
    ///
    /// Uses bit representation for total ordering. `-0.0` is folded into `0.0`
    /// so both land in the same bucket.
    pub fn from_number(v: f64) -> Self {
        let v = if v == 0.0 { 0.0 } else { v };
        let bits = v.to_bits();
        // Negative: flip all bits. Positive: flip sign bit.
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Number(ordered)
    }

    /// Create a key from a string
    pub fn from_text(v: impl Into<String>) -> Self {
        IndexKey::Text(v.into())
    }

    /// Recover the float for a numeric key
    pub fn as_number(&self) -> Option<f64> {
        match self {
            IndexKey::Number(ordered) => {
                let bits = if (ordered >> 63) == 1 {
                    ordered ^ (1 << 63)
                } else {
                    !ordered
                };
                Some(f64::from_bits(bits))
            }
            IndexKey::Text(_) => None,
        }
    }

    /// Borrow the string for a text key
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IndexKey::Text(s) => Some(s),
            IndexKey::Number(_) => None,
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Text(s) => write!(f, "{}", s),
            IndexKey::Number(_) => write!(f, "{}", self.as_number().unwrap_or(f64::NAN)),
        }
    }
}

impl Serialize for IndexKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            IndexKey::Text(s) => serializer.serialize_str(s),
            IndexKey::Number(_) => serializer.serialize_f64(self.as_number().unwrap_or(f64::NAN)),
        }
    }
}

/// A single dimension's sorted values.
#[derive(Debug, Default)]
pub struct ValueTree {
    /// Maps key values to sorted lists of record ids
    tree: BTreeMap<IndexKey, Vec<RecordId>>,
}

impl ValueTree {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    /// Insert a record id for a key.
    ///
    /// Maintains sorted ascending order.
    pub fn insert(&mut self, key: IndexKey, id: RecordId) {
        let ids = self.tree.entry(key).or_default();

        match ids.binary_search(&id) {
            Ok(_) => {}
            Err(pos) => ids.insert(pos, id),
        }
    }

    /// Ids whose key lies in the half-open range `[low, high)`.
    ///
    /// Returned in key order, ids ascending within one key.
    pub fn lookup_range(&self, low: &IndexKey, high: &IndexKey) -> Vec<RecordId> {
        if low >= high {
            return Vec::new();
        }

        let mut result = Vec::new();
        for (_, ids) in self
            .tree
            .range((Bound::Included(low), Bound::Excluded(high)))
        {
            result.extend(ids);
        }
        result
    }

    /// Iterate `(key, id)` pairs from the highest key down.
    ///
    /// Within one key, ids are yielded descending.
    pub fn iter_desc(&self) -> impl Iterator<Item = (&IndexKey, RecordId)> + '_ {
        self.tree
            .iter()
            .rev()
            .flat_map(|(key, ids)| ids.iter().rev().map(move |id| (key, *id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> RecordId {
        RecordId::new(i)
    }

    #[test]
    fn test_key_ordering() {
        let keys = vec![
            IndexKey::from_number(f64::NEG_INFINITY),
            IndexKey::from_number(-100.5),
            IndexKey::from_number(-1.0),
            IndexKey::from_number(0.0),
            IndexKey::from_number(0.25),
            IndexKey::from_number(100.0),
            IndexKey::from_text("aaa"),
            IndexKey::from_text("zzz"),
        ];

        for i in 1..keys.len() {
            assert!(keys[i - 1] < keys[i], "Keys should be ordered");
        }
    }

    #[test]
    fn test_number_round_trips_through_key() {
        for v in [-60.0, -0.5, 0.0, 149.0, 1999.0, 9.87e8] {
            assert_eq!(IndexKey::from_number(v).as_number(), Some(v));
        }
        assert_eq!(IndexKey::from_number(-0.0), IndexKey::from_number(0.0));
        assert_eq!(IndexKey::from_text("SFO").as_number(), None);
    }

    #[test]
    fn test_ids_sorted_within_key() {
        let mut tree = ValueTree::new();
        let key = IndexKey::from_number(42.0);

        tree.insert(key.clone(), id(3));
        tree.insert(key.clone(), id(1));
        tree.insert(key.clone(), id(2));
        tree.insert(key.clone(), id(2));

        let ids: Vec<RecordId> = tree.iter_desc().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![id(3), id(2), id(1)]);
    }

    #[test]
    fn test_lookup_range_is_half_open() {
        let mut tree = ValueTree::new();
        for v in 1..=5 {
            tree.insert(IndexKey::from_number(v as f64), id(v * 100));
        }

        let ids = tree.lookup_range(&IndexKey::from_number(2.0), &IndexKey::from_number(4.0));
        assert_eq!(ids, vec![id(200), id(300)]);
    }

    #[test]
    fn test_lookup_range_empty_or_inverted() {
        let mut tree = ValueTree::new();
        tree.insert(IndexKey::from_number(1.0), id(0));

        let one = IndexKey::from_number(1.0);
        assert!(tree.lookup_range(&one, &one).is_empty());
        assert!(tree
            .lookup_range(&IndexKey::from_number(5.0), &IndexKey::from_number(0.0))
            .is_empty());
    }

    #[test]
    fn test_iter_desc() {
        let mut tree = ValueTree::new();
        tree.insert(IndexKey::from_number(1.0), id(0));
        tree.insert(IndexKey::from_number(3.0), id(1));
        tree.insert(IndexKey::from_number(3.0), id(2));
        tree.insert(IndexKey::from_number(2.0), id(3));

        let order: Vec<RecordId> = tree.iter_desc().map(|(_, id)| id).collect();
        assert_eq!(order, vec![id(2), id(1), id(3), id(0)]);
    }
}
