//! Record and store types

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Stable record identity, assigned once at ingestion (positional index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(usize);

impl RecordId {
    /// Create an identity from a positional index
    pub fn new(index: usize) -> Self {
        RecordId(index)
    }

    /// Returns the positional index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single flight record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Positional identity
    pub identity: RecordId,
    /// Scheduled departure
    pub timestamp: NaiveDateTime,
    /// Arrival delay in minutes (negative = early)
    pub delay_minutes: f64,
    /// Distance in miles
    pub distance: f64,
    /// Origin airport code
    pub origin: String,
    /// Destination airport code
    pub destination: String,
}

impl Record {
    /// Calendar day of the departure
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Immutable record collection.
///
/// Only produced by `RecordLoader::finish`, so every record's identity
/// equals its position.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Lookup a record by identity
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// All records in identity order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in identity order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
