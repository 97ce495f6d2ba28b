//! Record ingestion
//!
//! Input is CSV text (RFC 4180 quoting) with header
//! `date,delay,distance,origin,destination`.
//! `date` is `MMDDHHmm` inside a configured base year.
//!
//! Rows are coerced once; identities are assigned in input order.
//! `finish()` hands out the immutable store and is the only way to obtain one.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use super::errors::{IngestError, IngestResult};
use super::types::{Record, RecordId, RecordStore};
use crate::observability::Event;

/// Base year applied to `MMDDHHmm` timestamps
pub const DEFAULT_BASE_YEAR: i32 = 2001;

const COLUMNS: [&str; 5] = ["date", "delay", "distance", "origin", "destination"];

/// Parse an `MMDDHHmm` timestamp in `year`.
///
/// Day, hour and minute overflow roll forward (e.g. `01312400` is Feb 1 00:00).
pub fn parse_timestamp(raw: &str, year: i32) -> Option<NaiveDateTime> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: u32 = raw[0..2].parse().ok()?;
    let day: i64 = raw[2..4].parse().ok()?;
    let hour: i64 = raw[4..6].parse().ok()?;
    let minute: i64 = raw[6..8].parse().ok()?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    first.checked_add_signed(
        Duration::days(day - 1) + Duration::hours(hour) + Duration::minutes(minute),
    )
}

/// Accumulates records until ingestion is complete.
#[derive(Debug)]
pub struct RecordLoader {
    base_year: i32,
    records: Vec<Record>,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_YEAR)
    }
}

impl RecordLoader {
    /// Creates an empty loader for timestamps in `base_year`
    pub fn new(base_year: i32) -> Self {
        Self {
            base_year,
            records: Vec::new(),
        }
    }

    /// Append an already-typed record; identity is assigned here.
    pub fn push(
        &mut self,
        timestamp: NaiveDateTime,
        delay_minutes: f64,
        distance: f64,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> RecordId {
        let identity = RecordId::new(self.records.len());
        self.records.push(Record {
            identity,
            timestamp,
            delay_minutes,
            distance,
            origin: origin.into(),
            destination: destination.into(),
        });
        identity
    }

    /// Ingest CSV text. The first record must be the header; blank lines
    /// are skipped and fields may be quoted.
    ///
    /// Fails on the first malformed row; records pushed before the error
    /// remain in the loader.
    pub fn load_csv(&mut self, text: &str) -> IngestResult<usize> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let header = reader
            .headers()
            .map_err(|e| IngestError::bad_header(e.to_string()))?;
        if header.is_empty() {
            return Ok(0);
        }
        let positions = Self::column_positions(header)?;

        let mut added = 0;
        for row in reader.records() {
            let row = row.map_err(|e| {
                let line = e.position().map_or(0, |p| p.line() as usize);
                IngestError::malformed_row(line, e.to_string())
            })?;
            let line_no = row.position().map_or(0, |p| p.line() as usize);
            let field = |col: usize| Self::column(&row, positions[col], col, line_no);

            let raw_date = field(0)?;
            let timestamp = parse_timestamp(raw_date, self.base_year).ok_or_else(|| {
                IngestError::malformed_row(line_no, format!("invalid date '{}'", raw_date))
            })?;
            let delay = Self::parse_number(field(1)?, "delay", line_no)?;
            let distance = Self::parse_number(field(2)?, "distance", line_no)?;
            let (origin, destination) = (field(3)?, field(4)?);

            self.push(timestamp, delay, distance, origin, destination);
            added += 1;
        }

        Ok(added)
    }

    /// Number of records pushed so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ready signal: ingestion is complete, hand out the immutable store.
    pub fn finish(self) -> RecordStore {
        info!(
            event = %Event::IngestComplete,
            records = self.records.len(),
            base_year = self.base_year,
            "record store ready"
        );
        RecordStore::from_records(self.records)
    }

    fn column_positions(header: &StringRecord) -> IngestResult<[usize; 5]> {
        let mut positions = [0usize; 5];
        for (slot, column) in COLUMNS.iter().enumerate() {
            positions[slot] = header
                .iter()
                .position(|n| n == *column)
                .ok_or_else(|| IngestError::bad_header(format!("missing column '{}'", column)))?;
        }
        Ok(positions)
    }

    fn column<'a>(row: &'a StringRecord, pos: usize, col: usize, line: usize) -> IngestResult<&'a str> {
        row.get(pos).ok_or_else(|| {
            IngestError::malformed_row(line, format!("missing column '{}'", COLUMNS[col]))
        })
    }

    fn parse_number(raw: &str, column: &str, line: usize) -> IngestResult<f64> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| IngestError::malformed_row(line, format!("invalid {} '{}'", column, raw)))
    }
}
