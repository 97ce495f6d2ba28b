//! Record Store subsystem
//!
//! Holds the immutable, post-ingestion collection of flight records.
//!
//! # Lifecycle
//!
//! - `RecordLoader` accepts raw CSV rows or typed records
//! - `RecordLoader::finish()` is the explicit ready signal
//! - `RecordStore` is immutable afterwards; identities are positional and never reused
//!
//! Dimensions are only ever built from a finished `RecordStore`.

mod errors;
mod loader;
mod types;

pub use errors::{IngestError, IngestErrorCode, IngestResult};
pub use loader::{parse_timestamp, RecordLoader, DEFAULT_BASE_YEAR};
pub use types::{Record, RecordId, RecordStore};
