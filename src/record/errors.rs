//! Ingestion error types
//!
//! Error codes:
//! - CROSSVIEW_INGEST_MALFORMED_ROW
//! - CROSSVIEW_INGEST_BAD_HEADER

use std::fmt;

/// Ingestion error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestErrorCode {
    /// A data row could not be coerced into a record
    MalformedRow,
    /// Header row is missing a required column
    BadHeader,
}

impl IngestErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IngestErrorCode::MalformedRow => "CROSSVIEW_INGEST_MALFORMED_ROW",
            IngestErrorCode::BadHeader => "CROSSVIEW_INGEST_BAD_HEADER",
        }
    }
}

impl fmt::Display for IngestErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Ingestion error with the offending line
#[derive(Debug, Clone)]
pub struct IngestError {
    code: IngestErrorCode,
    line: usize,
    message: String,
}

impl IngestError {
    /// A row could not be parsed
    pub fn malformed_row(line: usize, reason: impl Into<String>) -> Self {
        Self {
            code: IngestErrorCode::MalformedRow,
            line,
            message: reason.into(),
        }
    }

    /// The header does not name the expected columns
    pub fn bad_header(reason: impl Into<String>) -> Self {
        Self {
            code: IngestErrorCode::BadHeader,
            line: 1,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IngestErrorCode {
        self.code
    }

    /// 1-based input line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}): {}", self.code, self.line, self.message)
    }
}

impl std::error::Error for IngestError {}

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let err = IngestError::malformed_row(7, "bad delay");
        let display = err.to_string();
        assert!(display.contains("CROSSVIEW_INGEST_MALFORMED_ROW"));
        assert!(display.contains("line 7"));
        assert!(display.contains("bad delay"));
    }
}
