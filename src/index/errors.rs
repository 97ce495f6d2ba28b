//! Index error types
//!
//! Error codes:
//! - CROSSVIEW_INDEX_UNKNOWN_DIMENSION
//! - CROSSVIEW_INDEX_UNKNOWN_GROUP
//! - CROSSVIEW_INDEX_INVALID_RANGE
//! - CROSSVIEW_INDEX_DIMENSION_LIMIT

use std::fmt;

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Dimension handle does not belong to this index
    UnknownDimension,
    /// Group handle does not belong to this index
    UnknownGroup,
    /// Range bounds are inverted or not numbers
    InvalidRange,
    /// No filter bit left for another dimension
    DimensionLimit,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::UnknownDimension => "CROSSVIEW_INDEX_UNKNOWN_DIMENSION",
            IndexErrorCode::UnknownGroup => "CROSSVIEW_INDEX_UNKNOWN_GROUP",
            IndexErrorCode::InvalidRange => "CROSSVIEW_INDEX_INVALID_RANGE",
            IndexErrorCode::DimensionLimit => "CROSSVIEW_INDEX_DIMENSION_LIMIT",
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
}

impl IndexError {
    /// Unknown dimension handle
    pub fn unknown_dimension(index: usize) -> Self {
        Self {
            code: IndexErrorCode::UnknownDimension,
            message: format!("No dimension #{}", index),
        }
    }

    /// Unknown group handle
    pub fn unknown_group(index: usize) -> Self {
        Self {
            code: IndexErrorCode::UnknownGroup,
            message: format!("No group #{}", index),
        }
    }

    /// Inverted or NaN range
    pub fn invalid_range(low: f64, high: f64) -> Self {
        Self {
            code: IndexErrorCode::InvalidRange,
            message: format!("Invalid filter range [{}, {})", low, high),
        }
    }

    /// Too many dimensions for the filter bitmask
    pub fn dimension_limit(max: usize) -> Self {
        Self {
            code: IndexErrorCode::DimensionLimit,
            message: format!("At most {} dimensions are supported", max),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
