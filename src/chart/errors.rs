//! # Chart Errors
//!
//! Missing configuration is a fatal precondition violation at build time.
//! Degenerate brush extents are not errors.

use thiserror::Error;

use crate::index::IndexError;

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

/// Chart errors
#[derive(Debug, Clone, Error)]
pub enum ChartError {
    // ==================
    // Configuration Errors
    // ==================
    /// Built without a dimension
    #[error("Chart has no dimension")]
    MissingDimension,

    /// Built without a group
    #[error("Chart has no group")]
    MissingGroup,

    /// Built without an x scale
    #[error("Chart has no x scale")]
    MissingXScale,

    // ==================
    // Gesture Errors
    // ==================
    /// Move or end delivered with no drag in progress
    #[error("Brush '{0}' without a drag in progress")]
    NoDragInProgress(&'static str),

    // ==================
    // Render Errors
    // ==================
    /// Group produced a key that cannot be placed on the x axis
    #[error("Bucket key '{0}' is not numeric")]
    NonNumericBucket(String),

    /// Index rejected a call
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl ChartError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ChartError::MissingDimension => "CROSSVIEW_CHART_MISSING_DIMENSION",
            ChartError::MissingGroup => "CROSSVIEW_CHART_MISSING_GROUP",
            ChartError::MissingXScale => "CROSSVIEW_CHART_MISSING_X_SCALE",
            ChartError::NoDragInProgress(_) => "CROSSVIEW_CHART_NO_DRAG",
            ChartError::NonNumericBucket(_) => "CROSSVIEW_CHART_NON_NUMERIC_BUCKET",
            ChartError::Index(e) => e.code().code(),
        }
    }

    /// Configuration errors cannot be recovered from
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChartError::MissingDimension | ChartError::MissingGroup | ChartError::MissingXScale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_fatality() {
        assert!(ChartError::MissingGroup.is_fatal());
        assert!(!ChartError::NoDragInProgress("end").is_fatal());

        let err: ChartError = IndexError::unknown_group(4).into();
        assert_eq!(err.code(), "CROSSVIEW_INDEX_UNKNOWN_GROUP");
        assert!(err.to_string().contains("#4"));
    }
}
