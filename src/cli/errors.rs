//! CLI-specific error types
//!
//! Errors returned from a command are fatal: printed to stderr, non-zero
//! exit. Errors inside a session are reported per line and the session
//! continues.

use std::fmt;
use std::io;

use crate::dashboard::DashboardError;
use crate::record::IngestError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdin/stdout)
    IoError,
    /// Data file could not be ingested
    IngestFailed,
    /// Dashboard assembly or rendering failed
    DashboardFailed,
    /// Session line is not a valid command
    InvalidCommand,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CROSSVIEW_CLI_CONFIG_ERROR",
            Self::IoError => "CROSSVIEW_CLI_IO_ERROR",
            Self::IngestFailed => "CROSSVIEW_CLI_INGEST_FAILED",
            Self::DashboardFailed => "CROSSVIEW_CLI_DASHBOARD_FAILED",
            Self::InvalidCommand => "CROSSVIEW_CLI_INVALID_COMMAND",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Unparseable session line
    pub fn invalid_command(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidCommand, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<IngestError> for CliError {
    fn from(e: IngestError) -> Self {
        Self::new(CliErrorCode::IngestFailed, e.to_string())
    }
}

impl From<DashboardError> for CliError {
    fn from(e: DashboardError) -> Self {
        Self::new(CliErrorCode::DashboardFailed, format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
