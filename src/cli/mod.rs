//! CLI module
//!
//! Provides command-line interface for:
//! - summary: one-shot snapshot of the mounted dashboard
//! - session: JSON line command loop over stdin/stdout

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, execute, run, run_command, run_session, session, summary, SessionCommand};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};
