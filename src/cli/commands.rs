//! CLI command implementations
//!
//! Both commands follow the same boot sequence: load config, start logging,
//! ingest the data file, assemble the flight dashboard, mount it.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_requests, write_error, write_response};
use crate::chart::BrushGesture;
use crate::dashboard::{build_flight_dashboard, Dashboard, DashboardResult};
use crate::index::Range;
use crate::observability::{self, Event};
use crate::record::RecordLoader;

/// One session request line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionCommand {
    /// `{"op":"brush","chart":1,"gesture":"move","x":60}`
    Brush {
        chart: usize,
        #[serde(flatten)]
        gesture: BrushGesture,
    },
    /// `{"op":"filter","chart":3,"range":[981936000,982540800]}`, `null` clears
    Filter { chart: usize, range: Option<Range> },
    /// `{"op":"filters","filters":[null,[-60,0]]}`
    Filters { filters: Vec<Option<Range>> },
    /// `{"op":"reset","chart":1}`
    Reset { chart: usize },
    /// `{"op":"snapshot"}`
    Snapshot,
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Summary { config } => summary(&config),
        Command::Session { config } => session(&config),
    }
}

/// Print one snapshot of the freshly mounted dashboard
pub fn summary(config_path: &Path) -> CliResult<()> {
    let dashboard = boot(config_path)?;
    let snapshot = dashboard.snapshot()?;

    let mut stdout = io::stdout();
    write_response(&mut stdout, serde_json::to_value(snapshot)?)
}

/// Serve session commands from stdin until EOF
pub fn session(config_path: &Path) -> CliResult<()> {
    let mut dashboard = boot(config_path)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&mut dashboard, stdin.lock(), &mut stdout)
}

/// Load config, initialize logging, ingest and mount.
pub fn boot(config_path: &Path) -> CliResult<Dashboard> {
    let config = Config::load(config_path)?;
    observability::init(config.log_format);
    info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        data_path = %config.data_path.display(),
        "configuration loaded"
    );

    let text = fs::read_to_string(&config.data_path).map_err(|e| {
        CliError::io_error(format!(
            "Failed to read {}: {}",
            config.data_path.display(),
            e
        ))
    })?;

    let mut loader = RecordLoader::new(config.base_year);
    loader.load_csv(&text)?;

    let mut dashboard = build_flight_dashboard(loader.finish(), &config.flight_options())?;
    dashboard.mount()?;
    Ok(dashboard)
}

/// Apply commands line by line.
///
/// Bad lines and rejected commands get an error response, count as rejected,
/// and the session continues; a read failure ends it.
pub fn run_session<R: BufRead, W: Write>(dashboard: &mut Dashboard, input: R, out: &mut W) -> CliResult<()> {
    let mut handled = 0usize;

    for request in read_requests(input) {
        let request = match request {
            Ok(value) => value,
            Err(e) if e.code() == CliErrorCode::InvalidCommand => {
                dashboard.reject(e.code_str(), &e);
                write_error(out, e.code_str(), e.message())?;
                continue;
            }
            Err(e) => {
                write_error(out, e.code_str(), e.message())?;
                return Err(e);
            }
        };

        let command: SessionCommand = match serde_json::from_value(request) {
            Ok(command) => command,
            Err(e) => {
                let e = CliError::invalid_command(e.to_string());
                dashboard.reject(e.code_str(), &e);
                write_error(out, e.code_str(), e.message())?;
                continue;
            }
        };

        match execute(dashboard, command) {
            Ok(data) => write_response(out, data)?,
            Err(e) => write_error(out, e.code(), &e.to_string())?,
        }
        handled += 1;
    }

    info!(event = %Event::SessionEnd, commands = handled, "session ended");
    Ok(())
}

/// Apply one command and build its response payload
pub fn execute(dashboard: &mut Dashboard, command: SessionCommand) -> DashboardResult<Value> {
    match command {
        SessionCommand::Brush { chart, gesture } => {
            let event = dashboard.brush(chart, gesture)?;
            Ok(json!({ "event": event, "readout": dashboard.readout() }))
        }
        SessionCommand::Filter { chart, range } => {
            dashboard.set_filter(chart, range)?;
            Ok(json!({ "readout": dashboard.readout() }))
        }
        SessionCommand::Filters { filters } => {
            dashboard.apply_filters(&filters)?;
            Ok(json!({ "readout": dashboard.readout() }))
        }
        SessionCommand::Reset { chart } => {
            dashboard.reset_filter(chart)?;
            Ok(json!({ "readout": dashboard.readout() }))
        }
        SessionCommand::Snapshot => {
            let snapshot = dashboard.snapshot()?;
            Ok(json!(snapshot))
        }
    }
}
