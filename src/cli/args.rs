//! CLI argument definitions using clap
//!
//! Commands:
//! - crossview summary --config <path>
//! - crossview session --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// crossview - linked multi-view filtering over flight records
#[derive(Parser, Debug)]
#[command(name = "crossview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load, mount and print one dashboard snapshot
    Summary {
        /// Path to configuration file
        #[arg(long, default_value = "./crossview.json")]
        config: PathBuf,
    },

    /// Apply JSON commands from stdin, one response per line
    Session {
        /// Path to configuration file
        #[arg(long, default_value = "./crossview.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let cli = Cli::try_parse_from(["crossview", "session", "--config", "/tmp/c.json"]).unwrap();
        match cli.command {
            Command::Session { config } => assert_eq!(config, PathBuf::from("/tmp/c.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["crossview", "summary"]).unwrap();
        assert!(matches!(cli.command, Command::Summary { config } if config == PathBuf::from("./crossview.json")));
    }
}
