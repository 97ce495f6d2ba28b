//! Configuration file
//!
//! ```json
//! {
//!   "data_path": "flights.csv",
//!   "base_year": 2001,
//!   "list_limit": 40,
//!   "date_filter": ["2001-02-01", "2001-03-01"],
//!   "log_format": "json"
//! }
//! ```
//!
//! Only `data_path` is required. A relative `data_path` is resolved against
//! the directory holding the config file. `date_filter` absent means the
//! default February window; `null` means no initial date filter.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{CliError, CliResult};
use crate::dashboard::{default_date_filter, FlightOptions};
use crate::list::DEFAULT_LIST_LIMIT;
use crate::observability::LogFormat;
use crate::record::DEFAULT_BASE_YEAR;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CSV input (required)
    pub data_path: PathBuf,

    /// Year the `MMDDHHmm` dates fall in (optional, default 2001)
    #[serde(default = "default_base_year")]
    pub base_year: i32,

    /// Records in the detail list (optional, default 40)
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Initial date chart filter; see module docs for absent vs `null`
    #[serde(default, deserialize_with = "present")]
    pub date_filter: Option<Option<[NaiveDate; 2]>>,

    /// Log line encoding (optional, default "json")
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_base_year() -> i32 {
    DEFAULT_BASE_YEAR
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

/// Distinguishes an explicit `null` from an absent field
fn present<'de, D>(deserializer: D) -> Result<Option<Option<[NaiveDate; 2]>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        if config.data_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.data_path = dir.join(&config.data_path);
            }
        }
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(CliError::config_error("data_path must not be empty"));
        }

        if self.list_limit == 0 {
            return Err(CliError::config_error("list_limit must be > 0"));
        }

        if NaiveDate::from_ymd_opt(self.base_year, 1, 1).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid base_year: {}",
                self.base_year
            )));
        }

        if let Some([start, end]) = self.date_filter() {
            if start >= end {
                return Err(CliError::config_error(format!(
                    "date_filter start {} must be before end {}",
                    start, end
                )));
            }
        }

        Ok(())
    }

    /// Effective initial date filter
    pub fn date_filter(&self) -> Option<[NaiveDate; 2]> {
        match self.date_filter {
            Some(explicit) => explicit,
            None => default_date_filter(self.base_year),
        }
    }

    pub fn flight_options(&self) -> FlightOptions {
        FlightOptions {
            base_year: self.base_year,
            list_limit: self.list_limit,
            date_filter: self.date_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2001, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let file = write_config(r#"{"data_path": "/data/flights.csv"}"#);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.base_year, 2001);
        assert_eq!(config.list_limit, 40);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.date_filter(), Some([day(2, 1), day(3, 1)]));
        assert_eq!(config.data_path, PathBuf::from("/data/flights.csv"));
    }

    #[test]
    fn test_null_date_filter_disables() {
        let file = write_config(r#"{"data_path": "/d.csv", "date_filter": null}"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.date_filter(), None);
        assert_eq!(config.flight_options().date_filter, None);
    }

    #[test]
    fn test_explicit_date_filter() {
        let file = write_config(
            r#"{"data_path": "/d.csv", "date_filter": ["2001-01-10", "2001-01-20"], "log_format": "text"}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.date_filter(), Some([day(1, 10), day(1, 20)]));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_relative_data_path_resolves_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crossview.json");
        fs::write(&path, r#"{"data_path": "flights.csv"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_path, dir.path().join("flights.csv"));
    }

    #[test]
    fn test_validation_failures() {
        for json in [
            r#"{"data_path": "/d.csv", "list_limit": 0}"#,
            r#"{"data_path": "/d.csv", "date_filter": ["2001-03-01", "2001-02-01"]}"#,
            r#"{"data_path": ""}"#,
            r#"{"base_year": 2001}"#,
            r#"{"data_path": "/d.csv", "log_format": "xml"}"#,
            "not json",
        ] {
            let file = write_config(json);
            let err = Config::load(file.path()).unwrap_err();
            assert_eq!(err.code_str(), "CROSSVIEW_CLI_CONFIG_ERROR", "{}", json);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/crossview.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }
}
