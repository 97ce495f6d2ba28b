//! Observability subsystem
//!
//! Provides:
//! - Structured logging through `tracing`, JSON or text, on stderr
//! - Typed lifecycle events, attached to log lines as the `event` field
//! - Monotonic render/filter counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on filtering or rendering
//! 3. Stdout stays reserved for command responses
//!
//! # Usage
//!
//! ```ignore
//! use crossview::observability::{self, Event, LogFormat};
//!
//! observability::init(LogFormat::Json);
//! tracing::info!(event = %Event::RenderPass, matched = 42, "render complete");
//! ```

mod events;
mod metrics;

pub use events::Event;
pub use metrics::{MetricsRegistry, MetricsSnapshot};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log line encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

/// Install the global subscriber.
///
/// Level comes from `RUST_LOG`, defaulting to `info`. Calling twice is
/// harmless; the first subscriber wins.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_serde() {
        let f: LogFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(f, LogFormat::Text);
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), "\"json\"");
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogFormat::Text);
        init(LogFormat::Json);
    }
}
