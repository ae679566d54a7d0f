//! Logging initialization for the forky binary.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `FORKY_LOG` environment variable. Falls back to `info` level when the
//! variable is unset or invalid.
//!
//! ```bash
//! # Debug level
//! FORKY_LOG=debug forky show
//!
//! # Trace every applied resize while keeping other crates quiet
//! FORKY_LOG=forky_layout=trace,warn forky replay drag.json
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "FORKY_LOG";

/// Log file name inside the data directory, used while the TUI owns the
/// terminal.
pub const LOG_FILE: &str = "forky.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    /// Append to `<data_dir>/forky.log`.
    File { data_dir: &'a Path },
}

/// Build the filter from raw directives, falling back to `info`.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber.
///
/// Must be called once, at startup.
pub fn init(target: LogTarget<'_>) -> std::io::Result<()> {
    let directives = std::env::var(LOG_ENV).ok();
    let filter = build_filter(directives.as_deref());

    match target {
        LogTarget::Stderr => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogTarget::File { data_dir } => {
            std::fs::create_dir_all(data_dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(data_dir.join(LOG_FILE))?;
            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn unset_directives_default_to_info() {
        assert_eq!(build_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn valid_directives_are_used() {
        assert_eq!(
            build_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert!(EnvFilter::try_new("forky_layout=trace,warn").is_ok());
    }

    #[test]
    fn invalid_directives_fall_back_to_info() {
        assert_eq!(
            build_filter(Some("forky_layout=loud")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
