//! Logging setup
//!
//! Logging is off unless STRAPIMG_LOG is set to a level (e.g. `info`,
//! `debug`). Logs go to `log_file` when configured, otherwise to stderr.

use std::fs::OpenOptions;

use strapimg_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
const LOG_ENV: &str = "STRAPIMG_LOG";

/// Initialize logging for the CLI
pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let env_filter = EnvFilter::new(filter_directives(&log_level));

    let Some(log_path) = config.log_file.as_ref() else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging to {:?}", log_path);
}

/// Filter enabling `level` for this workspace's crates only
fn filter_directives(level: &str) -> String {
    format!("strapimg_core={},strapimg_cli={}", level, level)
}
