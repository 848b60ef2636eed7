// LogMetrics - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr by default, or appended to [logging] file when set.
// stdout is reserved for the "Metrics saved to ..." line.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
/// `log_file` is the optional log file path from config.toml.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default.
///
/// If the log file cannot be opened, logging falls back to stderr and the
/// failure is reported through the freshly installed subscriber.
pub fn init(debug_flag: bool, config_level: Option<&str>, log_file: Option<&Path>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::new(filter_directive(
        rust_log.as_deref(),
        debug_flag,
        config_level,
    ));

    let opened = log_file.map(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| (path, e))
    });

    match opened {
        Some(Ok(file)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact()
                .init();
        }
        other => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact()
                .init();

            if let Some(Err((path, e))) = other {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Cannot open log file; logging to stderr"
                );
            }
        }
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}

/// Pick the filter directive: RUST_LOG > `--debug` > config level > default.
pub fn filter_directive(
    rust_log: Option<&str>,
    debug_flag: bool,
    config_level: Option<&str>,
) -> String {
    match (rust_log, debug_flag, config_level) {
        (Some(env), _, _) => env.to_string(),
        (None, true, _) => "debug".to_string(),
        (None, false, Some(level)) => level.to_string(),
        (None, false, None) => super::constants::DEFAULT_LOG_LEVEL.to_string(),
    }
}
