// LogMetrics - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogMetrics";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogMetrics";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery limits
// =============================================================================

/// Hard upper bound on a configured recursion depth.
///
/// An unset depth means "unlimited"; this bound only applies to values
/// read from config.toml.
pub const ABSOLUTE_MAX_DEPTH: usize = 1_024;

/// Maximum number of walk warnings retained per run. Further warnings are
/// still logged but not kept in memory.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Extraction
// =============================================================================

/// Token that introduces a metric line, e.g. `PERF: core3: IPC=1.42`.
pub const DEFAULT_MARKER: &str = "PERF:";

/// Column holding the base filename of each record. Always the first column.
pub const FILE_COLUMN: &str = "file";

/// Prefix of core-scoped columns (`core{N}_{metric}`).
pub const CORE_COLUMN_PREFIX: &str = "core";

/// Prefix of the system-scoped column (`system_{metric}`).
pub const SYSTEM_COLUMN_PREFIX: &str = "system";

// =============================================================================
// Output
// =============================================================================

/// Directory (relative to the working directory) receiving reports.
pub const DEFAULT_OUTPUT_DIR: &str = "organized_results";

/// Suffix appended to every report file name.
pub const REPORT_FILE_SUFFIX: &str = "metrics.csv";

/// Name used for the input directory when it has no final component
/// (`/`) and cannot be canonicalised.
pub const FALLBACK_DIR_NAME: &str = "logs";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Name of the optional configuration file in the platform config dir.
pub const CONFIG_FILE_NAME: &str = "config.toml";
