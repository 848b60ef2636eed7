// LogMetrics - platform/config.rs
//
// Platform config directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::discovery::DiscoveryConfig;
use crate::core::extractor::{marker_problem, ExtractConfig};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogMetrics configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logmetrics/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[extract]` section.
    pub extract: ExtractSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Maximum directory recursion depth (unset = unlimited).
    pub max_depth: Option<usize>,
    /// Follow symbolic links while walking.
    pub follow_links: Option<bool>,
    /// Include glob patterns.
    pub include_patterns: Option<Vec<String>>,
    /// Exclude glob patterns.
    pub exclude_patterns: Option<Vec<String>>,
}

/// `[extract]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Token introducing a metric line.
    pub marker: Option<String>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Directory receiving reports.
    pub directory: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from config.toml.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Discovery --
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    // -- Extraction --
    pub marker: String,

    // -- Output --
    pub output_dir: PathBuf,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_links: false,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            marker: constants::DEFAULT_MARKER.to_string(),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            max_depth: self.max_depth,
            follow_links: self.follow_links,
            include_patterns: self.include_patterns.clone(),
            exclude_patterns: self.exclude_patterns.clone(),
        }
    }

    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            marker: self.marker.clone(),
        }
    }

    /// Report directory: `-o` wins over `[output] directory`, which already
    /// holds the built-in default when unset.
    pub fn output_dir_for(&self, cli_output_dir: Option<PathBuf>) -> PathBuf {
        cli_output_dir.unwrap_or_else(|| self.output_dir.clone())
    }
}

/// Load and validate config.toml from `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. If the file does not exist, returns defaults with no problems
/// (first run). If the file is unreadable or unparseable, returns defaults
/// with one problem describing why.
///
/// Runs before logging is initialised, so problems are returned rather than
/// logged; the caller reports them once the subscriber is installed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), Vec::new());
        }
        Err(e) => {
            return (
                AppConfig::default(),
                vec![ConfigError::Io {
                    path: config_path.to_path_buf(),
                    source: e,
                }],
            );
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            return (
                AppConfig::default(),
                vec![ConfigError::TomlParse {
                    path: config_path.to_path_buf(),
                    source: e,
                }],
            );
        }
    };

    validate(raw)
}

/// Validate each field of `raw`, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut problems: Vec<ConfigError> = Vec::new();

    // -- Discovery --
    if let Some(depth) = raw.discovery.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.max_depth = Some(depth);
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "discovery.max_depth".to_string(),
                value: depth.to_string(),
                expected: format!(
                    "1-{}, or unset for unlimited. Using unlimited",
                    constants::ABSOLUTE_MAX_DEPTH
                ),
            });
        }
    }
    if let Some(follow) = raw.discovery.follow_links {
        config.follow_links = follow;
    }
    if let Some(patterns) = raw.discovery.include_patterns {
        config.include_patterns = patterns;
    }
    if let Some(patterns) = raw.discovery.exclude_patterns {
        config.exclude_patterns = patterns;
    }

    // -- Extraction --
    if let Some(marker) = raw.extract.marker {
        if let Some(reason) = marker_problem(&marker) {
            problems.push(ConfigError::ValueOutOfRange {
                field: "extract.marker".to_string(),
                value: marker,
                expected: format!(
                    "a single token ({reason}). Using default (\"{}\")",
                    constants::DEFAULT_MARKER
                ),
            });
        } else {
            config.marker = marker;
        }
    }

    // -- Output --
    if let Some(dir) = raw.output.directory {
        if dir.is_empty() {
            problems.push(ConfigError::ValueOutOfRange {
                field: "output.directory".to_string(),
                value: dir,
                expected: format!(
                    "a directory path. Using default ({})",
                    constants::DEFAULT_OUTPUT_DIR
                ),
            });
        } else {
            config.output_dir = PathBuf::from(dir);
        }
    }

    // -- Logging --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: format!(
                    "one of {}. Using default ({})",
                    constants::VALID_LOG_LEVELS.join(", "),
                    constants::DEFAULT_LOG_LEVEL
                ),
            });
        }
    }
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(PathBuf::from(file));
        }
    }

    (config, problems)
}
