// LogMetrics - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running the pipeline and reporting the outcome

use clap::Parser;
use logmetrics::app::collect::CollectConfig;
use logmetrics::app::pipeline::{self, RunRequest};
use logmetrics::platform::config::{load_config, PlatformPaths};
use logmetrics::util;
use std::path::PathBuf;
use std::process::ExitCode;

/// LogMetrics - extract performance metrics from log files into a CSV.
///
/// Scans every file under LOG_DIR for lines such as
/// `PERF: core3: IPC=1.42` and `PERF: IPC=1.30`, and writes one row per file
/// with a `core<N>_<METRIC>` column per core and a `system_<METRIC>` column.
#[derive(Parser, Debug)]
#[command(name = "logmetrics", version, about)]
struct Cli {
    /// Path to the folder containing log files.
    log_dir: PathBuf,

    /// The metric to extract (e.g. IPC). Matched literally.
    metric: String,

    /// Directory receiving the report [default: organized_results].
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (config, config_problems) = load_config(&config_path);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "LogMetrics starting"
    );

    for problem in &config_problems {
        tracing::warn!(error = %problem, "Configuration warning");
        eprintln!("Warning: {problem}");
    }

    let request = RunRequest {
        root: cli.log_dir,
        metric: cli.metric,
        output_dir: config.output_dir_for(cli.output_dir),
        collect: CollectConfig {
            discovery: config.discovery_config(),
            extract: config.extract_config(),
        },
    };

    let summary = match pipeline::run(&request) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref e) = summary.root_error {
        eprintln!("Error: {e}.");
    }
    for warning in &summary.warnings {
        eprintln!("Warning: {warning}");
    }
    for failure in &summary.failures {
        eprintln!("Skipped: {}", failure.error);
    }

    println!("Metrics saved to {}", summary.output_path.display());
    ExitCode::SUCCESS
}
