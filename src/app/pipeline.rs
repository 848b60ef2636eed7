// LogMetrics - app/pipeline.rs
//
// End-to-end run: collect records, pivot them into a table, and write the
// CSV report atomically (write temp -> rename).

use crate::app::collect::{collect_metrics, CollectConfig, FileFailure};
use crate::core::export::export_csv;
use crate::core::report::ReportTable;
use crate::platform::fs::write_atomic;
use crate::util::constants;
use crate::util::error::{DiscoveryError, ExportError, Result};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Directory containing the log files.
    pub root: PathBuf,
    /// Metric name, matched literally.
    pub metric: String,
    /// Directory receiving the report.
    pub output_dir: PathBuf,
    pub collect: CollectConfig,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub output_path: PathBuf,
    /// Data rows written (one per scanned file).
    pub rows_written: usize,
    pub columns: Vec<String>,
    pub warnings: Vec<String>,
    pub failures: Vec<FileFailure>,
    pub root_error: Option<DiscoveryError>,
}

/// Run the whole pipeline for `request`.
///
/// A missing input folder still writes a header-only report; the problem is
/// reported through `RunSummary::root_error`. Fails on an unusable metric
/// name or when the report cannot be written.
pub fn run(request: &RunRequest) -> Result<RunSummary> {
    tracing::info!(
        root = %request.root.display(),
        metric = %request.metric,
        output_dir = %request.output_dir.display(),
        "Run starting"
    );

    let outcome = collect_metrics(&request.root, &request.metric, &request.collect)?;
    let table = ReportTable::from_records(outcome.records);

    let output_path = output_path(&request.output_dir, &request.root, &request.metric);
    let rows_written = save_report(&table, &output_path)?;

    tracing::info!(
        path = %output_path.display(),
        rows = rows_written,
        columns = table.columns().len(),
        "Report written"
    );

    Ok(RunSummary {
        output_path,
        rows_written,
        columns: table.columns().to_vec(),
        warnings: outcome.warnings,
        failures: outcome.failures,
        root_error: outcome.root_error,
    })
}

/// Write `table` to `path` as CSV, creating the parent directory.
///
/// The report is written to a sibling temp file and renamed into place, so a
/// failed write never leaves a partial report behind.
pub fn save_report(table: &ReportTable, path: &Path) -> std::result::Result<usize, ExportError> {
    write_atomic(
        path,
        |file| export_csv(table, BufWriter::new(file), path),
        |path, source| ExportError::Io { path, source },
    )
}

/// Report location: `<output_dir>/<dir name>_<metric>_metrics.csv`.
///
/// The directory name is the last component of `root` (trailing slashes and
/// `.` ignored). Path separators and control characters in the file name are
/// replaced with `_`.
pub fn output_path(output_dir: &Path, root: &Path, metric: &str) -> PathBuf {
    let file_name = format!(
        "{}_{}_{}",
        dir_label(root),
        metric,
        constants::REPORT_FILE_SUFFIX
    );
    output_dir.join(sanitize_file_name(&file_name))
}

/// Name of the input directory as used in the report file name.
fn dir_label(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }
    // `.`, `..`, `/`: use the name of the directory they resolve to.
    std::fs::canonicalize(root)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| constants::FALLBACK_DIR_NAME.to_string())
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
