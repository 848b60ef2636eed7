// LogMetrics - app/collect.rs
//
// Walks the input directory and runs the extractor over every file found.
//
// Error isolation:
//   - A missing or unusable root is reported and yields an empty outcome.
//   - A file that cannot be opened or read is recorded as a FileFailure and
//     the run continues with the remaining files.
//   - Only an unusable metric name aborts, before any file is touched.

use crate::core::discovery::{discover_files, DiscoveryConfig};
use crate::core::extractor::{ExtractConfig, MetricExtractor};
use crate::core::model::MetricRecord;
use crate::platform::fs::open_log;
use crate::util::error::{DiscoveryError, ExtractError};
use std::path::{Path, PathBuf};

/// Settings for one collection pass.
#[derive(Debug, Clone, Default)]
pub struct CollectConfig {
    pub discovery: DiscoveryConfig,
    pub extract: ExtractConfig,
}

/// A file that was discovered but could not be scanned.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// Everything gathered by `collect_metrics`.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// One record per successfully scanned file, in discovery order.
    pub records: Vec<MetricRecord>,

    /// Non-fatal problems: skipped walk entries, lossily decoded files.
    pub warnings: Vec<String>,

    /// Files whose contents could not be read. They have no record.
    pub failures: Vec<FileFailure>,

    /// Set when the root could not be walked at all.
    pub root_error: Option<DiscoveryError>,
}

impl CollectOutcome {
    /// Number of files the extractor was run on, failed or not.
    pub fn files_attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Collect `metric` from every file under `root`.
///
/// A missing root is not an error: it is logged, stored in
/// `CollectOutcome::root_error`, and produces no records.
pub fn collect_metrics(
    root: &Path,
    metric: &str,
    config: &CollectConfig,
) -> Result<CollectOutcome, ExtractError> {
    let extractor = MetricExtractor::new(metric, &config.extract)?;
    let mut outcome = CollectOutcome::default();

    let files = match discover_files(root, &config.discovery) {
        Ok((files, warnings)) => {
            outcome.warnings = warnings;
            files
        }
        Err(e) => {
            tracing::error!(root = %root.display(), error = %e, "Cannot scan input folder");
            outcome.root_error = Some(e);
            return Ok(outcome);
        }
    };

    tracing::info!(
        root = %root.display(),
        metric,
        files = files.len(),
        "Extracting metrics"
    );

    for file in files {
        let scanned = open_log(&file.path)
            .map_err(|source| ExtractError::Io {
                file: file.path.clone(),
                source,
            })
            .and_then(|reader| extractor.scan(reader, &file.file_name, &file.path));

        match scanned {
            Ok(result) => {
                if result.lossy_lines > 0 {
                    let msg = format!(
                        "'{}': {} line(s) were not valid UTF-8 and were decoded lossily",
                        file.path.display(),
                        result.lossy_lines
                    );
                    tracing::warn!(warning = %msg, "Extraction warning");
                    outcome.warnings.push(msg);
                }
                outcome.records.push(result.record);
            }
            Err(error) => {
                tracing::warn!(file = %file.path.display(), error = %error, "Skipping unreadable file");
                outcome.failures.push(FileFailure {
                    path: file.path,
                    error,
                });
            }
        }
    }

    tracing::info!(
        records = outcome.records.len(),
        failures = outcome.failures.len(),
        warnings = outcome.warnings.len(),
        "Extraction complete"
    );

    Ok(outcome)
}
