// LogMetrics - core/extractor.rs
//
// Line-oriented metric extraction.
// Core layer: accepts BufRead trait objects, never opens files itself.
//
// Two independent matchers run over every line:
//   core   `<marker> core<N>:.*<metric>=<value>`  -> core<N>_<metric>
//   system `<marker> .*<metric>=<value>`          -> system_<metric>
// A core-scoped line satisfies both, so it populates both columns.

use crate::core::model::{MatchScope, MetricRecord};
use crate::util::constants;
use crate::util::error::ExtractError;
use regex::Regex;
use std::borrow::Cow;
use std::io::BufRead;
use std::path::Path;

/// Configuration for extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Literal token that introduces a metric line.
    pub marker: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker: constants::DEFAULT_MARKER.to_string(),
        }
    }
}

/// Result of scanning a single log file.
#[derive(Debug)]
pub struct ScanResult {
    /// The per-file record, last match wins per column.
    pub record: MetricRecord,
    /// Total lines read.
    pub lines_scanned: u64,
    /// Lines on which the core matcher fired.
    pub core_matches: u64,
    /// Lines on which the system matcher fired.
    pub system_matches: u64,
    /// Lines that were not valid UTF-8 and were decoded lossily.
    pub lossy_lines: u64,
}

// =============================================================================
// Matchers
// =============================================================================

/// One compiled match rule.
///
/// Capture group `core` (core scope only) holds the core id and `value`
/// holds the metric value.
#[derive(Debug, Clone)]
pub struct MetricMatcher {
    scope: MatchScope,
    column_metric: String,
    re: Regex,
}

impl MetricMatcher {
    /// Build the matcher for `scope`. `metric` and `marker` are matched
    /// literally.
    pub fn new(scope: MatchScope, marker: &str, metric: &str) -> Result<Self, ExtractError> {
        let marker = regex::escape(marker);
        let metric_pat = regex::escape(metric);
        let pattern = match scope {
            MatchScope::Core => {
                format!(r"{marker} core(?P<core>\d+):.*{metric_pat}=(?P<value>\S+)")
            }
            MatchScope::System => format!(r"{marker} .*{metric_pat}=(?P<value>\S+)"),
        };
        let re = Regex::new(&pattern)
            .map_err(|source| ExtractError::InvalidPattern { pattern, source })?;
        Ok(Self {
            scope,
            column_metric: metric.to_string(),
            re,
        })
    }

    pub fn scope(&self) -> MatchScope {
        self.scope
    }

    /// Search `line` and return the `(column, value)` pair it yields.
    pub fn match_line(&self, line: &str) -> Option<(String, String)> {
        let caps = self.re.captures(line)?;
        let value = caps.name("value")?.as_str().to_string();
        let core_id = caps.name("core").map(|m| m.as_str());
        Some((self.scope.column_name(&self.column_metric, core_id), value))
    }
}

// =============================================================================
// Extractor
// =============================================================================

/// Extracts one metric from log files.
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    metric: String,
    core: MetricMatcher,
    system: MetricMatcher,
}

impl MetricExtractor {
    /// Build an extractor for `metric`.
    ///
    /// Fails when the metric is empty (it would match any `=` on a marker
    /// line) or the marker is empty or contains whitespace.
    pub fn new(metric: &str, config: &ExtractConfig) -> Result<Self, ExtractError> {
        if let Some(reason) = metric_problem(metric) {
            return Err(ExtractError::InvalidMetric {
                metric: metric.to_string(),
                reason,
            });
        }
        if let Some(reason) = marker_problem(&config.marker) {
            return Err(ExtractError::InvalidMarker {
                marker: config.marker.clone(),
                reason,
            });
        }

        Ok(Self {
            metric: metric.to_string(),
            core: MetricMatcher::new(MatchScope::Core, &config.marker, metric)?,
            system: MetricMatcher::new(MatchScope::System, &config.marker, metric)?,
        })
    }

    /// Apply both matchers to one line, updating `record` in place.
    ///
    /// Returns which matchers fired as `(core, system)`.
    pub fn apply_line(&self, line: &str, record: &mut MetricRecord) -> (bool, bool) {
        let mut fired = [false; 2];
        for (i, matcher) in [&self.core, &self.system].into_iter().enumerate() {
            if let Some((column, value)) = matcher.match_line(line) {
                tracing::trace!(
                    scope = matcher.scope().label(),
                    column = %column,
                    value = %value,
                    "Metric matched"
                );
                record.insert(column, value);
                fired[i] = true;
            }
        }
        (fired[0], fired[1])
    }

    /// Scan every line of `reader` and build the record for `file_name`.
    ///
    /// `path` is only used for error context. Invalid UTF-8 is decoded
    /// lossily; only genuine read errors are returned.
    pub fn scan<R: BufRead>(
        &self,
        mut reader: R,
        file_name: &str,
        path: &Path,
    ) -> Result<ScanResult, ExtractError> {
        let mut result = ScanResult {
            record: MetricRecord::new(file_name),
            lines_scanned: 0,
            core_matches: 0,
            system_matches: 0,
            lossy_lines: 0,
        };

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ExtractError::Io {
                    file: path.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            // A lone `\r` also ends a line.
            for raw in trim_line_ending(&buf).split(|&b| b == b'\r') {
                result.lines_scanned += 1;

                let line = String::from_utf8_lossy(raw);
                if let Cow::Owned(_) = line {
                    result.lossy_lines += 1;
                }

                let (core, system) = self.apply_line(&line, &mut result.record);
                result.core_matches += u64::from(core);
                result.system_matches += u64::from(system);
            }
        }

        tracing::debug!(
            file = %path.display(),
            metric = %self.metric,
            lines = result.lines_scanned,
            core_matches = result.core_matches,
            system_matches = result.system_matches,
            columns = result.record.metric_count(),
            "File scanned"
        );

        Ok(result)
    }
}

/// Strip a trailing `\n`, `\r\n` or `\r`.
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

fn metric_problem(token: &str) -> Option<&'static str> {
    token.is_empty().then_some("must not be empty")
}

/// The marker is followed by a single space in both patterns, so it must be
/// one whitespace-free token.
pub fn marker_problem(marker: &str) -> Option<&'static str> {
    if marker.is_empty() {
        Some("must not be empty")
    } else if marker.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else {
        None
    }
}
