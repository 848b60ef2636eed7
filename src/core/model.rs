// LogMetrics - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::FILE_COLUMN;
use std::collections::BTreeMap;
use std::path::PathBuf;

// =============================================================================
// Discovered File (output of discovery)
// =============================================================================

/// A file found during directory discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path to the file.
    pub path: PathBuf,

    /// Base filename, used as the record identifier. Non-UTF-8 names are
    /// converted lossily.
    pub file_name: String,
}

// =============================================================================
// Metric Record (output of extraction)
// =============================================================================

/// Extracted metric values for one log file.
///
/// Always holds a `file` column with the base filename. Metric columns are
/// `core{N}_{metric}` and `system_{metric}`; inserting an existing column
/// overwrites it, so the last matching line in a file wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    columns: BTreeMap<String, String>,
}

impl MetricRecord {
    /// Create a record holding only the `file` column.
    pub fn new(file_name: impl Into<String>) -> Self {
        let mut columns = BTreeMap::new();
        columns.insert(FILE_COLUMN.to_string(), file_name.into());
        Self { columns }
    }

    /// The base filename this record was extracted from.
    pub fn file(&self) -> &str {
        self.columns
            .get(FILE_COLUMN)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Set `column` to `value`, returning the value it replaced.
    pub fn insert(&mut self, column: String, value: String) -> Option<String> {
        self.columns.insert(column, value)
    }

    /// Value of `column`, if this file produced one.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Column names present in this record, in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of metric columns (excluding `file`).
    pub fn metric_count(&self) -> usize {
        self.columns.len() - 1
    }
}

// =============================================================================
// Column naming
// =============================================================================

/// Which matcher produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    /// A line scoped to one numbered core (`PERF: core3: ...`).
    Core,
    /// Any metric line, aggregated system-wide.
    System,
}

impl MatchScope {
    /// Column name for a value of `metric` in this scope.
    ///
    /// `core_id` is the captured digit run for `Core` and ignored for
    /// `System`. The digits are used verbatim, so `core007` stays `core007`.
    pub fn column_name(self, metric: &str, core_id: Option<&str>) -> String {
        use crate::util::constants::{CORE_COLUMN_PREFIX, SYSTEM_COLUMN_PREFIX};
        match self {
            Self::Core => format!(
                "{CORE_COLUMN_PREFIX}{}_{metric}",
                core_id.unwrap_or_default()
            ),
            Self::System => format!("{SYSTEM_COLUMN_PREFIX}_{metric}"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::System => "system",
        }
    }
}
