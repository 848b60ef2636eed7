// LogMetrics - core/report.rs
//
// Pivots per-file records into a table with one shared column set.
//
// Column order is `file` followed by every other column in plain string
// order. String order is not numeric order: `core10_IPC` sorts before
// `core2_IPC`. Downstream consumers rely on this order, so it is kept.

use crate::core::model::MetricRecord;
use crate::util::constants::FILE_COLUMN;
use std::collections::BTreeSet;

/// All records of a run plus the union of their columns.
#[derive(Debug, Clone)]
pub struct ReportTable {
    columns: Vec<String>,
    records: Vec<MetricRecord>,
}

impl ReportTable {
    /// Build the table, keeping records in the order they were produced.
    pub fn from_records(records: Vec<MetricRecord>) -> Self {
        let others: BTreeSet<&str> = records
            .iter()
            .flat_map(MetricRecord::column_names)
            .filter(|c| *c != FILE_COLUMN)
            .collect();

        let mut columns = Vec::with_capacity(others.len() + 1);
        columns.push(FILE_COLUMN.to_string());
        columns.extend(others.into_iter().map(str::to_string));

        Self { columns, records }
    }

    /// Header row: `file` first, remaining columns sorted.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One row per record with a cell for every column; columns the record
    /// lacks are empty strings.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.records.iter().map(move |record| {
            self.columns
                .iter()
                .map(|c| record.get(c).unwrap_or(""))
                .collect()
        })
    }
}
