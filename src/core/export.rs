// LogMetrics - core/export.rs
//
// CSV serialisation of a report table.
// Core layer: writes to any Write trait object. Creating the destination
// file (and replacing it atomically) is owned by app::pipeline.

use crate::core::report::ReportTable;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Write `table` as CSV: one header row, then one row per record.
///
/// Values are written exactly as captured. `path` is only used for error
/// context. Returns the number of data rows written.
pub fn export_csv<W: Write>(
    table: &ReportTable,
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns()).map_err(csv_err)?;

    let mut count = 0;
    for row in table.rows() {
        csv_writer.write_record(&row).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}
