// LogMetrics - tests/e2e_pipeline.rs
//
// End-to-end tests for the extraction pipeline.
//
// These tests exercise the real filesystem, real walkdir traversal, real
// regex matching and real CSV output, then parse the written report back
// with the csv crate. No mocks, no stubs.

use logmetrics::app::collect::{collect_metrics, CollectConfig};
use logmetrics::app::pipeline::{run, RunRequest, RunSummary};
use logmetrics::util::error::LogMetricsError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture run.
fn fixture_run() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("bench_run")
}

fn run_into(root: &Path, metric: &str, output_dir: &Path) -> RunSummary {
    let request = RunRequest {
        root: root.to_path_buf(),
        metric: metric.to_string(),
        output_dir: output_dir.to_path_buf(),
        collect: CollectConfig::default(),
    };
    run(&request).expect("run succeeds")
}

/// Parsed CSV: header row plus each data row keyed by its `file` cell.
struct Report {
    headers: Vec<String>,
    rows: HashMap<String, HashMap<String, String>>,
    row_count: usize,
}

fn read_report(path: &Path) -> Report {
    let mut reader = csv::Reader::from_path(path).expect("open report");
    let headers: Vec<String> = reader
        .headers()
        .expect("header row")
        .iter()
        .map(String::from)
        .collect();

    let mut rows = HashMap::new();
    let mut row_count = 0;
    for record in reader.records() {
        let record = record.expect("valid csv row");
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(String::from))
            .collect();
        rows.insert(row["file"].clone(), row);
        row_count += 1;
    }

    Report {
        headers,
        rows,
        row_count,
    }
}

// =============================================================================
// Fixture run
// =============================================================================

#[test]
fn e2e_fixture_run_produces_one_row_per_file() {
    let out = tempfile::tempdir().unwrap();
    let summary = run_into(&fixture_run(), "IPC", out.path());

    assert_eq!(
        summary.output_path,
        out.path().join("bench_run_IPC_metrics.csv")
    );
    assert_eq!(summary.rows_written, 3);
    assert!(summary.failures.is_empty());
    assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);

    let report = read_report(&summary.output_path);
    assert_eq!(
        report.headers,
        [
            "file",
            "core0_IPC",
            "core10_IPC",
            "core1_IPC",
            "core2_IPC",
            "core3_IPC",
            "system_IPC"
        ]
    );
    assert_eq!(report.row_count, 3);

    let quad = &report.rows["sim_quad.log"];
    assert_eq!(quad["core0_IPC"], "1.28");
    assert_eq!(quad["core1_IPC"], "1.12");
    assert_eq!(quad["core2_IPC"], "1.50");
    assert_eq!(quad["core3_IPC"], "0.99");
    assert_eq!(quad["core10_IPC"], "");
    assert_eq!(quad["system_IPC"], "4.89");

    let many = &report.rows["sim_many.log"];
    assert_eq!(many["core2_IPC"], "0.75", "last match wins");
    assert_eq!(many["core10_IPC"], "0.80");
    assert_eq!(many["core0_IPC"], "");
    assert_eq!(many["system_IPC"], "1.55");

    // Nested file with no metric lines still gets a row of empty cells.
    let idle = &report.rows["sim_idle.log"];
    assert!(report.headers[1..].iter().all(|h| idle[h].is_empty()));
}

#[test]
fn e2e_system_column_tracks_last_marker_line_with_metric() {
    let out = tempfile::tempdir().unwrap();
    let summary = run_into(&fixture_run(), "l2_miss", out.path());

    let report = read_report(&summary.output_path);
    let quad = &report.rows["sim_quad.log"];
    assert_eq!(quad["core3_l2_miss"], "0.061");
    // The trailing system line carries no l2_miss, so the last core line wins.
    assert_eq!(quad["system_l2_miss"], "0.061");
    assert_eq!(report.rows["sim_many.log"]["system_l2_miss"], "");
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn e2e_empty_directory_writes_header_only() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let summary = run_into(logs.path(), "IPC", out.path());

    assert_eq!(summary.rows_written, 0);
    assert_eq!(summary.columns, ["file"]);
    assert_eq!(fs::read_to_string(&summary.output_path).unwrap(), "file\n");
}

#[test]
fn e2e_core_line_populates_core_and_system_columns() {
    let logs = tempfile::tempdir().unwrap();
    fs::write(logs.path().join("one.log"), "PERF: core3: IPC=1.42 other=foo\n").unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = read_report(&run_into(logs.path(), "IPC", out.path()).output_path);
    assert_eq!(report.headers, ["file", "core3_IPC", "system_IPC"]);

    let row = &report.rows["one.log"];
    assert_eq!(row["core3_IPC"], "1.42");
    assert_eq!(row["system_IPC"], "1.42");
}

#[test]
fn e2e_last_write_wins() {
    let logs = tempfile::tempdir().unwrap();
    fs::write(
        logs.path().join("twice.log"),
        "PERF: core1: IPC=1.0\nPERF: core1: IPC=2.0\n",
    )
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = read_report(&run_into(logs.path(), "IPC", out.path()).output_path);
    assert_eq!(report.rows["twice.log"]["core1_IPC"], "2.0");
}

#[test]
fn e2e_values_round_trip_verbatim() {
    let logs = tempfile::tempdir().unwrap();
    let values = ["007", "1e-3", "3,5", "\"quoted\"", "NaN", "12.50us;p99"];
    for (i, v) in values.iter().enumerate() {
        fs::write(
            logs.path().join(format!("run{i}.log")),
            format!("PERF: core{i}: lat={v}\n"),
        )
        .unwrap();
    }
    let out = tempfile::tempdir().unwrap();

    let report = read_report(&run_into(logs.path(), "lat", out.path()).output_path);
    for (i, v) in values.iter().enumerate() {
        let row = &report.rows[&format!("run{i}.log")];
        assert_eq!(row[&format!("core{i}_lat")], *v);
        assert_eq!(row["system_lat"], *v);
    }
}

#[test]
fn e2e_metric_name_is_matched_literally() {
    let logs = tempfile::tempdir().unwrap();
    fs::write(
        logs.path().join("misses.log"),
        "PERF: core0: L1.miss[%]=4.2\nPERF: core1: L1Xmiss[%]=9.9\n",
    )
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    let summary = run_into(logs.path(), "L1.miss[%]", out.path());
    let report = read_report(&summary.output_path);
    assert_eq!(report.headers, ["file", "core0_L1.miss[%]", "system_L1.miss[%]"]);
    assert_eq!(report.rows["misses.log"]["system_L1.miss[%]"], "4.2");
}

#[test]
fn e2e_missing_directory_is_reported_not_raised() {
    let outcome = collect_metrics(
        Path::new("/does/not/exist"),
        "IPC",
        &CollectConfig::default(),
    )
    .expect("missing directory must not raise");
    assert!(outcome.records.is_empty());
    assert!(outcome.root_error.is_some());
}

#[test]
fn e2e_unwritable_destination_fails_without_partial_file() {
    let logs = tempfile::tempdir().unwrap();
    fs::write(logs.path().join("a.log"), "PERF: IPC=1\n").unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let blocker = scratch.path().join("results");
    fs::write(&blocker, "this is a file, not a directory").unwrap();

    let request = RunRequest {
        root: logs.path().to_path_buf(),
        metric: "IPC".to_string(),
        output_dir: blocker.clone(),
        collect: CollectConfig::default(),
    };
    let err = run(&request).unwrap_err();
    assert!(matches!(err, LogMetricsError::Export(_)), "got {err:?}");
    assert_eq!(
        fs::read_to_string(&blocker).unwrap(),
        "this is a file, not a directory"
    );
    assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 1);
}

#[test]
fn e2e_empty_metric_is_rejected() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let request = RunRequest {
        root: logs.path().to_path_buf(),
        metric: String::new(),
        output_dir: out.path().to_path_buf(),
        collect: CollectConfig::default(),
    };
    let err = run(&request).unwrap_err();
    assert!(matches!(err, LogMetricsError::Extract(_)), "got {err:?}");
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
