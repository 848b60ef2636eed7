// LogMetrics - platform/fs.rs
//
// Filesystem helpers shared by the app layer.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Open a log file for buffered line reading.
///
/// The handle is closed when the reader is dropped, on every exit path.
pub fn open_log(path: &Path) -> io::Result<BufReader<File>> {
    File::open(path).map(BufReader::new)
}

/// Sibling temp path used while a report is being written.
///
/// `report.csv` becomes `report.csv.tmp` in the same directory, so the final
/// rename never crosses filesystems.
pub fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file atomically: `write` fills a sibling temp file, which is then
/// renamed over `path`.
///
/// Creates the parent directory as needed. I/O failures outside `write` are
/// converted with `io_err`. On any failure the temp file is removed and
/// `path` is left untouched.
pub fn write_atomic<T, E, F, M>(path: &Path, write: F, io_err: M) -> Result<T, E>
where
    F: FnOnce(&mut File) -> Result<T, E>,
    M: Fn(PathBuf, io::Error) -> E,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent.to_path_buf(), e))?;
    }

    let tmp = temp_sibling(path);
    let mut file = File::create(&tmp).map_err(|e| io_err(tmp.clone(), e))?;

    let outcome = write(&mut file).and_then(|value| {
        file.sync_all().map_err(|e| io_err(tmp.clone(), e))?;
        Ok(value)
    });
    drop(file);

    let value = match outcome {
        Ok(value) => value,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
    };

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        io_err(path.to_path_buf(), e)
    })?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Write};

    #[derive(Debug)]
    struct TestError(String);

    fn io_err(path: PathBuf, e: io::Error) -> TestError {
        TestError(format!("{}: {e}", path.display()))
    }

    #[test]
    fn test_temp_sibling() {
        assert_eq!(
            temp_sibling(Path::new("out/logs_IPC_metrics.csv")),
            PathBuf::from("out/logs_IPC_metrics.csv.tmp")
        );
    }

    #[test]
    fn test_open_log_reads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let lines: Vec<String> = open_log(&path).unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_open_log_missing_file() {
        let err = open_log(Path::new("/nonexistent/logmetrics/run.log")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_atomic_creates_parent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.csv");

        write_atomic(&path, |f| f.write_all(b"first").map_err(|e| TestError(e.to_string())), io_err)
            .unwrap();
        write_atomic(&path, |f| f.write_all(b"second").map_err(|e| TestError(e.to_string())), io_err)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn test_write_atomic_failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "previous").unwrap();

        let result: Result<(), TestError> = write_atomic(
            &path,
            |f| {
                f.write_all(b"partial").unwrap();
                Err(TestError("serialisation failed".into()))
            },
            io_err,
        );

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
        assert!(!temp_sibling(&path).exists());
    }
}
