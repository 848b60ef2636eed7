// LogMetrics - core/discovery.rs
//
// Recursive directory traversal.
//
// Architecture note: this module uses `walkdir` for directory traversal and
// reads only directory entries, never file contents. Reading is owned by the
// app layer (app::collect), which hands each file to the extractor.
//
// Error policy:
//   - Problems with the root itself are returned as `DiscoveryError`.
//   - Entries below the root that cannot be visited (permission denied,
//     symlink loop when following links) are skipped and collected as
//     warnings.
//   - Exclude patterns short-circuit directory descent via filter_entry so
//     excluded subtrees are never traversed at all.

use crate::core::model::DiscoveredFile;
use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::Path;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
///
/// The default visits every regular file under the root, however deep.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Maximum directory recursion depth. `None` means unlimited; configured
    /// values are clamped to `ABSOLUTE_MAX_DEPTH`.
    pub max_depth: Option<usize>,

    /// Follow symbolic links. Loops are detected by walkdir and reported as
    /// warnings.
    pub follow_links: bool,

    /// Glob patterns (filename-only) that a file MUST match to be included.
    /// An empty list means "include everything that is not excluded".
    pub include_patterns: Vec<String>,

    /// Glob patterns matched against filenames AND directory component names.
    /// Matching files are skipped; matching directories are not descended into.
    pub exclude_patterns: Vec<String>,
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover every regular file under `root`.
///
/// Returns the accepted files and the warnings collected along the way.
/// Siblings are visited in file-name order so repeated runs over the same
/// tree yield the same order; callers must not depend on any particular
/// order beyond that.
///
/// # Fatal errors
/// Returns `Err` only if the root path is invalid (`RootNotFound`,
/// `NotADirectory`, `PermissionDenied`, `Io`).
pub fn discover_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<DiscoveredFile>, Vec<String>), DiscoveryError> {
    // `fs::metadata` rather than `Path::is_dir`, which maps every error
    // (including PermissionDenied) to `false`.
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Err(e) => {
            let path = root.to_path_buf();
            return Err(match e.kind() {
                std::io::ErrorKind::NotFound => DiscoveryError::RootNotFound { path },
                std::io::ErrorKind::PermissionDenied => {
                    DiscoveryError::PermissionDenied { path, source: e }
                }
                _ => DiscoveryError::Io { path, source: e },
            });
        }
    }

    let max_depth = config
        .max_depth
        .map_or(usize::MAX, |d| d.min(constants::ABSOLUTE_MAX_DEPTH));

    tracing::debug!(
        root = %root.display(),
        max_depth = ?config.max_depth,
        follow_links = config.follow_links,
        include = ?config.include_patterns,
        exclude = ?config.exclude_patterns,
        "Discovery starting"
    );

    let include_pats = compile_patterns(&config.include_patterns, "include");
    let exclude_pats = compile_patterns(&config.exclude_patterns, "exclude");

    let mut files: Vec<DiscoveredFile> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Wildcard patterns (e.g. "*.bak") are only tested against
            // filenames; literal ones also prune directories.
            if e.depth() > 0 && e.file_type().is_dir() {
                let name = e.file_name().to_string_lossy();
                return !is_excluded_component(&name, &exclude_pats);
            }
            true
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Skipping '{path_str}': {e}");
                tracing::warn!(warning = %msg, "Discovery warning");
                push_warning(&mut warnings, msg);
                continue;
            }
        };

        // With follow_links = false a symlink reports its own type; links
        // that resolve to a regular file are still log files.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && link_target_is_file(entry.path()));
        if !is_file {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();

        if is_excluded_filename(&file_name, &exclude_pats) {
            tracing::trace!(file = %file_name, "Excluded by pattern");
            continue;
        }
        if !is_included(&file_name, &include_pats) {
            tracing::trace!(file = %file_name, "Not matched by include patterns");
            continue;
        }

        files.push(DiscoveredFile {
            path: entry.into_path(),
            file_name,
        });
    }

    tracing::debug!(
        files = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

/// True when the symlink at `path` points at a regular file, or at nothing.
///
/// Dangling links are kept so that opening them fails later and the file is
/// reported as a per-file failure rather than silently dropped.
fn link_target_is_file(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Unresolvable symlink kept");
            true
        }
    }
}

/// Append `msg` unless the warning cap has been reached.
fn push_warning(warnings: &mut Vec<String>, msg: String) {
    if warnings.len() < constants::MAX_WARNINGS {
        warnings.push(msg);
    }
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile a list of glob pattern strings into `glob::Pattern` objects.
/// Patterns that fail to compile are logged as warnings and skipped.
fn compile_patterns(patterns: &[String], kind: &str) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, kind, error = %e, "Invalid glob pattern, skipping");
                None
            }
        })
        .collect()
}

/// Returns true if `dir_name` matches any exclude pattern that contains no
/// wildcard characters (e.g. ".git", "archive").
fn is_excluded_component(dir_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| {
        let s = p.as_str();
        !s.contains('*') && !s.contains('?') && !s.contains('[') && p.matches(dir_name)
    })
}

/// Returns true if `file_name` matches any exclude pattern (wildcard or literal).
fn is_excluded_filename(file_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| p.matches(file_name))
}

/// Returns true if `file_name` matches at least one include pattern.
/// An empty include list means "include all".
fn is_included(file_name: &str, include_pats: &[glob::Pattern]) -> bool {
    include_pats.is_empty() || include_pats.iter().any(|p| p.matches(file_name))
}

// =============================================================================
// Tests
// =============================================================================
