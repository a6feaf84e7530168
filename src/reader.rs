//! Source discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::engine::{CancellationToken, SourceSet};
use crate::error::{CheckError, ParseError};
use crate::syntax::SyntaxUnit;

/// Files that declare no types and are never checked
const SKIPPED_FILE_NAMES: &[&str] = &["package-info.java", "module-info.java"];

/// True when `path` (relative to the walk root) matches an exclude pattern.
///
/// Plain patterns match whole path components; patterns containing `/` match
/// as substrings of the relative path.
fn is_excluded(relative: &Path, skip_patterns: &[String]) -> bool {
    let relative_str = relative.to_string_lossy().replace('\\', "/");
    skip_patterns.iter().any(|pattern| {
        if pattern.contains('/') {
            relative_str.contains(pattern.as_str())
        } else {
            relative
                .components()
                .any(|c| c.as_os_str().to_str() == Some(pattern.as_str()))
        }
    })
}

fn is_java_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("java")
        && !path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| SKIPPED_FILE_NAMES.contains(&n))
}

/// Find all Java files under `path`, sorted by path.
///
/// A file given directly is returned as is, whatever its name.
pub fn find_java_files(path: &Path, skip_patterns: &[String]) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let keep = |entry: &DirEntry| -> bool {
        // The root itself is never excluded
        entry.depth() == 0
            || entry
                .path()
                .strip_prefix(path)
                .map_or(true, |relative| !is_excluded(relative, skip_patterns))
    };

    WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(keep)
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_java_file(entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

/// Read and parse a single file
pub fn read_unit(path: &Path) -> Result<SyntaxUnit, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SyntaxUnit::parse(path, &content)
}

/// Read every file in parallel, keeping the input order.
///
/// Runs on the current rayon pool. Files that fail to read or parse are
/// recorded in `failures` instead of aborting the pass.
pub fn read_sources(files: &[PathBuf], cancel: &CancellationToken) -> Result<SourceSet, CheckError> {
    let results = files
        .par_iter()
        .map(|file| {
            if cancel.is_cancelled() {
                return Err(CheckError::Cancelled);
            }
            Ok(read_unit(file))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut sources = SourceSet::default();
    for result in results {
        match result {
            Ok(unit) => sources.units.push(unit),
            Err(e) => {
                debug!("Failed to parse {}: {}", e.path().display(), e);
                sources.failures.push(e);
            }
        }
    }
    Ok(sources)
}
