#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cognitive_complexity)]
#![warn(clippy::too_many_lines)]
#![warn(clippy::too_many_arguments)]
// Allow some common patterns that are fine in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod engine;
pub mod error;
pub mod location;
pub mod models;
pub mod reader;
pub mod registry;
pub mod rules;
pub mod suppression;
pub mod syntax;
pub mod utils;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use engine::{check, CancellationToken, CheckOptions, SourceSet};
pub use error::{CheckError, ConfigError, ParseError};
pub use models::{CheckReport, Finding, Location, Severity};
pub use reader::find_java_files;
pub use registry::RuleRegistry;

/// Options for the linter
#[derive(Clone, Debug, Default)]
pub struct LinterOptions {
    /// Worker threads (0 = available parallelism)
    pub threads: usize,
    pub skip_patterns: Vec<String>,
    pub cancel: CancellationToken,
}

/// Main linting function: read, evaluate and report on one root path
pub fn lint_path(
    path: &Path,
    registry: &RuleRegistry,
    options: &LinterOptions,
) -> Result<CheckReport, CheckError> {
    lint_paths(&[path.to_path_buf()], registry, options)
}

/// Lint several roots in one pass. Files reachable from more than one root
/// are checked once.
pub fn lint_paths(
    paths: &[PathBuf],
    registry: &RuleRegistry,
    options: &LinterOptions,
) -> Result<CheckReport, CheckError> {
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Err(CheckError::PathNotFound(missing.clone()));
    }

    let mut files: Vec<PathBuf> = paths
        .iter()
        .flat_map(|path| find_java_files(path, &options.skip_patterns))
        .collect();
    files.sort();
    files.dedup();
    debug!("Found {} Java files", files.len());

    let pool = engine::worker_pool(options.threads)?;
    let report = pool.install(|| {
        let sources = reader::read_sources(&files, &options.cancel)?;
        engine::evaluate(&sources, registry, &options.cancel)
    })?;

    info!(
        "Checked {} files: {} errors, {} warnings",
        report.files_checked,
        report.count(Severity::Error),
        report.count(Severity::Warn)
    );
    Ok(report)
}
