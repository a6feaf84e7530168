//! Error types for configuration, source reading and check passes

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems, surfaced before any check runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rule `{0}` is already registered")]
    DuplicateRule(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule id `{0}` is reserved")]
    ReservedRuleId(String),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A file that could not be turned into a syntax unit
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {path} at {line}:{column}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("parser setup failed for {path}: {message}")]
    Language { path: PathBuf, message: String },
}

impl ParseError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ParseError::Io { path, .. }
            | ParseError::Syntax { path, .. }
            | ParseError::Language { path, .. } => path,
        }
    }

    /// Position to report the failure at; whole-file failures point at 1:1
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Syntax { line, column, .. } => (*line, *column),
            _ => (1, 1),
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("check cancelled")]
    Cancelled,

    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
