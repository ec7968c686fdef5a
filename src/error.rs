//! Error types for chronicle

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the logger library.
///
/// Only construction and explicit maintenance calls return these. Writing a
/// log line never fails from the caller's point of view.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log name must not be empty")]
    EmptyName,

    #[error("log name contains a path separator: {0}")]
    InvalidName(String),

    #[error("failed to determine home directory")]
    HomeDirUnavailable,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a dated log file: {0}")]
    MalformedFileName(String),

    #[error("invalid settings: {0}")]
    Settings(String),
}

impl LoggerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = LoggerError> = std::result::Result<T, E>;
