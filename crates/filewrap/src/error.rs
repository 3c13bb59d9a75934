//! Error types for explicit load and save calls.
//!
//! The container API itself never returns these: index misuse is absorbed
//! and storage failures during construction or disposal are logged. Only
//! the explicit `reload`/`load_*`/`save*` calls and the `io` adapter
//! surface them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the persistence adapter.
#[derive(Debug, Error)]
pub enum FileWrapError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container has no associated path.
    #[error("cannot {operation}: no path is associated with this container")]
    NoPath { operation: &'static str },

    /// A token in a numeric file did not parse as a number.
    #[error("invalid number '{token}' on line {line} of {path}")]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },

    /// A closing policy name was not recognized.
    #[error("unknown closing policy '{value}' (expected discard, flush, or append)")]
    UnknownPolicy { value: String },
}

impl FileWrapError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from a missing file rather than a real failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Result type for filewrap operations.
pub type Result<T> = std::result::Result<T, FileWrapError>;
