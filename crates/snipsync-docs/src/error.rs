//! Synchronization error types.

use std::path::PathBuf;

/// Error that aborts a synchronization run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The snippet source failed.
    #[error("snippet discovery failed: {0}")]
    Discovery(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A file selection pattern is invalid.
    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Underlying matcher error.
        #[source]
        source: ignore::Error,
    },

    /// Walking the documentation tree failed.
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        /// Root being walked.
        root: PathBuf,
        /// Underlying walk error.
        #[source]
        source: ignore::Error,
    },

    /// A document could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document could not be written back.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
