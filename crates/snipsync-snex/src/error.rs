//! Discovery error types.

use std::path::PathBuf;

/// Error raised while discovering snippets.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// Configuration file could not be read.
    #[error("cannot read snippet configuration {}: {source}", path.display())]
    ConfigRead {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid.
    #[error("invalid snippet configuration {}: {source}", path.display())]
    ConfigParse {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Glob pattern of a config entry is invalid.
    #[error("invalid glob '{pattern}' in config '{entry}': {source}")]
    Glob {
        /// Config entry name.
        entry: String,
        /// Offending pattern.
        pattern: String,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// Source directory of a config entry does not exist.
    #[error("source directory {} of config '{entry}' does not exist", path.display())]
    SourceDirMissing {
        /// Config entry name.
        entry: String,
        /// Missing directory.
        path: PathBuf,
    },

    /// Walking the source tree failed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Source file could not be read.
    #[error("cannot read source file {}: {source}", path.display())]
    SourceRead {
        /// Source file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A snippet was opened while another one was still open.
    #[error("{}:{line}: snippet '{name}' opened inside snippet '{open}'", path.display())]
    NestedSnippet {
        /// Source file path.
        path: PathBuf,
        /// 1-based line of the nested start marker.
        line: usize,
        /// Name of the nested snippet.
        name: String,
        /// Name of the snippet that is still open.
        open: String,
    },

    /// An end marker appeared with no open snippet.
    #[error("{}:{line}: endsnippet without an open snippet", path.display())]
    UnmatchedEnd {
        /// Source file path.
        path: PathBuf,
        /// 1-based line of the end marker.
        line: usize,
    },

    /// A snippet was still open at the end of the file.
    #[error("{}:{line}: snippet '{name}' is never closed", path.display())]
    Unterminated {
        /// Source file path.
        path: PathBuf,
        /// 1-based line of the start marker.
        line: usize,
        /// Name of the open snippet.
        name: String,
    },

    /// A start marker carried no name.
    #[error("{}:{line}: snippet marker without a name", path.display())]
    EmptyName {
        /// Source file path.
        path: PathBuf,
        /// 1-based line of the start marker.
        line: usize,
    },
}
