//! Common error types for apidex.

use std::path::PathBuf;

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while loading or interpreting the catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The settings document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not a valid catalog.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}
