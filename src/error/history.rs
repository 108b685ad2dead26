//! Query history error module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while persisting the query history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The history file exists but could not be read.
    #[error("Failed to read history file {path}: {source}")]
    Read {
        /// Path of the history file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The history file or its directory could not be written.
    #[error("Failed to write history file {path}: {source}")]
    Write {
        /// Path of the history file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}
