//! Word list loading error module.

use std::path::PathBuf;
use thiserror::Error;

use crate::data_structures::PatriciaTrieError;

/// Errors that abort a bulk load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The word list could not be opened.
    #[error("Failed to open word list {path}: {source}")]
    Open {
        /// Path of the word list
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Reading failed partway through the input.
    #[error("Failed to read line {line}: {source}")]
    Read {
        /// 1-based line number being read
        line: usize,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The trie rejected a word.
    #[error("Failed to insert word '{word}' at line {line}: {source}")]
    Insert {
        /// 1-based line number of the word
        line: usize,
        /// The rejected word, lossily decoded for display
        word: String,
        /// The trie's error
        #[source]
        source: PatriciaTrieError,
    },
}
