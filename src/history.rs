//! Persisted query history.
//!
//! The history file is a newline-delimited list of past queries, oldest
//! first. Only the most recent `max_entries` queries are kept on disk; the
//! in-memory list grows freely during a session and is capped when saved.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::history::HistoryError;

/// Number of queries kept on disk unless configured otherwise.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// File used when no per-user configuration directory can be determined.
const FALLBACK_HISTORY_FILE: &str = ".patricia_repl_history";

/// Returns the per-user history location, `<config dir>/patricia-repl/history`.
pub fn default_history_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("patricia-repl").join("history"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_HISTORY_FILE))
}

/// Queries entered during the current and earlier sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHistory {
    entries: Vec<String>,
    max_entries: usize,
}

impl QueryHistory {
    /// Creates an empty history that keeps `max_entries` queries on save.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Reads the history stored at `path`.
    ///
    /// A missing file is an empty history. If the file holds more than
    /// `max_entries` lines only the most recent ones are kept.
    pub fn load(path: &Path, max_entries: usize) -> Result<Self, HistoryError> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new(max_entries));
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut history = Self::new(max_entries);
        history.entries = String::from_utf8_lossy(&contents)
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        history.trim_to_capacity();

        tracing::debug!(path = %path.display(), entries = history.len(), "history loaded");
        Ok(history)
    }

    /// Writes the most recent `max_entries` queries to `path`, creating
    /// parent directories as needed. Any previous file is replaced.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let write_error = |source: std::io::Error| HistoryError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut contents = String::new();
        for entry in self.recent() {
            contents.push_str(entry);
            contents.push('\n');
        }
        fs::write(path, contents).map_err(write_error)?;

        tracing::debug!(path = %path.display(), entries = self.recent().len(), "history saved");
        Ok(())
    }

    /// Appends a query. Multi-line input is flattened to its first line so
    /// that one entry stays one line on disk.
    pub fn push<S: Into<String>>(&mut self, query: S) {
        let mut query = query.into();
        if let Some(end) = query.find(['\r', '\n']) {
            query.truncate(end);
        }
        if !query.is_empty() {
            self.entries.push(query);
        }
    }

    /// All queries in this history, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The queries that would be written by [`save`](Self::save).
    pub fn recent(&self) -> &[String] {
        let start = self.entries.len().saturating_sub(self.max_entries);
        &self.entries[start..]
    }

    /// Number of queries held in memory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether no queries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trim_to_capacity(&mut self) {
        let excess = self.entries.len().saturating_sub(self.max_entries);
        self.entries.drain(..excess);
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
