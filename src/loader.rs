//! Bulk loading of word lists into a trie.
//!
//! A word list is read as raw bytes, one word per line. Surrounding ASCII
//! whitespace (including a trailing `\r`) is trimmed and blank lines are
//! skipped. The first read error or rejected insert aborts the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::loader::LoaderConfig;
use crate::data_structures::PatriciaTrie;
use crate::error::load::LoadError;

/// Summary of a completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read from the input
    pub lines_read: usize,
    /// Words passed to `insert`
    pub keys_inserted: usize,
    /// Blank and comment lines skipped
    pub skipped: usize,
    /// Wall time spent loading
    pub duration: Duration,
}

/// Opens `path` and loads every word in it into `trie`.
pub fn load_file<V>(
    path: &Path,
    trie: &mut PatriciaTrie<V>,
    options: &LoaderConfig,
) -> Result<LoadStats, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let stats = load_words(BufReader::new(file), trie, options)?;
    tracing::info!(
        path = %path.display(),
        words = stats.keys_inserted,
        skipped = stats.skipped,
        elapsed_ms = stats.duration.as_secs_f64() * 1000.0,
        "word list loaded"
    );
    Ok(stats)
}

/// Loads every word from `reader` into `trie`.
pub fn load_words<R, V>(
    mut reader: R,
    trie: &mut PatriciaTrie<V>,
    options: &LoaderConfig,
) -> Result<LoadStats, LoadError>
where
    R: BufRead,
{
    let start = Instant::now();
    let mut stats = LoadStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| LoadError::Read {
                line: stats.lines_read + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        stats.lines_read += 1;

        let word = line.trim_ascii();
        if word.is_empty() || (options.skip_comments && word.starts_with(b"#")) {
            stats.skipped += 1;
            continue;
        }

        trie.insert(word).map_err(|source| LoadError::Insert {
            line: stats.lines_read,
            word: String::from_utf8_lossy(word).into_owned(),
            source,
        })?;
        stats.keys_inserted += 1;

        if options.log_every > 0 && stats.keys_inserted % options.log_every == 0 {
            tracing::debug!(words = stats.keys_inserted, "loading word list");
        }
    }

    stats.duration = start.elapsed();
    Ok(stats)
}
