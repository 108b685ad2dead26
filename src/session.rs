//! Interactive prefix-search session.
//!
//! A [`Session`] owns the trie, the query history and the verbosity toggle.
//! Each line of input is either a slash command or a prefix query.

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::config::repl::ReplConfig;
use crate::data_structures::{PatriciaTrie, SearchStats};
use crate::error::PatriciaResult;
use crate::history::QueryHistory;

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading input
    Continue,
    /// The user asked to leave
    Exit,
}

/// Session commands; anything else is a prefix query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Exit,
    Verbose,
    Help,
    Stats,
}

impl Command {
    fn parse(input: &[u8]) -> Option<Self> {
        match input {
            b"/exit" | b"/quit" => Some(Self::Exit),
            b"/verbose" => Some(Self::Verbose),
            b"/help" => Some(Self::Help),
            b"/stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

/// State of one interactive session.
#[derive(Debug)]
pub struct Session {
    trie: PatriciaTrie,
    history: QueryHistory,
    verbose: bool,
    max_results: usize,
}

impl Session {
    /// Creates a session over a loaded trie.
    pub fn new(trie: PatriciaTrie, history: QueryHistory, config: &ReplConfig) -> Self {
        Self {
            trie,
            history,
            verbose: config.verbose,
            max_results: config.max_results,
        }
    }

    /// The trie being queried.
    pub fn trie(&self) -> &PatriciaTrie {
        &self.trie
    }

    /// Queries and commands entered so far, earlier sessions included.
    pub fn history(&self) -> &QueryHistory {
        &self.history
    }

    /// Whether search statistics are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Ends the session, handing back its history for saving.
    pub fn into_history(self) -> QueryHistory {
        self.history
    }

    /// Handles one line of input.
    ///
    /// Input is raw bytes: prefixes are matched byte for byte and only
    /// decoded (lossily) for display and history.
    pub fn execute<I, W>(&mut self, input: I, out: &mut W) -> PatriciaResult<Outcome>
    where
        I: AsRef<[u8]>,
        W: Write,
    {
        let input = input.as_ref().trim_ascii();
        if input.is_empty() {
            return Ok(Outcome::Continue);
        }
        self.history.push(String::from_utf8_lossy(input));

        match Command::parse(input) {
            Some(Command::Exit) => return Ok(Outcome::Exit),
            Some(Command::Verbose) => {
                self.verbose = !self.verbose;
                writeln!(out, "[info] Verbose mode {}", on_off(self.verbose))?;
            }
            Some(Command::Help) => self.write_help(out)?,
            Some(Command::Stats) => {
                let stats = serde_json::to_string_pretty(&self.trie.stats())?;
                writeln!(out, "{stats}")?;
            }
            None => self.search(input, out)?,
        }
        Ok(Outcome::Continue)
    }

    /// Prompts and handles lines until `/exit` or end of input.
    pub fn run<R, W>(&mut self, mut input: R, out: &mut W, prompt: &str) -> PatriciaResult<()>
    where
        R: BufRead,
        W: Write,
    {
        let mut line = Vec::new();
        loop {
            write!(out, "{prompt}")?;
            out.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            if self.execute(&line, out)? == Outcome::Exit {
                break;
            }
        }
        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    fn search<W: Write>(&self, prefix: &[u8], out: &mut W) -> PatriciaResult<()> {
        let start = Instant::now();
        let (keys, stats) = self.trie.find_by_prefix_with_stats(prefix);
        let elapsed = start.elapsed();

        let mut words: Vec<String> = keys
            .iter()
            .map(|key| String::from_utf8_lossy(key).into_owned())
            .collect();
        words.sort_unstable();

        match words.len() {
            0 => writeln!(
                out,
                "No matches found for prefix '{}'",
                String::from_utf8_lossy(prefix)
            )?,
            1 => writeln!(out, "Found 1 word: {}", words[0])?,
            n => writeln!(out, "Found {n} words: {}", self.display_list(&words))?,
        }

        tracing::debug!(
            prefix = %String::from_utf8_lossy(prefix),
            matches = words.len(),
            ?stats,
            "prefix query"
        );

        if self.verbose {
            write_stats(out, &stats, elapsed.as_secs_f64() * 1000.0)?;
        }
        Ok(())
    }

    fn display_list(&self, words: &[String]) -> String {
        if self.max_results == 0 || words.len() <= self.max_results {
            return words.join(", ");
        }
        format!(
            "{} ... ({} more)",
            words[..self.max_results].join(", "),
            words.len() - self.max_results
        )
    }

    fn write_help<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Commands:")?;
        writeln!(out, "  /help     - Show this help message")?;
        writeln!(
            out,
            "  /verbose  - Toggle verbose mode (currently: {})",
            on_off(self.verbose)
        )?;
        writeln!(out, "  /stats    - Show trie statistics as JSON")?;
        writeln!(out, "  /exit     - Exit the session")?;
        writeln!(out, "  /quit     - Exit the session")?;
        writeln!(out)?;
        writeln!(out, "Type any prefix to list the words starting with it.")
    }
}

fn write_stats<W: Write>(out: &mut W, stats: &SearchStats, elapsed_ms: f64) -> std::io::Result<()> {
    writeln!(
        out,
        "  [verbose] Nodes visited: {}, Max depth: {}, Time: {elapsed_ms:.3}ms",
        stats.nodes_visited, stats.max_depth
    )
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
