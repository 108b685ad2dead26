//! patricia-repl - interactive prefix search over a word list.
//!
//! Loads a word list into a Patricia trie, then answers prefix queries typed
//! on stdin until `/exit` or end of input. Logs go to stderr.

use clap::{Parser, Subcommand};
use patricia_trie_lib::config::{ConfigLoader, LogConfig, PatriciaConfig, ENV_PREFIX};
use patricia_trie_lib::data_structures::PatriciaTrie;
use patricia_trie_lib::error::{
    report_error, set_error_reporter, ErrorContext, PatriciaError, PatriciaResult,
    TracingErrorReporter,
};
use patricia_trie_lib::history::QueryHistory;
use patricia_trie_lib::loader;
use patricia_trie_lib::session::Session;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(
    name = "patricia-repl",
    version,
    author,
    about,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Start in verbose mode (print search statistics)
    #[clap(short, long)]
    verbose: bool,

    /// Word list, one word per line
    #[clap(value_parser, required = true)]
    wordlist: Option<PathBuf>,

    /// Command to execute instead of starting a session
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> PatriciaResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let installed = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed
        .map_err(|e| PatriciaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() -> PatriciaResult<()> {
    let args = Args::parse();
    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    if let Some(Command::GenConfig { output }) = &args.command {
        return write_default_config(output);
    }

    let config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            report_error(ErrorContext::new(e.into(), "config"));
            process::exit(1);
        }
    };

    init_logging(&config.log)?;
    set_error_reporter(Arc::new(TracingErrorReporter));

    match (args.command, args.wordlist) {
        (Some(Command::Validate), _) => {
            println!("Configuration is valid");
            Ok(())
        }
        (Some(Command::GenConfig { .. }), _) => Ok(()),
        (None, Some(wordlist)) => {
            if let Err(e) = run_session(&wordlist, &config, args.verbose) {
                report_error(session_error_context(e, &wordlist));
                process::exit(1);
            }
            Ok(())
        }
        (None, None) => Err(PatriciaError::Custom("No word list given".to_string())),
    }
}

/// Only load failures are about the word list; everything else happened
/// while the session was running.
fn session_error_context(error: PatriciaError, wordlist: &Path) -> ErrorContext {
    match error {
        PatriciaError::Load(_) => ErrorContext::new(error, "loader")
            .with_details(format!("word list: {}", wordlist.display())),
        other => ErrorContext::new(other, "session"),
    }
}

fn write_default_config(output: &Path) -> PatriciaResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&PatriciaConfig::default())
        .map_err(|e| PatriciaError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    println!("Default configuration written to {}", output.display());
    Ok(())
}

/// Builds the trie, then runs the interactive loop on stdin/stdout.
fn run_session(wordlist: &Path, config: &PatriciaConfig, verbose: bool) -> PatriciaResult<()> {
    let mut trie = PatriciaTrie::with_config((&config.trie).into());
    let load = loader::load_file(wordlist, &mut trie, &config.loader)?;
    println!("Loaded {} words from {}", load.keys_inserted, wordlist.display());

    let mut repl = config.repl.clone();
    repl.verbose |= verbose;

    if repl.verbose {
        let shape = trie.stats();
        println!(
            "[verbose] Trie build time: {:.3}ms, Estimated memory: {:.2}MB, Nodes: {}",
            load.duration.as_secs_f64() * 1000.0,
            shape.estimated_heap_bytes as f64 / (1024.0 * 1024.0),
            shape.nodes
        );
    }

    let history_path = config.history.resolved_path();
    let max_entries = config.history.max_entries;
    let history = if config.history.enabled {
        QueryHistory::load(&history_path, max_entries).unwrap_or_else(|e| {
            warn!(error = %e, "starting with an empty history");
            QueryHistory::new(max_entries)
        })
    } else {
        QueryHistory::new(max_entries)
    };

    let mode = if repl.verbose { " (Verbose mode enabled)" } else { "" };
    println!("\nPatricia Trie REPL started{mode}. Commands: /exit, /quit, /verbose, /stats, /help\n");

    let mut session = Session::new(trie, history, &repl);
    let outcome = session.run(io::stdin().lock(), &mut io::stdout(), &repl.prompt);

    if config.history.enabled {
        match session.into_history().save(&history_path) {
            Ok(()) => info!(path = %history_path.display(), "history saved"),
            Err(e) => warn!(error = %e, "history was not saved"),
        }
    }

    outcome
}
