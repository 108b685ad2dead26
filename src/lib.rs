//! Patricia Trie Library
//!
//! An in-memory, path-compressed trie over byte-string keys with exact
//! membership, insertion, deletion and prefix enumeration, plus the tooling
//! built around it: a word list loader, a persisted query history and an
//! interactive prefix-search session.
//!
//! # Architecture
//!
//! - [`data_structures::PatriciaTrie`] owns every node and is the only code
//!   that mutates the tree
//! - [`loader`], [`history`] and [`session`] only call the trie's public
//!   operations
//! - [`config`] and [`error`] provide the ambient layers shared by all of them
//!
//! The library never installs a tracing subscriber; that is left to the binary.

pub mod config;
pub mod data_structures;
pub mod error;
pub mod history;
pub mod loader;
pub mod session;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use data_structures::{PatriciaTrie, PatriciaTrieConfig, PatriciaTrieError};
