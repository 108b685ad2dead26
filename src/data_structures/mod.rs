//! Data structures for the Patricia Trie tooling.
//!
//! The trie is the core of the crate; everything else in the crate is a
//! collaborator that feeds it words or queries it.

pub mod patricia_trie;

pub use patricia_trie::{
    PatriciaTrie, PatriciaTrieConfig, PatriciaTrieError, PatriciaTrieResult, SearchStats,
    TrieStats,
};
