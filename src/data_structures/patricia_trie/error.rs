//! Error types for the Patricia Trie.
//!
//! Lookups never fail; "not found" is a normal answer. Only mutations return
//! a result so that key constraints can be enforced without changing the
//! call signatures.

/// Errors that can occur in Patricia Trie operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PatriciaTrieError {
    /// Error when a key exceeds the configured maximum length.
    #[error("Key of {length} bytes exceeds maximum key length of {max_length}")]
    KeyTooLong {
        /// Length of the rejected key in bytes.
        length: usize,
        /// The maximum allowed length.
        max_length: usize,
    },
}
