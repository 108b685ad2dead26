//! Test modules for the Patricia Trie crate.
//!
//! This module contains crate-internal test suites:
//! - Structural tests that walk the trie after every mutation
//! - Property-based tests against a `BTreeSet` model using proptest
//! - Table-driven tests using test-case
//! - Configuration and error handling tests
