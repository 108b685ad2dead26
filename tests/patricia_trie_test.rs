// Copyright (c) 2025 Patricia Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the Patricia Trie.
//! Drives the trie, the word list loader and the session through the public API only.

use std::fs;

use patricia_trie_lib::config::loader::LoaderConfig;
use patricia_trie_lib::config::repl::ReplConfig;
use patricia_trie_lib::history::QueryHistory;
use patricia_trie_lib::loader;
use patricia_trie_lib::session::{Outcome, Session};
use patricia_trie_lib::{PatriciaTrie, PatriciaTrieConfig, PatriciaTrieError};

fn sorted(mut keys: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    keys.sort();
    keys
}

#[test]
fn test_basic_membership_and_prefix() {
    let mut trie = PatriciaTrie::new();
    for word in ["test", "toaster", "toasting", "slow", "slowly"] {
        trie.insert(word).unwrap();
    }

    assert!(trie.search("toaster"));
    assert!(trie.search("slow"));
    assert!(!trie.search("toast"));
    assert!(!trie.search("slowl"));

    assert_eq!(
        sorted(trie.find_by_prefix("toast")),
        [b"toaster".to_vec(), b"toasting".to_vec()]
    );
    assert_eq!(sorted(trie.find_by_prefix("sl")).len(), 2);
    assert!(trie.find_by_prefix("z").is_empty());
}

#[test]
fn test_delete_keeps_siblings() {
    let mut trie = PatriciaTrie::new();
    for word in ["romane", "romanus", "romulus", "rubens"] {
        trie.insert(word).unwrap();
    }

    trie.delete("romanus").unwrap();
    trie.delete("roman").unwrap();

    assert!(!trie.search("romanus"));
    assert!(trie.search("romane"));
    assert!(trie.search("romulus"));
    assert_eq!(trie.len(), 3);
    assert_eq!(
        sorted(trie.find_by_prefix("rom")),
        [b"romane".to_vec(), b"romulus".to_vec()]
    );
}

#[test]
fn test_duplicate_insert_is_idempotent() {
    let mut trie = PatriciaTrie::new();
    trie.insert("cat").unwrap();
    let before = trie.stats();
    trie.insert("cat").unwrap();

    assert_eq!(trie.len(), 1);
    assert_eq!(trie.stats(), before);
}

#[test]
fn test_key_length_limit() {
    let mut trie = PatriciaTrie::with_config(PatriciaTrieConfig {
        max_key_length: Some(4),
    });

    assert!(trie.insert("four").is_ok());
    assert_eq!(
        trie.insert("fives"),
        Err(PatriciaTrieError::KeyTooLong {
            length: 5,
            max_length: 4
        })
    );
    assert!(!trie.search("fives"));
}

#[test]
fn test_load_word_list_and_query() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    fs::write(&path, "cat\ncats\n\ndog\r\ndogs\nelephant\n").unwrap();

    let mut trie = PatriciaTrie::new();
    let stats = loader::load_file(&path, &mut trie, &LoaderConfig::default()).unwrap();
    assert_eq!(stats.keys_inserted, 5);
    assert_eq!(stats.skipped, 1);

    let mut session = Session::new(trie, QueryHistory::new(10), &ReplConfig::default());
    let mut out = Vec::new();
    session
        .run("dog\n/verbose\nel\n/quit\n".as_bytes(), &mut out, "> ")
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Found 2 words: dog, dogs"));
    assert!(text.contains("[info] Verbose mode enabled"));
    assert!(text.contains("Found 1 word: elephant"));
    assert!(text.contains("[verbose] Nodes visited:"));
    assert!(text.ends_with("Goodbye!\n"));
}

#[test]
fn test_history_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history");

    let mut trie = PatriciaTrie::new();
    trie.insert("cat").unwrap();

    let mut session = Session::new(trie, QueryHistory::new(10), &ReplConfig::default());
    let mut out = Vec::new();
    assert_eq!(session.execute("ca", &mut out).unwrap(), Outcome::Continue);
    assert_eq!(session.execute("/exit", &mut out).unwrap(), Outcome::Exit);
    session.into_history().save(&history_path).unwrap();

    let reloaded = QueryHistory::load(&history_path, 10).unwrap();
    assert_eq!(reloaded.entries(), ["ca", "/exit"]);
}
