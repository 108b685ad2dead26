// Copyright (c) 2025 Patricia Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Patricia Trie.
//!
//! A node owns the edge label leading into it from its parent and its
//! children, keyed by the first byte of each child's label. Nodes carry no
//! invariant logic of their own; splitting and merging live in the trie.

use fnv::FnvBuildHasher;
use hashbrown::hash_map::{Entry, HashMap};

/// Child table keyed by the first byte of each child's label.
pub(crate) type ChildMap<V> = HashMap<u8, Box<TrieNode<V>>, FnvBuildHasher>;

/// A node in the Patricia Trie.
#[derive(Debug, Clone)]
pub(crate) struct TrieNode<V> {
    /// Edge label from the parent to this node (empty only for the root)
    pub(crate) label: Vec<u8>,

    /// Children keyed by the first byte of their label
    children: ChildMap<V>,

    /// Whether the path ending at this node is a key in the set
    pub(crate) is_terminal: bool,

    /// Reserved per-key value slot
    #[allow(dead_code)]
    pub(crate) payload: Option<V>,
}

impl<V> TrieNode<V> {
    /// Creates a non-terminal node with the given label and no children.
    pub(crate) fn new(label: Vec<u8>) -> Self {
        Self {
            label,
            children: ChildMap::default(),
            is_terminal: false,
            payload: None,
        }
    }

    /// Creates a terminal node with no children.
    pub(crate) fn leaf(label: &[u8]) -> Self {
        let mut node = Self::new(label.to_vec());
        node.is_terminal = true;
        node
    }

    pub(crate) fn has_child(&self, byte: u8) -> bool {
        self.children.contains_key(&byte)
    }

    pub(crate) fn child(&self, byte: u8) -> Option<&TrieNode<V>> {
        self.children.get(&byte).map(|child| &**child)
    }

    pub(crate) fn child_mut(&mut self, byte: u8) -> Option<&mut TrieNode<V>> {
        self.children.get_mut(&byte).map(|child| &mut **child)
    }

    /// Returns the child slot for `byte`, occupied or not.
    pub(crate) fn child_entry(&mut self, byte: u8) -> Entry<'_, u8, Box<TrieNode<V>>, FnvBuildHasher> {
        self.children.entry(byte)
    }

    /// Attaches `child` under `byte`, replacing any existing child.
    pub(crate) fn add_child(&mut self, byte: u8, child: Box<TrieNode<V>>) {
        self.children.insert(byte, child);
    }

    pub(crate) fn remove_child(&mut self, byte: u8) -> Option<Box<TrieNode<V>>> {
        self.children.remove(&byte)
    }

    /// Detaches and returns the only child, if there is exactly one.
    pub(crate) fn take_sole_child(&mut self) -> Option<Box<TrieNode<V>>> {
        if self.children.len() != 1 {
            return None;
        }
        self.children.drain().next().map(|(_, child)| child)
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &TrieNode<V>> {
        self.children.values().map(|child| &**child)
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn children_count(&self) -> usize {
        self.children.len()
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
