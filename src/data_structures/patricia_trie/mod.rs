//! Patricia Trie Implementation
//!
//! This module provides a path-compressed trie (radix tree) over raw byte
//! keys with exact membership, insertion, deletion and prefix enumeration.
//! Chains of single-child nodes are collapsed into one edge carrying a
//! multi-byte label, so the number of nodes is bounded by twice the number
//! of keys rather than by their total length.
//!
//! Every non-root node is either terminal or has at least two children.
//! Insertion splits an edge where a new key diverges from it; deletion prunes
//! dead nodes and merges redundant ones back into their only child.
//!
//! The trie is single-threaded. Embedders that share one instance across
//! threads must serialize every call, reads included, behind one lock.

mod error;
mod node;

use std::mem;

use hashbrown::hash_map::Entry;
use serde::Serialize;

pub use error::PatriciaTrieError;
use node::TrieNode;

/// Result type for Patricia Trie operations
pub type PatriciaTrieResult<T> = Result<T, PatriciaTrieError>;

/// Configuration options for the Patricia Trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatriciaTrieConfig {
    /// Maximum key length in bytes accepted by `insert` (`None` for unbounded)
    pub max_key_length: Option<usize>,
}

/// Counters gathered while answering a prefix query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes touched by the descent and collection phases, root included
    pub nodes_visited: usize,
    /// Deepest node reached, in edges from the root
    pub max_depth: usize,
}

/// Structural summary of a trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    /// Number of keys present
    pub keys: usize,
    /// Number of nodes below the root
    pub nodes: usize,
    /// Total bytes stored in edge labels
    pub label_bytes: usize,
    /// Longest root-to-node path, in edges
    pub max_depth: usize,
    /// Approximate heap footprint of the node graph
    pub estimated_heap_bytes: usize,
}

/// Patricia Trie is a path-compressed set of byte-string keys with fast
/// prefix enumeration.
///
/// Key features:
/// * Byte-oriented matching, no text normalization
/// * Edge splitting on insert and edge merging on delete keep the tree compact
/// * Prefix queries cost the prefix length plus the size of the matching subtree
/// * A reserved payload slot per node (`V`), unused by set operations
#[derive(Debug, Clone)]
pub struct PatriciaTrie<V = ()> {
    /// The root node; its label is always empty
    root: TrieNode<V>,

    /// Number of keys present
    len: usize,

    /// Configuration options
    config: PatriciaTrieConfig,
}

impl PatriciaTrie {
    /// Creates a new empty `PatriciaTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(PatriciaTrieConfig::default())
    }

    /// Creates a new empty `PatriciaTrie` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: PatriciaTrieConfig) -> Self {
        Self::empty(config)
    }
}

impl<V> PatriciaTrie<V> {
    fn empty(config: PatriciaTrieConfig) -> Self {
        Self {
            root: TrieNode::default(),
            len: 0,
            config,
        }
    }

    /// Returns the configuration this trie was built with.
    pub fn config(&self) -> &PatriciaTrieConfig {
        &self.config
    }

    /// Returns the number of keys in the trie, the empty key included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    /// Inserts a key into the trie.
    ///
    /// Inserting a key that is already present leaves the set unchanged.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The key is present after the call.
    /// * `Err(PatriciaTrieError::KeyTooLong)` - The key exceeds the configured
    ///   maximum length; the trie is unchanged.
    pub fn insert<K>(&mut self, key: K) -> PatriciaTrieResult<()>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();

        if let Some(max_length) = self.config.max_key_length {
            if key.len() > max_length {
                return Err(PatriciaTrieError::KeyTooLong {
                    length: key.len(),
                    max_length,
                });
            }
        }

        if Self::insert_into(&mut self.root, key) {
            self.len += 1;
        }
        Ok(())
    }

    /// Walks down from `root`, splitting at most one edge, and marks the node
    /// for `key` terminal. Returns `true` if the key was not present before.
    fn insert_into(root: &mut TrieNode<V>, key: &[u8]) -> bool {
        let mut node = root;
        let mut rest = key;

        loop {
            let Some(&first) = rest.first() else {
                return !mem::replace(&mut node.is_terminal, true);
            };

            let child = match node.child_entry(first) {
                Entry::Vacant(slot) => {
                    slot.insert(Box::new(TrieNode::leaf(rest)));
                    return true;
                }
                Entry::Occupied(slot) => slot.into_mut(),
            };

            let common = common_prefix_len(&child.label, rest);
            if common == child.label.len() {
                rest = &rest[common..];
                node = &mut **child;
                continue;
            }

            // The key ends inside the edge or diverges from it.
            split_edge(child, common);
            if common == rest.len() {
                child.is_terminal = true;
            } else {
                let tail = &rest[common..];
                child.add_child(tail[0], Box::new(TrieNode::leaf(tail)));
            }
            return true;
        }
    }

    /// Checks whether `key` is present.
    pub fn search<K>(&self, key: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        self.walk_exact(key.as_ref(), |_| {})
            .is_some_and(|node| node.is_terminal)
    }

    /// Removes a key from the trie.
    ///
    /// Removing a key that is absent, or that only names a point partway
    /// along an edge, succeeds without changing anything.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove.
    pub fn delete<K>(&mut self, key: K) -> PatriciaTrieResult<()>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();

        let mut path = Vec::new();
        let found = self
            .walk_exact(key, |byte| path.push(byte))
            .is_some_and(|node| node.is_terminal);
        if !found {
            return Ok(());
        }

        // Unmarking a node can only disturb the compression of that node and
        // of its parent: a pruned child leaves the parent with one child
        // fewer, a merged child leaves the child count unchanged. Ancestors
        // above the parent keep their child counts.
        match path.as_slice() {
            [] => self.root.is_terminal = false,
            [target] => {
                unmark_child(&mut self.root, *target);
                compact_child(&mut self.root, *target);
            }
            [ancestors @ .., parent, target] => {
                let Some(grandparent) = descend_mut(&mut self.root, ancestors) else {
                    return Ok(());
                };
                if let Some(parent_node) = grandparent.child_mut(*parent) {
                    unmark_child(parent_node, *target);
                    compact_child(parent_node, *target);
                }
                compact_child(grandparent, *parent);
            }
        }

        self.len -= 1;
        Ok(())
    }

    /// Finds all keys starting with `prefix`. An empty prefix returns every
    /// key. The order of the result is unspecified.
    pub fn find_by_prefix<P>(&self, prefix: P) -> Vec<Vec<u8>>
    where
        P: AsRef<[u8]>,
    {
        self.find_by_prefix_with_stats(prefix).0
    }

    /// Same as [`find_by_prefix`](Self::find_by_prefix), also reporting how
    /// much of the tree the query touched.
    pub fn find_by_prefix_with_stats<P>(&self, prefix: P) -> (Vec<Vec<u8>>, SearchStats)
    where
        P: AsRef<[u8]>,
    {
        let prefix = prefix.as_ref();
        let mut collector = PrefixCollector {
            path: Vec::with_capacity(prefix.len()),
            keys: Vec::new(),
            stats: SearchStats {
                nodes_visited: 1,
                max_depth: 0,
            },
        };

        let mut node = &self.root;
        let mut rest = prefix;
        let mut depth = 0;

        while let Some(&first) = rest.first() {
            let Some(child) = node.child(first) else {
                return (Vec::new(), collector.stats);
            };
            collector.stats.nodes_visited += 1;

            // The prefix may run out partway through the label.
            let overlap = rest.len().min(child.label.len());
            if child.label[..overlap] != rest[..overlap] {
                return (Vec::new(), collector.stats);
            }

            collector.path.extend_from_slice(&child.label);
            rest = &rest[overlap..];
            node = child;
            depth += 1;
        }

        collector.collect(node, depth);
        (collector.keys, collector.stats)
    }

    /// Walks the whole tree and summarizes its shape.
    pub fn stats(&self) -> TrieStats {
        let per_node = mem::size_of::<TrieNode<V>>()
            + mem::size_of::<(u8, Box<TrieNode<V>>)>()
            + 1;

        let mut stats = TrieStats {
            keys: self.len,
            ..TrieStats::default()
        };
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            for child in node.children() {
                stats.nodes += 1;
                stats.label_bytes += child.label.len();
                stats.estimated_heap_bytes += per_node + child.label.capacity();
                stack.push((child, depth + 1));
            }
        }
        stats
    }

    /// Follows `key` edge by edge, calling `on_edge` with the first byte of
    /// each edge taken. Returns the node whose path spells exactly `key`.
    fn walk_exact(&self, key: &[u8], mut on_edge: impl FnMut(u8)) -> Option<&TrieNode<V>> {
        let mut node = &self.root;
        let mut rest = key;

        while let Some(&first) = rest.first() {
            let child = node.child(first)?;
            if !rest.starts_with(&child.label) {
                return None;
            }
            on_edge(first);
            rest = &rest[child.label.len()..];
            node = child;
        }
        Some(node)
    }

    /// Returns a description of the first structural defect found, or `None`
    /// if the tree is well formed and compressed.
    pub(crate) fn structure_violation(&self) -> Option<String> {
        if !self.root.label.is_empty() {
            return Some("root carries a label".to_string());
        }

        let mut terminals = usize::from(self.root.is_terminal);
        let mut stack = vec![(&self.root, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            for child in node.children() {
                let mut child_path = path.clone();
                child_path.extend_from_slice(&child.label);
                let shown = String::from_utf8_lossy(&child_path).into_owned();

                let Some(&first) = child.label.first() else {
                    return Some(format!("empty label below {:?}", String::from_utf8_lossy(&path)));
                };
                if !node.has_child(first) || !node.child(first).is_some_and(|c| std::ptr::eq(c, child)) {
                    return Some(format!("node {shown:?} is not keyed by its first byte"));
                }
                if !child.is_terminal && child.children_count() < 2 {
                    return Some(format!(
                        "non-terminal node {shown:?} has {} children",
                        child.children_count()
                    ));
                }

                terminals += usize::from(child.is_terminal);
                stack.push((child, child_path));
            }
        }

        (terminals != self.len)
            .then(|| format!("len is {} but {terminals} nodes are terminal", self.len))
    }
}

impl<V> Default for PatriciaTrie<V> {
    fn default() -> Self {
        Self::empty(PatriciaTrieConfig::default())
    }
}

/// Accumulates the keys of one subtree.
struct PrefixCollector {
    path: Vec<u8>,
    keys: Vec<Vec<u8>>,
    stats: SearchStats,
}

impl PrefixCollector {
    /// Records every terminal node at or below `node`, whose path is the
    /// current `path`. Recursion depth is the subtree height.
    fn collect<V>(&mut self, node: &TrieNode<V>, depth: usize) {
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if node.is_terminal {
            self.keys.push(self.path.clone());
        }

        for child in node.children() {
            self.stats.nodes_visited += 1;
            let mark = self.path.len();
            self.path.extend_from_slice(&child.label);
            self.collect(child, depth + 1);
            self.path.truncate(mark);
        }
    }
}

/// Number of leading bytes `a` and `b` share.
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Splits the edge into `slot` after `at` bytes: `slot` becomes a fresh
/// non-terminal node labeled with the first `at` bytes, holding the original
/// node (label shortened to the rest) as its only child.
fn split_edge<V>(slot: &mut Box<TrieNode<V>>, at: usize) {
    debug_assert!(at > 0 && at < slot.label.len());
    tracing::trace!(
        label = %String::from_utf8_lossy(&slot.label),
        at,
        "splitting edge"
    );

    let shared = slot.label[..at].to_vec();
    let mut lower = mem::replace(slot, Box::new(TrieNode::new(shared)));
    lower.label.drain(..at);
    slot.add_child(lower.label[0], lower);
}

fn descend_mut<'a, V>(root: &'a mut TrieNode<V>, path: &[u8]) -> Option<&'a mut TrieNode<V>> {
    let mut node = root;
    for &byte in path {
        node = node.child_mut(byte)?;
    }
    Some(node)
}

fn unmark_child<V>(parent: &mut TrieNode<V>, byte: u8) {
    if let Some(child) = parent.child_mut(byte) {
        child.is_terminal = false;
        child.payload = None;
    }
}

/// Restores compression for the child of `parent` under `byte`: a dead child
/// is pruned, a non-terminal child with one child of its own is merged into
/// it.
fn compact_child<V>(parent: &mut TrieNode<V>, byte: u8) {
    let Some(child) = parent.child_mut(byte) else {
        return;
    };
    if child.is_terminal {
        return;
    }

    if child.is_leaf() {
        tracing::trace!(label = %String::from_utf8_lossy(&child.label), "pruning dead node");
        parent.remove_child(byte);
        return;
    }

    if let Some(mut grandchild) = child.take_sole_child() {
        let mut label = mem::take(&mut child.label);
        label.extend_from_slice(&grandchild.label);
        tracing::trace!(label = %String::from_utf8_lossy(&label), "merging edges");
        grandchild.label = label;
        parent.add_child(byte, grandchild);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn trie_with(keys: &[&str]) -> PatriciaTrie {
        let mut trie = PatriciaTrie::new();
        for key in keys {
            trie.insert(key).unwrap();
        }
        trie
    }

    fn prefix_set(trie: &PatriciaTrie, prefix: &str) -> BTreeSet<String> {
        trie.find_by_prefix(prefix)
            .into_iter()
            .map(|key| String::from_utf8(key).unwrap())
            .collect()
    }

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_new_trie_is_empty() {
        let trie = PatriciaTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert!(!trie.search(""));
        assert!(trie.find_by_prefix("").is_empty());
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = PatriciaTrie::new();

        trie.insert("hello").unwrap();
        assert_eq!(trie.len(), 1);
        assert!(trie.search("hello"));
        assert!(!trie.search("hell"));
        assert!(!trie.search("hello!"));

        // Idempotent insert
        trie.insert("hello").unwrap();
        assert_eq!(trie.len(), 1);

        trie.delete("hello").unwrap();
        assert!(!trie.search("hello"));
        assert!(trie.is_empty());

        // Deleting again is a no-op
        trie.delete("hello").unwrap();
        assert!(trie.is_empty());
    }

    #[test]
    fn test_split_where_key_ends_inside_edge() {
        let mut trie = trie_with(&["romane"]);
        trie.insert("rom").unwrap();

        let root_child = trie.root.child(b'r').unwrap();
        assert_eq!(root_child.label, b"rom");
        assert!(root_child.is_terminal);
        assert_eq!(root_child.children_count(), 1);
        assert_eq!(root_child.child(b'a').unwrap().label, b"ane");

        assert!(trie.search("rom"));
        assert!(trie.search("romane"));
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_split_where_key_diverges_inside_edge() {
        let mut trie = trie_with(&["romane"]);
        trie.insert("romulus").unwrap();

        let shared = trie.root.child(b'r').unwrap();
        assert_eq!(shared.label, b"rom");
        assert!(!shared.is_terminal);
        assert_eq!(shared.children_count(), 2);
        assert_eq!(shared.child(b'a').unwrap().label, b"ane");
        assert_eq!(shared.child(b'u').unwrap().label, b"ulus");

        assert!(!trie.search("rom"));
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_scenario_common_words() {
        let trie = trie_with(&["cat", "cats", "dog", "dogs", "elephant"]);

        assert!(trie.search("cat"));
        assert!(!trie.search("ca"));
        assert!(trie.search("elephant"));
        assert!(!trie.search("notfound"));

        assert_eq!(prefix_set(&trie, "ca"), set(&["cat", "cats"]));
        assert_eq!(prefix_set(&trie, "dog"), set(&["dog", "dogs"]));
        assert_eq!(prefix_set(&trie, "el"), set(&["elephant"]));
        assert!(prefix_set(&trie, "xyz").is_empty());
    }

    #[test]
    fn test_scenario_delete_middle_of_chain() {
        let mut trie = trie_with(&["a", "ab", "abc"]);
        trie.delete("ab").unwrap();

        assert!(!trie.search("ab"));
        assert!(trie.search("a"));
        assert!(trie.search("abc"));
        assert_eq!(prefix_set(&trie, "a"), set(&["a", "abc"]));

        // "b" and "c" were merged into one edge
        let a = trie.root.child(b'a').unwrap();
        assert_eq!(a.child(b'b').unwrap().label, b"bc");
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_scenario_delete_keeps_siblings() {
        let mut trie = trie_with(&["cat", "cats", "dog"]);
        trie.delete("cat").unwrap();

        assert!(!trie.search("cat"));
        assert!(trie.search("cats"));
        assert!(trie.search("dog"));
        assert_eq!(trie.root.child(b'c').unwrap().label, b"cats");
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_delete_prunes_and_merges_parent() {
        let mut trie = trie_with(&["team", "tea", "ten"]);
        // "te" -> {"a" (terminal) -> "m", "n"}
        trie.delete("ten").unwrap();

        // "te" lost a child and is merged with "a"
        let merged = trie.root.child(b't').unwrap();
        assert_eq!(merged.label, b"tea");
        assert!(merged.is_terminal);
        assert_eq!(merged.child(b'm').unwrap().label, b"m");
        assert!(trie.structure_violation().is_none());

        trie.delete("tea").unwrap();
        assert_eq!(trie.root.child(b't').unwrap().label, b"team");
        assert!(trie.search("team"));
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_delete_partial_path_is_noop() {
        let mut trie = trie_with(&["romane", "romulus"]);

        trie.delete("rom").unwrap();
        trie.delete("ro").unwrap();
        trie.delete("romanes").unwrap();
        trie.delete("").unwrap();

        assert_eq!(trie.len(), 2);
        assert!(trie.search("romane"));
        assert!(trie.search("romulus"));
        assert!(trie.structure_violation().is_none());
    }

    #[test]
    fn test_empty_key() {
        let mut trie = trie_with(&["a"]);
        trie.insert("").unwrap();
        assert!(trie.search(""));
        assert!(trie.search("a"));
        assert_eq!(trie.len(), 2);
        assert_eq!(prefix_set(&trie, ""), set(&["", "a"]));

        trie.delete("").unwrap();
        assert!(!trie.search(""));
        assert!(trie.search("a"));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_prefix_ending_inside_label() {
        let trie = trie_with(&["elephant", "elegant", "element"]);

        // "ele" is the shared edge, "elep" stops inside "phant"
        assert_eq!(prefix_set(&trie, "elep"), set(&["elephant"]));
        assert_eq!(prefix_set(&trie, "e"), set(&["elephant", "elegant", "element"]));
        assert!(prefix_set(&trie, "elepx").is_empty());
        assert!(prefix_set(&trie, "elephants").is_empty());
    }

    #[test]
    fn test_prefix_query_does_not_walk_unrelated_subtrees() {
        let mut trie = trie_with(&["cat", "cats"]);
        for i in 0..500 {
            trie.insert(format!("dog{i}")).unwrap();
        }

        let (keys, stats) = trie.find_by_prefix_with_stats("ca");
        assert_eq!(keys.len(), 2);
        // root, "cat", "s"
        assert_eq!(stats.nodes_visited, 3);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_binary_keys() {
        let mut trie = PatriciaTrie::new();
        trie.insert([0u8, 255, 1]).unwrap();
        trie.insert([0u8, 255, 2]).unwrap();
        trie.insert([0xC3u8, 0x28]).unwrap();

        assert!(trie.search([0u8, 255, 1]));
        assert!(!trie.search([0u8, 255]));
        assert_eq!(trie.find_by_prefix([0u8]).len(), 2);
        assert!(trie.search([0xC3u8, 0x28]));
    }

    #[test]
    fn test_max_key_length() {
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
        assert_eq!(trie.len(), 1);

        // Deleting an over-long key is still just a miss
        assert!(trie.delete("fives").is_ok());
    }

    #[test]
    fn test_stats() {
        let trie = trie_with(&["cat", "cats", "dog"]);
        let stats = trie.stats();

        assert_eq!(stats.keys, 3);
        // "cat", "s", "dog"
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.label_bytes, 7);
        assert_eq!(stats.max_depth, 2);
        assert!(stats.estimated_heap_bytes >= stats.label_bytes);
    }

    #[test]
    fn test_clear() {
        let mut trie = trie_with(&["cat", "cats", ""]);
        trie.clear();
        assert!(trie.is_empty());
        assert!(!trie.search("cat"));
        assert!(!trie.search(""));
        assert_eq!(trie.stats(), TrieStats::default());
    }

    #[test]
    fn test_payload_type_parameter() {
        let mut trie: PatriciaTrie<String> = PatriciaTrie::default();
        trie.insert("key").unwrap();
        assert!(trie.search("key"));
        assert!(trie.root.child(b'k').unwrap().payload.is_none());
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len(b"", b"abc"), 0);
        assert_eq!(common_prefix_len(b"abc", b"abd"), 2);
        assert_eq!(common_prefix_len(b"abc", b"abc"), 3);
        assert_eq!(common_prefix_len(b"abc", b"ab"), 2);
        assert_eq!(common_prefix_len(b"xbc", b"abc"), 0);
    }
}
