//! Ply-keyed prefix tree recording which lines have been accepted.
//!
//! Accepting a line marks its node as a cut and flags every ancestor as having
//! an accepted line below it, so both directions of the prefix relation are
//! answered by one walk from the root.

use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<String, TrieNode>,
    accepted: bool,
    accepted_below: bool,
}

#[derive(Default)]
pub struct PrefixTrie {
    root: TrieNode,
    accepted: usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted lines.
    pub fn len(&self) -> usize {
        self.accepted
    }

    pub fn is_empty(&self) -> bool {
        self.accepted == 0
    }

    /// True if `plies` equals, extends, or is extended by an accepted line.
    pub fn overlaps(&self, plies: &[&str]) -> bool {
        let mut current = &self.root;

        for ply in plies {
            current = match current.children.get(*ply) {
                Some(child) => child,
                None => return false,
            };
            if current.accepted {
                return true;
            }
        }

        current.accepted_below
    }

    /// Accept `plies` unless it overlaps an accepted line. Returns whether it was accepted.
    pub fn try_accept(&mut self, plies: &[&str]) -> bool {
        if plies.is_empty() || self.overlaps(plies) {
            return false;
        }

        let mut current = &mut self.root;
        for ply in plies {
            current.accepted_below = true;
            current = current.children.entry(ply.to_string()).or_default();
        }
        current.accepted = true;
        self.accepted += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestor_rejected_after_descendant() {
        let mut trie = PrefixTrie::new();
        assert!(trie.try_accept(&["e4", "c5", "Nf3", "d6"]));
        assert!(!trie.try_accept(&["e4", "c5"]));
        assert!(!trie.try_accept(&["e4", "c5", "Nf3"]));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_descendant_rejected_after_ancestor() {
        let mut trie = PrefixTrie::new();
        assert!(trie.try_accept(&["d4", "d5"]));
        assert!(trie.overlaps(&["d4", "d5", "c4"]));
        assert!(!trie.try_accept(&["d4", "d5"]));
    }

    #[test]
    fn test_siblings_coexist() {
        let mut trie = PrefixTrie::new();
        assert!(trie.try_accept(&["e4", "c5", "Nf3"]));
        assert!(trie.try_accept(&["e4", "c5", "Nc3"]));
        assert!(trie.try_accept(&["e4", "e5"]));
        assert!(!trie.overlaps(&["d4"]));
        assert!(!trie.try_accept(&[]));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_check_suffix_is_a_distinct_ply() {
        let mut trie = PrefixTrie::new();
        assert!(trie.try_accept(&["e4", "e5", "Qh5", "Nc6"]));
        assert!(trie.try_accept(&["e4", "e5", "Qh5", "Nc6+"]));
    }
}
