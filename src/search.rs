use tracing::trace;

use crate::node::{Entry, Node};
use crate::PrefixTrie;

/// The best completion for a prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion<'a> {
    /// The stored word, borrowed from the trie.
    pub word: &'a [u8],
    /// How many times the word was inserted.
    pub frequency: u64,
}

/// Where the maximum search starts after the prefix has been consumed.
enum SearchRoot<'a> {
    /// Empty prefix: every entry of the root node is a candidate.
    Node(&'a Node),
    /// The entry for the prefix's last byte, itself a candidate along with
    /// its subtree.
    Entry(&'a Entry),
}

impl PrefixTrie {
    /// Walks `prefix` from the root. Every byte but the last must lead to a
    /// child node.
    fn descend(&self, prefix: &[u8]) -> Option<SearchRoot<'_>> {
        let Some((&last, path)) = prefix.split_last() else {
            return Some(SearchRoot::Node(&self.root));
        };
        let mut node = &self.root;
        for &byte in path {
            node = node.entry(byte).child.as_ref()?;
        }
        Some(SearchRoot::Entry(node.entry(last)))
    }

    /// Returns the highest-frequency word starting with `prefix`, or `None`
    /// if no inserted word starts with it.
    ///
    /// Among words sharing the highest frequency, the lexicographically
    /// smallest (by byte value) wins. An empty prefix matches every word.
    pub fn complete(&self, prefix: impl AsRef<[u8]>) -> Option<Completion<'_>> {
        let walk = match self.descend(prefix.as_ref())? {
            SearchRoot::Node(node) => Preorder::below(node),
            SearchRoot::Entry(entry) => Preorder::from_entry(entry),
        };

        // Preorder yields words in lexicographic order, so keeping the first
        // of equal frequencies is the tie-break.
        let mut best: Option<&Entry> = None;
        for entry in walk.filter(|e| e.is_terminal()) {
            if best.is_none_or(|b| entry.frequency > b.frequency) {
                best = Some(entry);
            }
        }

        let entry = best?;
        Some(Completion {
            word: entry.word.as_deref()?,
            frequency: entry.frequency,
        })
    }

    /// Returns a copy of the highest-frequency word starting with `prefix`.
    ///
    /// Falls back to a copy of `prefix` when nothing matches. The result is
    /// owned and stays valid after the trie is dropped.
    ///
    /// ```
    /// use freq_trie::PrefixTrie;
    ///
    /// let mut pt = PrefixTrie::new();
    /// pt.insert("cargo build").unwrap();
    /// pt.insert("cargo test").unwrap();
    /// pt.insert("cargo test").unwrap();
    /// assert_eq!(pt.autocomplete("cargo "), b"cargo test");
    /// assert_eq!(pt.autocomplete("git"), b"git");
    /// ```
    pub fn autocomplete(&self, prefix: impl AsRef<[u8]>) -> Vec<u8> {
        let prefix = prefix.as_ref();
        match self.complete(prefix) {
            Some(found) => {
                trace!(frequency = found.frequency, "autocomplete hit");
                found.word.to_vec()
            }
            None => {
                trace!("autocomplete miss");
                prefix.to_vec()
            }
        }
    }

    /// Like [`autocomplete`](Self::autocomplete), decoding the result as
    /// UTF-8 (invalid sequences are replaced).
    pub fn autocomplete_str(&self, prefix: &str) -> String {
        String::from_utf8_lossy(&self.autocomplete(prefix)).into_owned()
    }

    /// Returns how many times exactly `word` was inserted (0 if never).
    pub fn frequency(&self, word: impl AsRef<[u8]>) -> u64 {
        match self.descend(word.as_ref()) {
            Some(SearchRoot::Entry(entry)) => entry.frequency,
            _ => 0,
        }
    }

    /// Returns true if `word` was inserted at least once.
    pub fn contains(&self, word: impl AsRef<[u8]>) -> bool {
        self.frequency(word) > 0
    }
}

/// Depth-first pre-order walk over occupied entries, in ascending byte
/// order at every level. An entry comes before everything below it.
pub(crate) struct Preorder<'a> {
    stack: Vec<&'a Entry>,
}

impl<'a> Preorder<'a> {
    /// Walks every entry below `node`.
    pub(crate) fn below(node: &'a Node) -> Self {
        let mut walk = Self { stack: Vec::new() };
        walk.push_children(node);
        walk
    }

    /// Walks `entry` and everything below it.
    pub(crate) fn from_entry(entry: &'a Entry) -> Self {
        Self { stack: vec![entry] }
    }

    fn push_children(&mut self, node: &'a Node) {
        self.stack
            .extend(node.entries().iter().rev().filter(|e| !e.is_vacant()));
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        let entry = self.stack.pop()?;
        if let Some(child) = &entry.child {
            self.push_children(child);
        }
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn build(words: &[&str]) -> PrefixTrie {
        let mut pt = PrefixTrie::new();
        for w in words {
            pt.insert(w).unwrap();
        }
        pt
    }

    // === autocomplete tests ===

    #[test]
    fn tie_break_then_overtake() {
        let mut pt = build(&["he", "hey", "hey", "hello", "hello", "helloworld"]);
        assert_eq!(pt.autocomplete("h"), b"hello");
        pt.insert("hey").unwrap();
        pt.insert("hey").unwrap();
        assert_eq!(pt.autocomplete("h"), b"hey");
        assert_eq!(pt.autocomplete("hel"), b"hello");
    }

    #[test]
    fn compares_across_sibling_branches() {
        // A first-nonzero-counter walk would stop at "ab".
        let pt = build(&["ab", "ac", "ac", "ad", "ad", "ad"]);
        assert_eq!(pt.autocomplete("a"), b"ad");
    }

    #[test]
    fn compares_across_depths() {
        let pt = build(&["abc", "abcdef", "abcdef"]);
        assert_eq!(pt.autocomplete("a"), b"abcdef");
        assert_eq!(pt.autocomplete("abc"), b"abcdef");
    }

    #[test]
    fn exact_prefix_word_is_candidate() {
        let pt = build(&["he", "he", "hello"]);
        assert_eq!(pt.autocomplete("he"), b"he");
        assert_eq!(pt.autocomplete("hel"), b"hello");
    }

    #[test]
    fn shorter_word_wins_tie_with_extension() {
        let pt = build(&["hello", "help"]);
        assert_eq!(pt.autocomplete("hel"), b"hello");
        let pt = build(&["hello", "hell"]);
        assert_eq!(pt.autocomplete("he"), b"hell");
    }

    #[test]
    fn every_prefix_completes_to_only_word() {
        let pt = build(&["rustup", "rustup", "rustup"]);
        for end in 0..="rustup".len() {
            assert_eq!(pt.autocomplete(&"rustup"[..end]), b"rustup");
        }
    }

    #[test]
    fn no_match_returns_prefix() {
        let pt = build(&["hello"]);
        assert_eq!(pt.autocomplete("xyz"), b"xyz");
        assert_eq!(pt.autocomplete("hex"), b"hex");
        assert_eq!(pt.autocomplete("hellos"), b"hellos");
    }

    #[test]
    fn prefix_with_control_byte_is_no_match() {
        let pt = build(&["hello"]);
        assert_eq!(pt.autocomplete("h\n"), b"h\n");
    }

    #[test]
    fn empty_prefix_returns_global_best() {
        let pt = build(&["zeta", "zeta", "alpha", "alpha", "mid"]);
        assert_eq!(pt.autocomplete(""), b"alpha");
        let pt = build(&["zeta", "zeta", "alpha", "mid"]);
        assert_eq!(pt.autocomplete(""), b"zeta");
    }

    #[test]
    fn empty_trie() {
        let pt = PrefixTrie::new();
        assert_eq!(pt.autocomplete(""), b"");
        assert_eq!(pt.autocomplete("abc"), b"abc");
        assert_eq!(pt.complete(""), None);
    }

    #[test]
    fn internal_path_prefix_completes() {
        // "ab" exists only as a path to "abc".
        let pt = build(&["abc"]);
        assert_eq!(pt.complete("ab").map(|c| c.word), Some(&b"abc"[..]));
        assert_eq!(pt.autocomplete("abd"), b"abd");
    }

    #[test]
    fn byte_order_tie_break() {
        let mut pt = PrefixTrie::new();
        pt.insert([b'k', 0xe9]).unwrap();
        pt.insert([b'k', b'z']).unwrap();
        assert_eq!(pt.autocomplete("k"), vec![b'k', b'z']);
    }

    #[test]
    fn lookups_do_not_mutate() {
        let pt = build(&["one", "two", "two"]);
        let nodes = pt.num_nodes();
        for _ in 0..3 {
            assert_eq!(pt.autocomplete("t"), b"two");
            assert_eq!(pt.autocomplete("nothing"), b"nothing");
        }
        assert_eq!(pt.num_nodes(), nodes);
    }

    #[test]
    fn complete_reports_frequency() {
        let pt = build(&["go", "go", "gopher"]);
        assert_eq!(
            pt.complete("g"),
            Some(Completion {
                word: b"go",
                frequency: 2
            })
        );
    }

    #[test]
    fn autocomplete_str_decodes() {
        let pt = build(&["café", "cafe", "café"]);
        assert_eq!(pt.autocomplete_str("ca"), "café");
        assert_eq!(pt.autocomplete_str("tea"), "tea");
    }

    #[test]
    fn preorder_visits_in_lexicographic_order() {
        let pt = build(&["b", "ab", "a", "abc", "ba"]);
        let words: Vec<&[u8]> = Preorder::below(&pt.root)
            .filter_map(|e| e.word.as_deref())
            .collect();
        assert_eq!(
            words,
            vec![&b"a"[..], &b"ab"[..], &b"abc"[..], &b"b"[..], &b"ba"[..]]
        );
    }

    // === frequency tests ===

    #[test]
    fn frequency_exact_only() {
        let pt = build(&["abc", "abc", "abcd"]);
        assert_eq!(pt.frequency("abc"), 2);
        assert_eq!(pt.frequency("abcd"), 1);
        assert_eq!(pt.frequency("ab"), 0);
        assert_eq!(pt.frequency("abcde"), 0);
        assert_eq!(pt.frequency(""), 0);
        assert!(pt.contains("abcd"));
        assert!(!pt.contains("a"));
    }

    // === model tests ===

    fn model_best(counts: &BTreeMap<Vec<u8>, u64>, prefix: &[u8]) -> Vec<u8> {
        let mut best: Option<(&Vec<u8>, u64)> = None;
        for (word, &freq) in counts.range(prefix.to_vec()..) {
            if !word.starts_with(prefix) {
                break;
            }
            if best.is_none_or(|(_, f)| freq > f) {
                best = Some((word, freq));
            }
        }
        best.map_or_else(|| prefix.to_vec(), |(w, _)| w.clone())
    }

    proptest! {
        #[test]
        fn matches_sorted_map_model(
            words in prop::collection::vec("[a-d]{1,5}", 1..60),
            prefixes in prop::collection::vec("[a-e]{0,3}", 1..20),
        ) {
            let mut pt = PrefixTrie::new();
            let mut counts: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
            for w in &words {
                pt.insert(w).unwrap();
                *counts.entry(w.as_bytes().to_vec()).or_default() += 1;
            }

            prop_assert_eq!(pt.len(), counts.len());
            for p in &prefixes {
                prop_assert_eq!(pt.autocomplete(p), model_best(&counts, p.as_bytes()));
            }
            for (word, &freq) in &counts {
                prop_assert_eq!(pt.frequency(word), freq);
            }
        }
    }
}
