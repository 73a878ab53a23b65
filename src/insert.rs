use tracing::{trace, warn};

use crate::label::validate;
use crate::node::{copy_word, Node};
use crate::{PrefixTrie, TrieError};

impl PrefixTrie {
    /// Records one insertion of `word`.
    ///
    /// Missing nodes along the path are allocated. The last byte's entry
    /// keeps a copy of `word` and its frequency goes up by one. Inserting
    /// the same word again only bumps the frequency.
    ///
    /// # Errors
    /// - [`TrieError::EmptyWord`] if `word` is empty.
    /// - [`TrieError::ControlByte`] if `word` contains a byte below
    ///   [`MIN_LABEL`](crate::MIN_LABEL). The trie is left untouched.
    /// - [`TrieError::Allocation`] if a node or the word copy cannot be
    ///   allocated. Nodes already added to the path stay in place.
    pub fn insert(&mut self, word: impl AsRef<[u8]>) -> Result<(), TrieError> {
        let word = word.as_ref();
        let (last, path) = validate(word).map_err(|e| {
            warn!(error = %e, "rejected word");
            e
        })?;

        let mut node = &mut self.root;
        for &byte in path {
            node = match &mut node.entry_mut(byte).child {
                Some(child) => child,
                vacant @ None => {
                    let child = Node::try_empty().map_err(|e| {
                        warn!(nodes = self.num_nodes, "node allocation failed");
                        e
                    })?;
                    self.num_nodes += 1;
                    trace!(byte, "allocated node");
                    vacant.insert(child)
                }
            };
        }

        let entry = node.entry_mut(last);
        if entry.word.is_none() {
            let copy = copy_word(word).map_err(|e| {
                warn!(len = word.len(), "word allocation failed");
                e
            })?;
            entry.word = Some(copy);
            self.num_words += 1;
        }
        entry.frequency = entry.frequency.saturating_add(1);
        trace!(frequency = entry.frequency, "inserted word");
        Ok(())
    }
}
