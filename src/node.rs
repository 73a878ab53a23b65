use std::fmt;

use crate::label::{slot, ALPHABET_SIZE};
use crate::TrieError;

/// One slot of a node, addressed by a byte value.
///
/// `frequency > 0` exactly when `word` is present: both are set together
/// by insertion and cleared together by teardown.
#[derive(Debug, Default)]
pub(crate) struct Entry {
    /// The inserted string whose last byte lands on this slot.
    pub(crate) word: Option<Box<[u8]>>,
    /// How many times `word` was inserted.
    pub(crate) frequency: u64,
    /// Node reached by consuming this slot's byte.
    pub(crate) child: Option<Node>,
}

impl Entry {
    /// Returns true if an inserted string terminates here.
    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.frequency > 0
    }

    /// Returns true if the slot holds neither a word nor a child.
    #[inline]
    pub(crate) fn is_vacant(&self) -> bool {
        self.word.is_none() && self.child.is_none()
    }
}

/// A fixed table of [`ALPHABET_SIZE`] entries, allocated as one block.
pub(crate) struct Node {
    entries: Box<[Entry]>,
}

/// What a teardown released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Teardown {
    /// Number of nodes freed, the root included.
    pub nodes: usize,
    /// Number of stored strings freed.
    pub words: usize,
}

impl Node {
    /// Allocates an empty node, reporting allocation failure instead of aborting.
    pub(crate) fn try_empty() -> Result<Self, TrieError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(ALPHABET_SIZE)?;
        entries.resize_with(ALPHABET_SIZE, Entry::default);
        Ok(Self {
            entries: entries.into_boxed_slice(),
        })
    }

    /// Allocates an empty node.
    pub(crate) fn empty() -> Self {
        Self {
            entries: (0..ALPHABET_SIZE).map(|_| Entry::default()).collect(),
        }
    }

    #[inline]
    pub(crate) fn entry(&self, byte: u8) -> &Entry {
        &self.entries[slot(byte)]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, byte: u8) -> &mut Entry {
        &mut self.entries[slot(byte)]
    }

    /// All entries in ascending byte order.
    #[inline]
    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Empties every entry of this node, moving child nodes onto `pending`.
    /// Returns the number of words released.
    fn detach(&mut self, pending: &mut Vec<Node>) -> usize {
        let mut words = 0;
        for entry in self.entries.iter_mut() {
            if entry.word.take().is_some() {
                words += 1;
            }
            entry.frequency = 0;
            if let Some(child) = entry.child.take() {
                pending.push(child);
            }
        }
        words
    }

    /// Frees this node and everything below it, counting what was released.
    pub(crate) fn release(mut self) -> Teardown {
        let mut pending = Vec::new();
        let mut report = Teardown {
            nodes: 1,
            words: self.detach(&mut pending),
        };
        while let Some(mut node) = pending.pop() {
            report.nodes += 1;
            report.words += node.detach(&mut pending);
        }
        report
    }
}

// Children are unlinked onto an explicit stack before being dropped, so
// teardown depth never depends on the length of the longest word.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach(&mut pending);
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied = self.entries.iter().filter(|e| !e.is_vacant()).count();
        f.debug_struct("Node").field("occupied", &occupied).finish()
    }
}

/// Makes the owned copy of `word` kept by a terminal entry.
pub(crate) fn copy_word(word: &[u8]) -> Result<Box<[u8]>, TrieError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(word.len())?;
    buf.extend_from_slice(word);
    Ok(buf.into_boxed_slice())
}
