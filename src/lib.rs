//! A byte-wise prefix trie that autocompletes to the most frequently
//! inserted string.
//!
//! [`PrefixTrie`] counts how many times each distinct byte string was
//! inserted. [`PrefixTrie::autocomplete`] walks a prefix and returns the
//! highest-frequency string below it. Ties go to the lexicographically
//! smallest string. Queries with no match return the prefix itself.
//!
//! # Quick start
//!
//! ```
//! use freq_trie::PrefixTrie;
//!
//! let mut pt = PrefixTrie::new();
//! for word in ["he", "hey", "hey", "hello", "hello", "helloworld"] {
//!     pt.insert(word).unwrap();
//! }
//! assert_eq!(pt.autocomplete("h"), b"hello");
//!
//! pt.insert("hey").unwrap();
//! pt.insert("hey").unwrap();
//! assert_eq!(pt.autocomplete("h"), b"hey");
//! assert_eq!(pt.autocomplete("xyz"), b"xyz");
//! ```

#![warn(missing_docs)]

mod dump;
mod insert;
mod label;
mod node;
mod search;

use std::collections::TryReserveError;

use tracing::debug;

pub use dump::Dump;
pub use label::{ALPHABET_SIZE, MIN_LABEL};
pub use node::Teardown;
pub use search::Completion;

use node::Node;

/// Broad classification of a [`TrieError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed input the trie does not accept.
    InvalidArgument,
    /// Memory for a node or a stored string could not be obtained.
    AllocationError,
}

/// Errors that can occur during trie operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    /// The word to insert was empty.
    #[error("cannot insert an empty word")]
    EmptyWord,
    /// The word contained a control byte (value below [`MIN_LABEL`]).
    #[error("control byte {byte:#04x} at offset {offset}")]
    ControlByte {
        /// Position of the offending byte in the word.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// Memory allocation failed.
    #[error("memory allocation failed")]
    Allocation,
}

impl TrieError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrieError::EmptyWord | TrieError::ControlByte { .. } => ErrorKind::InvalidArgument,
            TrieError::Allocation => ErrorKind::AllocationError,
        }
    }
}

impl From<TryReserveError> for TrieError {
    fn from(_: TryReserveError) -> Self {
        TrieError::Allocation
    }
}

/// A frequency-ranked prefix trie over bytes.
///
/// Every node is a table of [`ALPHABET_SIZE`] entries. Nodes are created
/// lazily by [`insert`](Self::insert) and never by lookups. Dropping the
/// trie releases every node and stored string.
#[derive(Debug)]
pub struct PrefixTrie {
    pub(crate) root: Node,
    pub(crate) num_nodes: usize,
    pub(crate) num_words: usize,
}

impl PrefixTrie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::with_root(Node::empty())
    }

    /// Creates an empty trie, returning [`TrieError::Allocation`] if the root
    /// node cannot be allocated.
    pub fn try_new() -> Result<Self, TrieError> {
        Ok(Self::with_root(Node::try_empty()?))
    }

    fn with_root(root: Node) -> Self {
        Self {
            root,
            num_nodes: 1,
            num_words: 0,
        }
    }

    /// Returns the number of distinct words stored.
    pub fn len(&self) -> usize {
        self.num_words
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    /// Returns the number of nodes in the trie, the root included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Tears the trie down and reports what was released.
    ///
    /// Dropping the trie does the same work; this form exists for callers
    /// that want the accounting.
    pub fn destroy(self) -> Teardown {
        let report = self.root.release();
        debug!(
            nodes = report.nodes,
            words = report.words,
            "prefix trie destroyed"
        );
        report
    }

    /// Destroys `trie` if there is one. `None` is a no-op.
    pub fn destroy_opt(trie: Option<Self>) -> Option<Teardown> {
        trie.map(Self::destroy)
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}
