use std::fmt;
use std::io;

use crate::search::Preorder;
use crate::PrefixTrie;

/// Debug listing of every stored word, as returned by [`PrefixTrie::display`].
///
/// One line per word in lexicographic order: the word with non-printable
/// bytes escaped, a tab, then its frequency.
pub struct Dump<'a> {
    trie: &'a PrefixTrie,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in Preorder::below(&self.trie.root) {
            if let Some(word) = &entry.word {
                writeln!(f, "{}\t{}", word.escape_ascii(), entry.frequency)?;
            }
        }
        Ok(())
    }
}

impl PrefixTrie {
    /// Returns a [`Display`](fmt::Display) adapter listing every stored word.
    pub fn display(&self) -> Dump<'_> {
        Dump { trie: self }
    }

    /// Writes the [`display`](Self::display) listing to `out`.
    pub fn dump<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self.display())
    }
}
