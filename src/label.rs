use crate::TrieError;

/// Number of distinct labels: every byte value has its own slot.
pub const ALPHABET_SIZE: usize = 256;

/// Bytes below this value (ASCII control characters) are rejected on insert.
pub const MIN_LABEL: u8 = 32;

/// Maps a byte to its entry slot within a node.
///
/// Insertion and lookup both go through here, so they always agree on
/// where a byte lives.
#[inline]
pub(crate) fn slot(byte: u8) -> usize {
    byte as usize
}

/// Returns true if `byte` may appear in an inserted word.
#[inline]
pub(crate) fn is_allowed(byte: u8) -> bool {
    byte >= MIN_LABEL
}

/// Checks a word before insertion and splits off its last byte.
/// Nothing is mutated until this passes.
pub(crate) fn validate(word: &[u8]) -> Result<(u8, &[u8]), TrieError> {
    let Some((&last, path)) = word.split_last() else {
        return Err(TrieError::EmptyWord);
    };
    match word.iter().position(|&b| !is_allowed(b)) {
        Some(offset) => Err(TrieError::ControlByte {
            offset,
            byte: word[offset],
        }),
        None => Ok((last, path)),
    }
}
