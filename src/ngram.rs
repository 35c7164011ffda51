use std::cmp::Ordering;
use std::fmt;
use std::mem::size_of;

/// Vocabulary identifier of a word.
pub type WordIndex = u32;

/// Unknown word.
pub const UNK: WordIndex = 0;

/// Sentence-start marker `<s>`. Only meaningful as the first word of an n-gram.
pub const BOS: WordIndex = 1;

/// Sentence-end marker `</s>`.
pub const EOS: WordIndex = 2;

/// Borrowed view of one n-gram record: `order` words followed by a count.
///
/// Records of the same order share a fixed stride inside a [`Block`](crate::Block),
/// so a view is just a slice of words plus the count read out of the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NGram<'a> {
    words: &'a [WordIndex],
    count: u64,
}

impl<'a> NGram<'a> {
    pub fn new(words: &'a [WordIndex], count: u64) -> Self {
        debug_assert!(!words.is_empty(), "n-grams have at least one word");
        Self { words, count }
    }

    /// Bytes occupied by one record of the given order.
    pub const fn entry_size(order: usize) -> usize {
        order * size_of::<WordIndex>() + size_of::<u64>()
    }

    /// Inverse of [`NGram::entry_size`].
    pub const fn order_from_size(size: usize) -> usize {
        (size - size_of::<u64>()) / size_of::<WordIndex>()
    }

    pub fn words(&self) -> &'a [WordIndex] {
        self.words
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn order(&self) -> usize {
        self.words.len()
    }

    pub fn first(&self) -> WordIndex {
        self.words[0]
    }

    pub fn last(&self) -> WordIndex {
        self.words[self.words.len() - 1]
    }

    /// True when the sentence-start marker sits anywhere but position 0.
    ///
    /// Such records span a sentence boundary and carry no statistics of their own.
    /// Padded corpora only produce them with `<s>` filling positions `0..=k`; a
    /// marker after a real word is not expected, and such a record is still
    /// counted for the top order while being dropped from its chain.
    pub fn has_interior(&self, bos: WordIndex) -> bool {
        self.words[1..].contains(&bos)
    }
}

impl fmt::Display for NGram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", word)?;
        }
        write!(f, "\t{}", self.count)
    }
}

/// Suffix order: compares the last words first, then walks toward the front.
///
/// This is the order the upstream sort hands records to the adjustment stage,
/// so every n-gram sharing a suffix is contiguous.
pub fn suffix_cmp(a: &[WordIndex], b: &[WordIndex]) -> Ordering {
    a.iter().rev().cmp(b.iter().rev())
}
