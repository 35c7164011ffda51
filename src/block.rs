use crate::ngram::{NGram, WordIndex};

/// A fixed-stride buffer of same-order n-gram records.
///
/// Blocks are the unit handed across the transport boundary. The valid length
/// marks how many leading slots hold live records; it shrinks when records are
/// compacted away in place and never exceeds the capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    order: usize,
    /// `order` words per slot, slot-major.
    words: Vec<WordIndex>,
    counts: Vec<u64>,
    len: usize,
}

impl Block {
    /// A block whose every slot is valid and zeroed, ready to be overwritten
    /// by a stage that writes through the chain.
    pub fn placeholder(order: usize, capacity: usize) -> Self {
        assert!(order > 0, "records need at least one word");
        Self {
            order,
            words: vec![0; order * capacity],
            counts: vec![0; capacity],
            len: capacity,
        }
    }

    /// A block with room for `capacity` records and none valid.
    pub fn empty(order: usize, capacity: usize) -> Self {
        let mut block = Self::placeholder(order, capacity);
        block.len = 0;
        block
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn capacity(&self) -> usize {
        self.counts.len()
    }

    /// Number of valid records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Bytes currently holding live records.
    pub fn valid_size(&self) -> usize {
        self.len * NGram::entry_size(self.order)
    }

    /// Shrinks (or regrows, up to capacity) the valid region.
    pub fn set_len(&mut self, len: usize) {
        assert!(len <= self.capacity(), "valid length {} exceeds capacity {}", len, self.capacity());
        self.len = len;
    }

    /// Appends a record after the valid region. Returns false when full.
    pub fn push(&mut self, words: &[WordIndex], count: u64) -> bool {
        if self.is_full() {
            return false;
        }
        let slot = self.len;
        self.len += 1;
        self.write(slot, words, count);
        true
    }

    pub fn words(&self, slot: usize) -> &[WordIndex] {
        self.check(slot);
        &self.words[slot * self.order..(slot + 1) * self.order]
    }

    pub fn count(&self, slot: usize) -> u64 {
        self.check(slot);
        self.counts[slot]
    }

    pub fn get(&self, slot: usize) -> NGram<'_> {
        NGram::new(self.words(slot), self.count(slot))
    }

    /// Overwrites the record in `slot`.
    pub fn write(&mut self, slot: usize, words: &[WordIndex], count: u64) {
        self.check(slot);
        assert_eq!(words.len(), self.order, "record order does not match block");
        self.words[slot * self.order..(slot + 1) * self.order].copy_from_slice(words);
        self.counts[slot] = count;
    }

    /// Copies the whole record in `from` over the one in `to`.
    pub fn copy_record(&mut self, from: usize, to: usize) {
        self.check(from);
        self.check(to);
        let order = self.order;
        self.words.copy_within(from * order..(from + 1) * order, to * order);
        self.counts[to] = self.counts[from];
    }

    pub fn iter(&self) -> impl Iterator<Item = NGram<'_>> + '_ {
        (0..self.len).map(move |slot| self.get(slot))
    }

    fn check(&self, slot: usize) {
        assert!(slot < self.len, "slot {} outside valid region of {} records", slot, self.len);
    }
}
