use crate::block::Block;
use crate::chain::{ChainPosition, Link};
use crate::error::AdjustError;
use crate::ngram::{NGram, WordIndex};

/// Reads every record in order, like [`NGramStream`](crate::NGramStream), but
/// deletes records with the sentence-start marker past position 0 from the
/// blocks it hands downstream.
///
/// A deleted record's slot is overwritten with the last surviving record of the
/// same block, scanning back from the end. That breaks the suffix order of the
/// forwarded block, which is fine because the next stage sorts again.
///
/// The cursor itself still yields the deleted records: the driver needs them
/// to emit sentence-initial lower-order n-grams. A block of `k` records with `m`
/// deletions therefore yields `k` records but is forwarded with `k - m`.
#[derive(Debug)]
pub struct CollapseStream {
    link: Link,
    bos: WordIndex,
    slot: usize,
    /// Records `[0, tail)` survive once the cursor leaves the block; `tail - 1`
    /// is the next record to move into a deleted slot.
    tail: usize,
    /// Valid length of the current block as it arrived.
    end: usize,
}

impl CollapseStream {
    pub fn new(position: ChainPosition, bos: WordIndex) -> Result<Self, AdjustError> {
        let mut stream = Self {
            link: Link::new(position),
            bos,
            slot: 0,
            tail: 0,
            end: 0,
        };
        stream.start_block()?;
        Ok(stream)
    }

    pub fn is_live(&self) -> bool {
        self.link.block().is_some()
    }

    pub fn current(&self) -> Option<NGram<'_>> {
        self.link.block().map(|block| block.get(self.slot))
    }

    pub fn advance(&mut self) -> Result<(), AdjustError> {
        let bos = self.bos;
        let (slot, tail) = (self.slot, self.tail);
        let Some(block) = self.link.block_mut() else {
            return Ok(());
        };
        if block.get(slot).has_interior(bos) && slot + 1 < tail {
            block.copy_record(tail - 1, slot);
            self.tail = retreat(block, bos, slot, tail - 1);
        }
        self.slot += 1;
        if self.slot == self.end {
            let tail = self.tail;
            if let Some(block) = self.link.block_mut() {
                if tail < self.end {
                    log::trace!(
                        "order {}: dropped {} of {} records with an interior <s>",
                        block.order(),
                        self.end - tail,
                        self.end
                    );
                }
                block.set_len(tail);
            }
            self.link.advance()?;
            self.start_block()?;
        }
        Ok(())
    }

    fn start_block(&mut self) -> Result<(), AdjustError> {
        while self.link.block().is_some_and(|b| b.is_empty()) {
            self.link.advance()?;
        }
        self.slot = 0;
        if let Some(block) = self.link.block() {
            self.end = block.len();
            self.tail = retreat(block, self.bos, 0, self.end);
        }
        Ok(())
    }
}

/// Moves `tail` back past records that are themselves deleted, stopping at the cursor.
fn retreat(block: &Block, bos: WordIndex, slot: usize, mut tail: usize) -> usize {
    while tail > slot && block.get(tail - 1).has_interior(bos) {
        tail -= 1;
    }
    tail
}
