use crate::chain::{ChainPosition, Link};
use crate::error::AdjustError;
use crate::ngram::{NGram, WordIndex};

/// Forward cursor over the records of one chain.
///
/// Reading: [`NGramStream::current`] is the record under the cursor and
/// [`NGramStream::advance`] steps past it, handing finished blocks downstream.
///
/// Writing (placeholder chains): [`NGramStream::write`] fills the slot under the
/// cursor and steps past it; [`NGramStream::poison`] trims the last block to
/// what was written and ends the chain.
#[derive(Debug)]
pub struct NGramStream {
    link: Link,
    slot: usize,
}

impl NGramStream {
    pub fn new(position: ChainPosition) -> Result<Self, AdjustError> {
        let mut stream = Self {
            link: Link::new(position),
            slot: 0,
        };
        stream.skip_empty()?;
        Ok(stream)
    }

    pub fn order(&self) -> usize {
        self.link.order()
    }

    /// False once the chain is exhausted.
    pub fn is_live(&self) -> bool {
        self.link.block().is_some()
    }

    pub fn current(&self) -> Option<NGram<'_>> {
        self.link.block().map(|block| block.get(self.slot))
    }

    pub fn advance(&mut self) -> Result<(), AdjustError> {
        let Some(block) = self.link.block() else {
            return Ok(());
        };
        self.slot += 1;
        if self.slot == block.len() {
            self.link.advance()?;
            self.slot = 0;
            self.skip_empty()?;
        }
        Ok(())
    }

    /// Overwrites the record under the cursor, then advances.
    pub fn write(&mut self, words: &[WordIndex], count: u64) -> Result<(), AdjustError> {
        let order = self.order();
        let slot = self.slot;
        let block = self
            .link
            .block_mut()
            .ok_or(AdjustError::Exhausted { order })?;
        block.write(slot, words, count);
        self.advance()
    }

    /// Marks everything before the cursor as the final records and ends the chain.
    pub fn poison(mut self) -> Result<(), AdjustError> {
        let slot = self.slot;
        if let Some(block) = self.link.block_mut() {
            block.set_len(slot);
        }
        self.link.poison()
    }

    fn skip_empty(&mut self) -> Result<(), AdjustError> {
        while self.link.block().is_some_and(|b| b.is_empty()) {
            self.link.advance()?;
        }
        Ok(())
    }
}
