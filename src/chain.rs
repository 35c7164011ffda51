//! Block transport between pipeline stages.
//!
//! A chain carries blocks of one order from an upstream producer, through a
//! stage, to a downstream consumer. End of data is the closed-channel state:
//! once every sender of a channel is dropped, the receiver drains what is
//! queued and then reports the chain as poisoned.

use crate::block::Block;
use crate::config::ChainConfig;
use crate::error::AdjustError;
use crate::ngram::{NGram, WordIndex};
use crossbeam::channel::{self, Receiver, Sender};

fn queue<T>(config: &ChainConfig) -> (Sender<T>, Receiver<T>) {
    match config.queue_depth {
        Some(depth) => channel::bounded(depth),
        None => channel::unbounded(),
    }
}

/// Where a stage pulls its next block from.
#[derive(Debug)]
pub(crate) enum Upstream {
    /// Filled blocks from a producer. Disconnection is end of data.
    Channel(Receiver<Block>),
    /// Fresh placeholder blocks for a stage that writes through the chain.
    Placeholders { capacity: usize },
}

impl Upstream {
    fn pull(&mut self, order: usize) -> Option<Block> {
        match self {
            Upstream::Channel(rx) => rx.recv().ok(),
            Upstream::Placeholders { capacity } => Some(Block::placeholder(order, *capacity)),
        }
    }
}

/// A stage's attachment point on one order's chain.
#[derive(Debug)]
pub struct ChainPosition {
    order: usize,
    upstream: Upstream,
    downstream: Sender<Block>,
}

impl ChainPosition {
    /// A chain fed by a [`Feeder`] and drained by a [`Drain`].
    pub fn fed(order: usize, config: &ChainConfig) -> (Feeder, ChainPosition, Drain) {
        let (in_tx, in_rx) = queue(config);
        let (out_tx, out_rx) = queue(config);
        let feeder = Feeder {
            current: Block::empty(order, config.block_records()),
            tx: in_tx,
        };
        let position = ChainPosition {
            order,
            upstream: Upstream::Channel(in_rx),
            downstream: out_tx,
        };
        (feeder, position, Drain { order, rx: out_rx })
    }

    /// A chain the stage itself populates, starting from placeholder blocks.
    pub fn placeholders(order: usize, config: &ChainConfig) -> (ChainPosition, Drain) {
        let (out_tx, out_rx) = queue(config);
        let position = ChainPosition {
            order,
            upstream: Upstream::Placeholders {
                capacity: config.block_records(),
            },
            downstream: out_tx,
        };
        (position, Drain { order, rx: out_rx })
    }

    /// Order of the records this chain carries.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Record stride in bytes.
    pub fn entry_size(&self) -> usize {
        NGram::entry_size(self.order)
    }
}

/// Upstream end of a fed chain: batches records into blocks.
#[derive(Debug)]
pub struct Feeder {
    current: Block,
    tx: Sender<Block>,
}

impl Feeder {
    pub fn order(&self) -> usize {
        self.current.order()
    }

    /// Queues one record, shipping the current block once it fills.
    pub fn push(&mut self, words: &[WordIndex], count: u64) -> Result<(), AdjustError> {
        self.current.push(words, count);
        if self.current.is_full() {
            let next = Block::empty(self.current.order(), self.current.capacity());
            let full = std::mem::replace(&mut self.current, next);
            self.send(full)?;
        }
        Ok(())
    }

    /// Ships an already assembled block as is.
    pub fn push_block(&mut self, block: Block) -> Result<(), AdjustError> {
        assert_eq!(block.order(), self.order(), "block order does not match chain");
        self.send(block)
    }

    /// Flushes the partial block and poisons the chain.
    pub fn finish(mut self) -> Result<(), AdjustError> {
        if !self.current.is_empty() {
            let order = self.order();
            let last = std::mem::replace(&mut self.current, Block::empty(order, 0));
            self.send(last)?;
        }
        Ok(())
    }

    fn send(&self, block: Block) -> Result<(), AdjustError> {
        self.tx
            .send(block)
            .map_err(|_| AdjustError::Disconnected { order: self.order() })
    }
}

/// Downstream end of a chain.
#[derive(Debug)]
pub struct Drain {
    order: usize,
    rx: Receiver<Block>,
}

impl Drain {
    pub fn order(&self) -> usize {
        self.order
    }

    /// Blocks until the next block arrives; `None` once the chain is poisoned.
    pub fn recv_block(&self) -> Option<Block> {
        self.rx.recv().ok()
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.rx.iter()
    }

    /// Collects every valid record until the chain is poisoned.
    pub fn into_records(self) -> Vec<(Vec<WordIndex>, u64)> {
        let mut records = Vec::new();
        for block in self.rx.iter() {
            records.extend(block.iter().map(|g| (g.words().to_vec(), g.count())));
        }
        records
    }
}

/// Lease on the block a stage is currently working in.
///
/// Advancing publishes the leased block downstream and pulls the next one.
/// When upstream runs dry the downstream sender is dropped, so poison
/// propagates through a reading stage without further action.
#[derive(Debug)]
pub(crate) struct Link {
    order: usize,
    upstream: Upstream,
    downstream: Option<Sender<Block>>,
    current: Option<Block>,
}

impl Link {
    pub(crate) fn new(position: ChainPosition) -> Self {
        let mut link = Link {
            order: position.order,
            upstream: position.upstream,
            downstream: Some(position.downstream),
            current: None,
        };
        link.pull();
        link
    }

    pub(crate) fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn block(&self) -> Option<&Block> {
        self.current.as_ref()
    }

    pub(crate) fn block_mut(&mut self) -> Option<&mut Block> {
        self.current.as_mut()
    }

    pub(crate) fn advance(&mut self) -> Result<(), AdjustError> {
        if let Some(block) = self.current.take() {
            self.publish(block)?;
        }
        self.pull();
        Ok(())
    }

    /// Publishes the leased block, if any, and ends the chain.
    pub(crate) fn poison(mut self) -> Result<(), AdjustError> {
        if let Some(block) = self.current.take() {
            self.publish(block)?;
        }
        self.downstream = None;
        Ok(())
    }

    fn pull(&mut self) {
        self.current = self.upstream.pull(self.order);
        if self.current.is_none() {
            self.downstream = None;
        }
    }

    fn publish(&self, block: Block) -> Result<(), AdjustError> {
        match &self.downstream {
            Some(tx) => tx
                .send(block)
                .map_err(|_| AdjustError::Disconnected { order: self.order }),
            None => Ok(()),
        }
    }
}
