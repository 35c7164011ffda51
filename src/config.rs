use crate::discount::Discount;
use crate::ngram::{WordIndex, BOS};
use serde::{Deserialize, Serialize};

/// Settings for one adjustment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    /// Identifier of the sentence-start marker.
    pub bos: WordIndex,
    pub chain: ChainConfig,
    pub discount: DiscountConfig,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            bos: BOS,
            chain: ChainConfig::default(),
            discount: DiscountConfig::default(),
        }
    }
}

/// Shape of the blocks and queues built by [`ChainPosition`](crate::ChainPosition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Records per block.
    pub block_records: usize,
    /// Blocks that may be in flight between two stages. `None` never blocks the sender.
    pub queue_depth: Option<usize>,
}

impl ChainConfig {
    pub(crate) fn block_records(&self) -> usize {
        self.block_records.max(1)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            block_records: 1 << 12,
            queue_depth: None,
        }
    }
}

/// What to do with a discount set containing a non-finite amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadDiscountAction {
    /// Pass it through unchanged, logging a warning.
    #[default]
    Keep,
    /// Substitute [`DiscountConfig::fallback`], logging a warning.
    Fallback,
    /// Fail the run.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountConfig {
    pub fallback: Discount,
    pub on_bad: BadDiscountAction,
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            fallback: Discount {
                amount: [0.0, 0.5, 1.0, 1.5],
            },
            on_bad: BadDiscountAction::Keep,
        }
    }
}
