//! # kn-adjust - Kneser-Ney count adjustment
//!
//! The stage of a language-model build that turns raw counts of the highest
//! order into *adjusted counts* for every lower order, in one streaming pass.
//!
//! Input is the order-N n-grams with their corpus counts, sorted by suffix
//! (last word first). For each lower order the stage emits every suffix it
//! discovers with the number of distinct words seen in front of it, except
//! sentence-initial n-grams (starting with `<s>`), which keep their raw count.
//! Along the way it collects count-of-counts statistics and derives the
//! per-order discount amounts.
//!
//! Only O(order) records are held at a time; everything else moves through
//! block chains, one per order.
//!
//! ## Example
//!
//! ```
//! use kn_adjust::{AdjustConfig, AdjustCounts, ChainPosition, BOS};
//!
//! let config = AdjustConfig::default();
//! let (p1, unigrams) = ChainPosition::placeholders(1, &config.chain);
//! let (p2, bigrams) = ChainPosition::placeholders(2, &config.chain);
//! let (mut feeder, p3, trigrams) = ChainPosition::fed(3, &config.chain);
//!
//! // Suffix sorted: "the cat" after three distinct words.
//! feeder.push(&[BOS, 10, 11], 1).unwrap();
//! feeder.push(&[12, 10, 11], 1).unwrap();
//! feeder.push(&[13, 10, 11], 2).unwrap();
//! feeder.finish().unwrap();
//!
//! let stats = AdjustCounts::new(config).run(vec![p1, p2, p3]).unwrap();
//! assert_eq!(stats.counts, vec![1, 1, 3]);
//! assert_eq!(bigrams.into_records(), vec![(vec![10, 11], 3)]);
//! assert_eq!(unigrams.into_records(), vec![(vec![11], 1)]);
//! assert_eq!(trigrams.into_records().len(), 3);
//! ```
//!
//! ## Discounts
//!
//! Discount amounts follow equation (26) of Chen and Goodman with the order
//! slot as the scaling term. Empty histogram buckets give non-finite amounts;
//! [`BadDiscountAction`] decides whether those pass, fall back, or fail the run.

mod adjust;
mod block;
mod chain;
mod collapse;
mod config;
mod difference;
mod discount;
mod error;
mod ngram;
mod stats;
mod stream;

#[cfg(test)]
mod tests;

pub use adjust::{AdjustCounts, AdjustedStats};
pub use block::Block;
pub use chain::{ChainPosition, Drain, Feeder};
pub use collapse::CollapseStream;
pub use config::{AdjustConfig, BadDiscountAction, ChainConfig, DiscountConfig};
pub use difference::find_difference;
pub use discount::Discount;
pub use error::AdjustError;
pub use ngram::{suffix_cmp, NGram, WordIndex, BOS, EOS, UNK};
pub use stream::NGramStream;
