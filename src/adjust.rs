use crate::chain::ChainPosition;
use crate::collapse::CollapseStream;
use crate::config::AdjustConfig;
use crate::difference::find_difference;
use crate::discount::{check_discounts, Discount};
use crate::error::AdjustError;
use crate::ngram::WordIndex;
use crate::stats::StatCollector;
use crate::stream::NGramStream;
use serde::{Deserialize, Serialize};

/// Result of one adjustment run. Index `i` belongs to order `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedStats {
    /// Distinct records per order.
    pub counts: Vec<u64>,
    pub discounts: Vec<Discount>,
}

/// A lower-order record that is still collecting contexts.
#[derive(Debug, Clone)]
struct OpenRecord {
    words: Vec<WordIndex>,
    count: u64,
}

impl OpenRecord {
    fn new(order: usize) -> Self {
        Self {
            words: Vec::with_capacity(order),
            count: 0,
        }
    }

    fn reset(&mut self, words: &[WordIndex], count: u64) {
        self.words.clear();
        self.words.extend_from_slice(words);
        self.count = count;
    }
}

/// Open records for orders `1..N`, plus the write-through stream each one is
/// emitted into once closed.
///
/// Orders `1..=valid` are open at any time; they are the suffixes of the last
/// full record read.
struct LowerOrders {
    open: Vec<OpenRecord>,
    streams: Vec<NGramStream>,
    valid: usize,
}

impl LowerOrders {
    /// Closes the highest open order.
    fn emit_top(&mut self, stats: &mut StatCollector) -> Result<(), AdjustError> {
        self.valid -= 1;
        let record = &self.open[self.valid];
        stats.add(self.valid, record.count);
        self.streams[self.valid].write(&record.words, record.count)
    }

    fn open_next(&mut self, words: &[WordIndex], count: u64) {
        self.open[self.valid].reset(words, count);
        self.valid += 1;
    }

    fn top(&self) -> &[WordIndex] {
        &self.open[self.valid - 1].words
    }

    /// Emits every open record, lowest order first, then poisons every chain.
    fn finish(mut self, stats: &mut StatCollector) -> Result<(), AdjustError> {
        for (i, record) in self.open.iter().take(self.valid).enumerate() {
            stats.add(i, record.count);
            self.streams[i].write(&record.words, record.count)?;
        }
        for stream in self.streams {
            stream.poison()?;
        }
        Ok(())
    }
}

/// Converts raw counts of the highest order into Kneser-Ney adjusted counts
/// for every lower order, collecting count-of-counts statistics on the way.
#[derive(Debug, Clone, Default)]
pub struct AdjustCounts {
    config: AdjustConfig,
}

impl AdjustCounts {
    pub fn new(config: AdjustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdjustConfig {
        &self.config
    }

    /// Runs the stage to completion.
    ///
    /// `positions[i]` carries order `i + 1`. The last one is read (suffix
    /// sorted, raw counts) and forwarded with interior-marker records removed.
    /// The others are written with adjusted counts and poisoned once done.
    pub fn run(&self, positions: Vec<ChainPosition>) -> Result<AdjustedStats, AdjustError> {
        let order = positions.len();
        if order == 0 {
            return Err(AdjustError::NoPositions);
        }
        for (index, position) in positions.iter().enumerate() {
            if position.order() != index + 1 {
                return Err(AdjustError::OrderMismatch {
                    index,
                    expected: index + 1,
                    found: position.order(),
                });
            }
        }
        log::debug!("adjusting counts up to order {}", order);

        let mut stats = StatCollector::new(order);
        if order == 1 {
            self.unigrams(positions, &mut stats)?;
        } else {
            self.all_orders(positions, &mut stats)?;
        }

        let (counts, mut discounts) = stats.complete();
        check_discounts(&mut discounts, &self.config.discount)?;
        log::info!("adjusted counts per order: {:?}", counts);
        Ok(AdjustedStats { counts, discounts })
    }

    /// Only unigrams: nothing to adjust, just collect statistics.
    fn unigrams(
        &self,
        positions: Vec<ChainPosition>,
        stats: &mut StatCollector,
    ) -> Result<(), AdjustError> {
        for position in positions {
            let mut full = NGramStream::new(position)?;
            while let Some(gram) = full.current() {
                stats.add_full(gram.count());
                full.advance()?;
            }
        }
        Ok(())
    }

    fn all_orders(
        &self,
        mut positions: Vec<ChainPosition>,
        stats: &mut StatCollector,
    ) -> Result<(), AdjustError> {
        let bos = self.config.bos;
        let Some(top) = positions.pop() else {
            return Err(AdjustError::NoPositions);
        };
        let n = top.order();
        let streams = positions
            .into_iter()
            .map(NGramStream::new)
            .collect::<Result<Vec<_>, _>>()?;
        let mut lower = LowerOrders {
            open: (1..n).map(OpenRecord::new).collect(),
            streams,
            valid: 0,
        };

        let mut full = CollapseStream::new(top, bos)?;
        let Some(first) = full.current() else {
            // No n-grams at all.
            log::debug!("order {} input is empty", n);
            return lower.finish(stats);
        };

        // The unigram slot starts open with the first record's last word and
        // no contexts; the first comparison below counts one.
        lower.open_next(&[first.last()], 0);

        while let Some(gram) = full.current() {
            let words = gram.words();
            let different = find_difference(words, lower.top());
            let same = n - 1 - different;
            // One more distinct context for the longest shared suffix.
            if same > 0 {
                lower.open[same - 1].count += 1;
            }

            // Suffixes longer than the shared one are finished.
            while lower.valid > same {
                lower.emit_top(stats)?;
            }

            // Open the new suffixes, stopping at <s>.
            let mut start = different;
            while start > 0 && words[start] != bos {
                lower.open_next(&words[start..], 1);
                start -= 1;
            }
            if start != 0 {
                // <s> past the first word: the n-gram starting at <s> is
                // sentence-initial and keeps its raw count.
                lower.open_next(&words[start..], gram.count());
            } else {
                stats.add_full(gram.count());
            }
            debug_assert!(lower.valid > 0);

            full.advance()?;
        }

        lower.finish(stats)
    }
}
