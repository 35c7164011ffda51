use crate::discount::Discount;

/// Running totals for one order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OrderStat {
    /// `n[0]` is n_1 in equation 26 of Chen and Goodman: records seen exactly once.
    pub n: [u64; 4],
    /// Distinct records.
    pub count: u64,
}

impl OrderStat {
    fn add(&mut self, count: u64) {
        self.count += 1;
        if (1..=4).contains(&count) {
            self.n[count as usize - 1] += 1;
        }
    }
}

/// Count-of-counts bookkeeping across all orders of one run.
///
/// The last slot holds the maximum order and is what [`StatCollector::add_full`] feeds.
#[derive(Debug, Clone)]
pub(crate) struct StatCollector {
    orders: Vec<OrderStat>,
}

impl StatCollector {
    pub(crate) fn new(order: usize) -> Self {
        assert!(order > 0, "need at least unigrams");
        Self {
            orders: vec![OrderStat::default(); order],
        }
    }

    /// Records one finished entry of order `order_minus_1 + 1`.
    pub(crate) fn add(&mut self, order_minus_1: usize, count: u64) {
        self.orders[order_minus_1].add(count);
    }

    pub(crate) fn add_full(&mut self, count: u64) {
        if let Some(full) = self.orders.last_mut() {
            full.add(count);
        }
    }

    #[cfg(test)]
    pub(crate) fn order(&self, order_minus_1: usize) -> &OrderStat {
        &self.orders[order_minus_1]
    }

    /// Distinct-record totals and discount sets, one per order.
    ///
    /// Empty histogram buckets are not guarded: the division yields NaN or an
    /// infinity and that value is returned as is.
    pub(crate) fn complete(&self) -> (Vec<u64>, Vec<Discount>) {
        let counts = self.orders.iter().map(|s| s.count).collect();
        let discounts = self
            .orders
            .iter()
            .enumerate()
            .map(|(i, s)| {
                // See equation (26) in Chen and Goodman. The coefficients are
                // scaled by the order slot `i`, not by the count class.
                let n = s.n.map(|v| v as f32);
                let y = n[0] / (s.n[0] as f64 + 2.0 * s.n[1] as f64) as f32;
                let mut amount = [0.0f32; 4];
                for j in 1..4 {
                    amount[j] = i as f32 - (i + 1) as f32 * y * n[j] / n[j - 1];
                }
                Discount { amount }
            })
            .collect();
        (counts, discounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_buckets() {
        let mut stats = StatCollector::new(2);
        for count in [1, 1, 2, 3, 4, 5, 100] {
            stats.add(0, count);
        }
        let s = stats.order(0);
        assert_eq!(s.count, 7);
        assert_eq!(s.n, [2, 1, 1, 1]);
        assert_eq!(*stats.order(1), OrderStat::default());
    }

    #[test]
    fn test_zero_count_touches_no_bucket() {
        let mut stats = StatCollector::new(1);
        stats.add(0, 0);
        assert_eq!(stats.order(0).count, 1);
        assert_eq!(stats.order(0).n, [0; 4]);
    }

    #[test]
    fn test_add_full_is_last_order() {
        let mut stats = StatCollector::new(3);
        stats.add_full(2);
        stats.add(2, 1);
        assert_eq!(stats.order(2).count, 2);
        assert_eq!(stats.order(2).n, [1, 1, 0, 0]);
        assert_eq!(stats.order(0).count, 0);
    }

    #[test]
    fn test_complete_order_scaled_formula() {
        let mut stats = StatCollector::new(3);
        // Slot 2: n1 = 2, n2 = 1, n3 = 0.
        stats.add_full(1);
        stats.add_full(1);
        stats.add_full(2);
        // Slot 1: n1 = 4, n2 = 2, n3 = 1, n4 = 1.
        for count in [1, 1, 1, 1, 2, 2, 3, 4] {
            stats.add(1, count);
        }
        let (counts, discounts) = stats.complete();
        assert_eq!(counts, vec![0, 8, 3]);

        // y = 2 / (2 + 2) = 0.5; amount[1] = 2 - 3 * 0.5 * 1 / 2.
        // The textbook (count-class) form would give 1 - 2 * 0.5 * 1 / 2 = 0.5.
        assert_eq!(discounts[2].amount[0], 0.0);
        assert_eq!(discounts[2].amount[1], 1.25);
        assert_eq!(discounts[2].amount[2], 2.0);
        assert!(discounts[2].amount[3].is_nan());

        // y = 4 / 8 = 0.5; amount[j] = 1 - 2 * 0.5 * n[j] / n[j - 1].
        assert_eq!(discounts[1].amount, [0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_complete_empty_is_non_finite() {
        let stats = StatCollector::new(2);
        let (counts, discounts) = stats.complete();
        assert_eq!(counts, vec![0, 0]);
        for d in &discounts {
            assert_eq!(d.amount[0], 0.0);
            assert!(d.amount[1..].iter().all(|a| a.is_nan()));
        }
    }
}
