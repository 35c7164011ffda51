use crate::stats::StatCollector;
use proptest::prelude::*;

proptest! {
    /// Property 1: Histogram buckets never exceed the distinct count
    /// What the buckets miss is exactly the records counted 0 or 5+ times.
    #[test]
    fn prop_buckets_bounded(counts in prop::collection::vec(0u64..12, 0..64)) {
        let mut stats = StatCollector::new(2);
        for &count in &counts {
            stats.add(0, count);
        }
        let s = stats.order(0);
        let bucketed: u64 = s.n.iter().sum();
        prop_assert_eq!(s.count, counts.len() as u64);
        prop_assert!(bucketed <= s.count);
        let untracked = counts.iter().filter(|&&c| c == 0 || c >= 5).count() as u64;
        prop_assert_eq!(s.count - bucketed, untracked);
    }

    /// Property 2: Coefficients are finite when every bucket is populated
    #[test]
    fn prop_finite_with_full_histogram(order in 1usize..5, extra in prop::collection::vec(1u64..5, 0..32)) {
        let mut stats = StatCollector::new(order);
        for slot in 0..order {
            for count in [1, 2, 3, 4].iter().chain(&extra) {
                stats.add(slot, *count);
            }
        }
        let (counts, discounts) = stats.complete();
        prop_assert_eq!(counts.len(), order);
        for d in &discounts {
            prop_assert!(d.is_finite(), "{:?}", d.amount);
            prop_assert_eq!(d.amount[0], 0.0);
        }
    }
}
