use crate::ngram::WordIndex;

/// Index in `full` of the last word that differs from `lower`, comparing both
/// from their ends.
///
/// If `lower` matches entirely, this is the word of `full` just before the
/// shared suffix. The number of shared trailing words is
/// `full.len() - 1 - find_difference(full, lower)`.
///
/// `lower` must be strictly shorter than `full`.
pub fn find_difference(full: &[WordIndex], lower: &[WordIndex]) -> usize {
    debug_assert!(
        lower.len() < full.len(),
        "lower order record ({} words) must be shorter than the full one ({} words)",
        lower.len(),
        full.len()
    );
    let same = full
        .iter()
        .rev()
        .zip(lower.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    full.len() - 1 - same
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match() {
        assert_eq!(find_difference(&[1, 2, 3], &[4]), 2);
        assert_eq!(find_difference(&[1, 2, 3], &[2, 4]), 2);
    }

    #[test]
    fn test_partial_match() {
        // Shares "3", differs at 2 vs 5.
        assert_eq!(find_difference(&[1, 2, 3], &[5, 3]), 1);
    }

    #[test]
    fn test_full_match() {
        assert_eq!(find_difference(&[1, 2, 3], &[3]), 1);
        assert_eq!(find_difference(&[1, 2, 3], &[2, 3]), 0);
        assert_eq!(find_difference(&[9, 9, 9, 9], &[9, 9, 9]), 0);
    }

    #[test]
    fn test_mismatch_before_match_is_not_skipped() {
        // Only trailing agreement counts.
        assert_eq!(find_difference(&[7, 2, 3], &[2, 4]), 2);
    }
}
