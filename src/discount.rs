use crate::config::{BadDiscountAction, DiscountConfig};
use crate::error::AdjustError;
use serde::{Deserialize, Serialize};

/// Per-order discount amounts for count classes 0, 1, 2 and 3-or-more.
///
/// `amount[0]` is always 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Discount {
    pub amount: [f32; 4],
}

impl Discount {
    /// Amount subtracted from an n-gram seen `count` times.
    pub fn get(&self, count: u64) -> f32 {
        self.amount[count.min(3) as usize]
    }

    /// Discounted count.
    pub fn apply(&self, count: u64) -> f32 {
        count as f32 - self.get(count)
    }

    pub fn is_finite(&self) -> bool {
        self.amount.iter().all(|a| a.is_finite())
    }

    /// First count class holding a non-finite amount.
    fn first_bad(&self) -> Option<(usize, f32)> {
        self.amount
            .iter()
            .copied()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
    }
}

/// Applies the configured policy to every discount set whose amounts are not
/// all finite. `discounts[i]` belongs to order `i + 1`.
pub(crate) fn check_discounts(
    discounts: &mut [Discount],
    config: &DiscountConfig,
) -> Result<(), AdjustError> {
    for (i, discount) in discounts.iter_mut().enumerate() {
        let Some((class, value)) = discount.first_bad() else {
            continue;
        };
        let order = i + 1;
        match config.on_bad {
            BadDiscountAction::Keep => {
                log::warn!(
                    "order {} discount for count class {} is {}; passing {:?} through",
                    order,
                    class,
                    value,
                    discount.amount
                );
            }
            BadDiscountAction::Fallback => {
                log::warn!(
                    "order {} discount for count class {} is {}; using fallback {:?}",
                    order,
                    class,
                    value,
                    config.fallback.amount
                );
                *discount = config.fallback;
            }
            BadDiscountAction::Reject => {
                return Err(AdjustError::BadDiscount { order, class, value });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nan_discount() -> Discount {
        Discount {
            amount: [0.0, 0.25, f32::NAN, f32::INFINITY],
        }
    }

    #[test]
    fn test_get_clamps_to_three() {
        let d = Discount {
            amount: [0.0, 0.5, 1.0, 1.5],
        };
        assert_eq!(d.get(0), 0.0);
        assert_eq!(d.get(1), 0.5);
        assert_eq!(d.get(2), 1.0);
        assert_eq!(d.get(3), 1.5);
        assert_eq!(d.get(250), 1.5);
    }

    #[test]
    fn test_apply() {
        let d = Discount {
            amount: [0.0, 0.5, 1.0, 1.5],
        };
        assert_eq!(d.apply(1), 0.5);
        assert_eq!(d.apply(10), 8.5);
    }

    #[test]
    fn test_finite() {
        assert!(Discount::default().is_finite());
        assert!(!nan_discount().is_finite());
        assert_eq!(nan_discount().first_bad().map(|(c, _)| c), Some(2));
    }

    #[test]
    fn test_keep_passes_through() {
        let mut discounts = vec![nan_discount()];
        check_discounts(&mut discounts, &DiscountConfig::default()).unwrap();
        assert!(discounts[0].amount[2].is_nan());
        assert_eq!(discounts[0].amount[3], f32::INFINITY);
    }

    #[test]
    fn test_fallback_substitutes() {
        let config = DiscountConfig {
            on_bad: BadDiscountAction::Fallback,
            ..DiscountConfig::default()
        };
        let good = Discount {
            amount: [0.0, 0.1, 0.2, 0.3],
        };
        let mut discounts = vec![good, nan_discount()];
        check_discounts(&mut discounts, &config).unwrap();
        assert_eq!(discounts[0], good);
        assert_eq!(discounts[1], config.fallback);
    }

    #[test]
    fn test_reject_reports_order_and_class() {
        let config = DiscountConfig {
            on_bad: BadDiscountAction::Reject,
            ..DiscountConfig::default()
        };
        let mut discounts = vec![Discount::default(), nan_discount()];
        match check_discounts(&mut discounts, &config) {
            Err(AdjustError::BadDiscount { order, class, value }) => {
                assert_eq!(order, 2);
                assert_eq!(class, 2);
                assert!(value.is_nan());
            }
            other => panic!("expected BadDiscount, got {:?}", other),
        }
    }
}
