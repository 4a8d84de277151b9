//! Property-based tests for splitting.

use cambio_shared::{Currency, Money};
use proptest::prelude::*;

use super::engine::{split_even, split_weighted};

/// Strategy to generate a money amount over the supported exponent range.
fn any_money() -> impl Strategy<Value = Money> {
    let currency = prop::sample::select(vec![
        Currency::Usd,
        Currency::Brl,
        Currency::Jpy,
        Currency::Iqd,
        Currency::Clf,
    ]);
    (-1_000_000_000i64..1_000_000_000i64, currency)
        .prop_map(|(minor, currency)| Money::from_minor_units(minor, currency))
}

/// Strategy to generate a positive ratio list (1 to 12 entries).
fn ratio_list() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..10_000, 1..12)
}

/// Strategy to generate a share count (1 to 100).
fn share_count() -> impl Strategy<Value = usize> {
    1usize..100
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* money value and ratio list, the minor-unit amounts of
    /// the shares sum exactly to the input's minor-unit amount.
    #[test]
    fn prop_weighted_sum_invariant(money in any_money(), ratios in ratio_list()) {
        let shares = split_weighted(&money, &ratios).unwrap();
        let sum: i64 = shares.iter().map(Money::to_minor_units).sum();
        prop_assert_eq!(sum, money.to_minor_units());
    }

    /// *For any* money value and count, the even split preserves the
    /// total exactly and produces exactly `count` shares.
    #[test]
    fn prop_even_sum_and_count(money in any_money(), count in share_count()) {
        let shares = split_even(&money, count).unwrap();
        prop_assert_eq!(shares.len(), count);
        let sum: i64 = shares.iter().map(Money::to_minor_units).sum();
        prop_assert_eq!(sum, money.to_minor_units());
    }

    /// *For any* money value and ratio list, exactly the first
    /// `remainder` shares carry one minor unit more than their floor
    /// share; later shares carry exactly the floor.
    #[test]
    fn prop_remainder_is_positional(money in any_money(), ratios in ratio_list()) {
        let shares = split_weighted(&money, &ratios).unwrap();

        let total = i128::from(money.to_minor_units());
        let total_ratio: i128 = ratios.iter().map(|&r| i128::from(r)).sum();
        let floors: Vec<i128> = ratios
            .iter()
            .map(|&r| (total * i128::from(r)).div_euclid(total_ratio))
            .collect();
        let remainder = total - floors.iter().sum::<i128>();
        prop_assert!(remainder >= 0);
        prop_assert!(remainder < i128::try_from(ratios.len()).unwrap());

        for (i, (share, floor)) in shares.iter().zip(&floors).enumerate() {
            let expected = if i128::try_from(i).unwrap() < remainder {
                floor + 1
            } else {
                *floor
            };
            prop_assert_eq!(i128::from(share.to_minor_units()), expected);
        }
    }

    /// *For any* share, decomposition respects the currency's fraction
    /// range: `0 <= fraction < 10^exponent`.
    #[test]
    fn prop_shares_have_in_range_fractions(money in any_money(), ratios in ratio_list()) {
        let shares = split_weighted(&money, &ratios).unwrap();
        for share in shares {
            prop_assert!(i64::from(share.fraction) < share.currency.minor_unit_factor());
        }
    }
}
