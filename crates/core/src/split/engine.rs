//! Splitting by ratio using floor division with positional remainder
//! distribution.
//!
//! Splitting works in minor-unit integer space:
//! 1. Collapse the amount to minor units
//! 2. Floor-divide each ratio's share of the total
//! 3. Hand the rounding remainder to the earliest shares, one minor unit
//!    each, in input order

use cambio_shared::Money;

use super::error::SplitError;

/// Splits an amount into `parts` equal shares.
///
/// Equivalent to [`split_weighted`] with a ratio list of `parts` ones.
///
/// # Errors
///
/// Returns [`SplitError::ZeroParts`] when `parts` is zero.
pub fn split_even(money: &Money, parts: usize) -> Result<Vec<Money>, SplitError> {
    if parts == 0 {
        return Err(SplitError::ZeroParts);
    }
    split_weighted(money, &vec![1; parts])
}

/// Splits an amount into one share per ratio, proportionally.
///
/// The sum of the output shares' minor-unit amounts always equals the
/// input's minor-unit amount exactly. Floor division leaves a remainder
/// `0 <= r < ratios.len()`; the first `r` shares each absorb one extra
/// minor unit. The policy is positional, not largest-remainder: order of
/// the ratio list is significant.
///
/// # Errors
///
/// Returns [`SplitError::EmptyRatios`] for an empty ratio list and
/// [`SplitError::NonPositiveRatio`] if any ratio is zero or negative.
pub fn split_weighted(money: &Money, ratios: &[i64]) -> Result<Vec<Money>, SplitError> {
    if ratios.is_empty() {
        return Err(SplitError::EmptyRatios);
    }
    for (index, &ratio) in ratios.iter().enumerate() {
        if ratio <= 0 {
            return Err(SplitError::NonPositiveRatio { index, ratio });
        }
    }

    let total = i128::from(money.to_minor_units());
    let total_ratio: i128 = ratios.iter().map(|&r| i128::from(r)).sum();

    // Floor keeps the running sum at or below the total, also for
    // negative amounts.
    let mut shares: Vec<i128> = ratios
        .iter()
        .map(|&ratio| (total * i128::from(ratio)).div_euclid(total_ratio))
        .collect();

    let floored: i128 = shares.iter().sum();
    let remainder = usize::try_from(total - floored).unwrap_or(0);

    for share in shares.iter_mut().take(remainder) {
        *share += 1;
    }

    Ok(shares
        .into_iter()
        .map(|minor| {
            Money::from_minor_units(i64::try_from(minor).unwrap_or(0), money.currency)
        })
        .collect())
}
