//! Fixed-point money type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are whole units plus a minor-unit fraction, combined into a
//! single minor-unit integer for arithmetic so values round at most once.

use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// A monetary amount in a specific currency.
///
/// `units` is the signed whole-unit part and `fraction` the minor-unit
/// part. By convention `fraction < 10^exponent(currency)` (and 0 when the
/// exponent is 0), but the constructor does not enforce this: callers may
/// build out-of-range fractions and they fold into the total through
/// [`Money::to_minor_units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Whole (major) units; may be negative.
    pub units: i64,
    /// Minor-unit fraction, always non-negative.
    pub fraction: u32,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Creates a new Money value. No validation is performed on the
    /// fraction range.
    #[must_use]
    pub const fn new(units: i64, fraction: u32, currency: Currency) -> Self {
        Self {
            units,
            fraction,
            currency,
        }
    }

    /// Creates an amount in the default currency (USD).
    #[must_use]
    pub fn with_default_currency(units: i64, fraction: u32) -> Self {
        Self::new(units, fraction, Currency::default())
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            units: 0,
            fraction: 0,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.to_minor_units() == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.to_minor_units() < 0
    }

    /// Collapses the value to a single minor-unit integer:
    /// `units * 10^exponent + fraction`.
    ///
    /// This is the canonical space for arithmetic; it eliminates repeated
    /// decimal rounding.
    #[must_use]
    pub fn to_minor_units(&self) -> i64 {
        self.units * self.currency.minor_unit_factor() + i64::from(self.fraction)
    }

    /// Rebuilds a Money value from a minor-unit integer.
    ///
    /// Floor-division semantics keep the fraction non-negative even for
    /// negative amounts: `-50` minor units of USD becomes `(-1, 50)`.
    /// When the currency exponent is 0 the fraction is always 0.
    #[must_use]
    pub fn from_minor_units(minor: i64, currency: Currency) -> Self {
        let factor = currency.minor_unit_factor();
        let units = minor.div_euclid(factor);
        let fraction = u32::try_from(minor.rem_euclid(factor)).unwrap_or(0);
        Self {
            units,
            fraction,
            currency,
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let factor = self.currency.minor_unit_factor();
        let minor = self.to_minor_units();
        let sign = if minor < 0 { "-" } else { "" };
        let magnitude = minor.unsigned_abs();
        let whole = magnitude / factor.unsigned_abs();
        let frac = magnitude % factor.unsigned_abs();
        let exponent = self.currency.exponent() as usize;
        if exponent == 0 {
            write!(f, "{sign}{whole} {}", self.currency)
        } else {
            write!(f, "{sign}{whole}.{frac:0exponent$} {}", self.currency)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_new() {
        let money = Money::new(10, 45, Currency::Usd);
        assert_eq!(money.units, 10);
        assert_eq!(money.fraction, 45);
        assert_eq!(money.currency, Currency::Usd);
    }

    #[test]
    fn test_with_default_currency() {
        let money = Money::with_default_currency(3, 99);
        assert_eq!(money.currency, Currency::Usd);
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::Jpy);
        assert!(money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(Money::new(10, 45, Currency::Usd).to_minor_units(), 1045);
        assert_eq!(Money::new(1234, 0, Currency::Jpy).to_minor_units(), 1234);
        assert_eq!(Money::new(1, 250, Currency::Iqd).to_minor_units(), 1250);
    }

    #[test]
    fn test_to_minor_units_folds_out_of_range_fraction() {
        // The fraction-range invariant is not enforced; 100 whole plus
        // 100 hundredths collapses to 10100 cents.
        assert_eq!(Money::new(100, 100, Currency::Usd).to_minor_units(), 10100);
    }

    #[test]
    fn test_from_minor_units() {
        let money = Money::from_minor_units(5554, Currency::Brl);
        assert_eq!((money.units, money.fraction), (55, 54));

        let money = Money::from_minor_units(135, Currency::Jpy);
        assert_eq!((money.units, money.fraction), (135, 0));
    }

    #[test]
    fn test_from_minor_units_negative_uses_floor_semantics() {
        let money = Money::from_minor_units(-50, Currency::Usd);
        assert_eq!((money.units, money.fraction), (-1, 50));
        assert_eq!(money.to_minor_units(), -50);
        assert!(money.is_negative());

        let money = Money::from_minor_units(-1250, Currency::Iqd);
        assert_eq!((money.units, money.fraction), (-2, 750));
        assert_eq!(money.to_minor_units(), -1250);
    }

    #[test]
    fn test_round_trip_reconstructs_exactly() {
        for minor in [-10_001, -1, 0, 1, 99, 100, 5554, 1_000_000] {
            for currency in [Currency::Usd, Currency::Jpy, Currency::Iqd, Currency::Clf] {
                let money = Money::from_minor_units(minor, currency);
                assert_eq!(money.to_minor_units(), minor, "{minor} {currency}");
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(10, 45, Currency::Usd).to_string(), "10.45 USD");
        assert_eq!(Money::new(1234, 0, Currency::Jpy).to_string(), "1234 JPY");
        assert_eq!(Money::new(1, 5, Currency::Iqd).to_string(), "1.005 IQD");
        assert_eq!(
            Money::from_minor_units(-50, Currency::Usd).to_string(),
            "-0.50 USD"
        );
    }
}
