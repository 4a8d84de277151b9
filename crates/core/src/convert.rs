//! Currency conversion with single-rounding minor-unit arithmetic.
//!
//! CRITICAL: the rebased product is rounded to an integer exactly once,
//! after the full multiplication, using round-half-away-from-zero.
//! Rounding whole and fraction sub-products separately double-rounds and
//! is strictly less accurate; accumulated error here is at most one
//! minor unit per conversion.

use std::sync::Arc;

use cambio_shared::{Currency, Money};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::rates::{RateError, RateProvider, RateService, RateStore};

/// Converts amounts between currencies using externally-sourced rates.
pub struct ConversionService {
    rates: RateService,
}

impl ConversionService {
    /// Creates a service over an injected cache and provider.
    #[must_use]
    pub fn new(store: Arc<dyn RateStore>, provider: Arc<dyn RateProvider>) -> Self {
        Self {
            rates: RateService::new(store, provider),
        }
    }

    /// Converts `money` into the currency named by `to`.
    ///
    /// The target code is validated before any rate lookup; an unknown
    /// code never reaches the cache or the network. Any pipeline error
    /// returns immediately with no arithmetic performed.
    ///
    /// # Errors
    ///
    /// [`RateError`] kinds from the fetch pipeline pass through
    /// unchanged; [`RateError::AmountOutOfRange`] if the converted
    /// amount exceeds the minor-unit integer range.
    pub async fn convert(&self, money: &Money, to: &str) -> Result<Money, RateError> {
        let target = to.parse::<Currency>()?;
        let rate = self
            .rates
            .fetch_rate(money.currency.code(), target.code())
            .await?;
        convert_amount(money, rate, target)
    }
}

/// Applies `rate` to `money`, producing an amount in `to`.
///
/// Works in minor-unit space: `minor * rate / 10^(from_exp - to_exp)`,
/// rounded to an integer exactly once with round-half-away-from-zero,
/// then decomposed by the target currency's exponent. A zero-exponent
/// target always yields a zero fraction.
///
/// # Errors
///
/// Returns [`RateError::AmountOutOfRange`] when the rounded result does
/// not fit the minor-unit integer range.
pub fn convert_amount(money: &Money, rate: Decimal, to: Currency) -> Result<Money, RateError> {
    let minor = Decimal::from(money.to_minor_units());
    let rebased = rebase(minor * rate, money.currency.exponent(), to.exponent());
    let rounded = rebased.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let minor_out = rounded.to_i64().ok_or(RateError::AmountOutOfRange)?;
    Ok(Money::from_minor_units(minor_out, to))
}

/// Moves a minor-unit product between exponent scales.
fn rebase(product: Decimal, from_exponent: u32, to_exponent: u32) -> Decimal {
    if from_exponent >= to_exponent {
        product / pow10(from_exponent - to_exponent)
    } else {
        product * pow10(to_exponent - from_exponent)
    }
}

fn pow10(exponent: u32) -> Decimal {
    Decimal::from(10_i64.pow(exponent))
}
