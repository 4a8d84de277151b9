//! Exchange-rate snapshot and transport types.

use std::collections::HashMap;

use cambio_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time table of exchange rates for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Base currency the rates are quoted against.
    pub base: Currency,
    /// Epoch seconds of the provider's next scheduled update.
    pub next_update_unix: i64,
    /// Target currency code to rate. Keys stay raw provider codes: the
    /// provider may quote currencies outside the supported table.
    pub rates: HashMap<String, Decimal>,
}

impl RateSnapshot {
    /// Rate for `target`, if the provider quoted it.
    #[must_use]
    pub fn rate_for(&self, target: Currency) -> Option<Decimal> {
        self.rates.get(target.code()).copied()
    }
}

/// Raw response handed back by a rate provider transport.
///
/// Status classification belongs to the fetch pipeline, not the
/// transport.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}
