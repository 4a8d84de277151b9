//! ISO 4217 currency metadata.
//!
//! The currency table is closed: codes outside it are rejected when parsed,
//! so raw strings never flow past the boundary. Each code carries its
//! minor-unit exponent, the number of fractional digits conventionally used
//! by that currency.

use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Swiss Franc
    Chf,
    /// Brazilian Real
    Brl,
    /// Indonesian Rupiah
    Idr,
    /// Singapore Dollar
    Sgd,
    /// Indian Rupee
    Inr,
    /// Japanese Yen
    Jpy,
    /// South Korean Won
    Krw,
    /// Vietnamese Dong
    Vnd,
    /// Iraqi Dinar
    Iqd,
    /// Kuwaiti Dinar
    Kwd,
    /// Bahraini Dinar
    Bhd,
    /// Chilean Unidad de Fomento
    Clf,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 15] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Chf,
        Self::Brl,
        Self::Idr,
        Self::Sgd,
        Self::Inr,
        Self::Jpy,
        Self::Krw,
        Self::Vnd,
        Self::Iqd,
        Self::Kwd,
        Self::Bhd,
        Self::Clf,
    ];

    /// Number of minor-unit (fractional) digits for this currency.
    ///
    /// USD and BRL use 2, JPY uses 0, IQD uses 3, CLF uses 4.
    #[must_use]
    pub const fn exponent(self) -> u32 {
        match self {
            Self::Jpy | Self::Krw | Self::Vnd => 0,
            Self::Usd
            | Self::Eur
            | Self::Gbp
            | Self::Chf
            | Self::Brl
            | Self::Idr
            | Self::Sgd
            | Self::Inr => 2,
            Self::Iqd | Self::Kwd | Self::Bhd => 3,
            Self::Clf => 4,
        }
    }

    /// Scale factor between major and minor units: `10^exponent`.
    #[must_use]
    pub const fn minor_unit_factor(self) -> i64 {
        10i64.pow(self.exponent())
    }

    /// The canonical alphabetic code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Chf => "CHF",
            Self::Brl => "BRL",
            Self::Idr => "IDR",
            Self::Sgd => "SGD",
            Self::Inr => "INR",
            Self::Jpy => "JPY",
            Self::Krw => "KRW",
            Self::Vnd => "VND",
            Self::Iqd => "IQD",
            Self::Kwd => "KWD",
            Self::Bhd => "BHD",
            Self::Clf => "CLF",
        }
    }

    /// Returns true if `code` names a supported currency, in any casing.
    #[must_use]
    pub fn exists(code: &str) -> bool {
        code.parse::<Self>().is_ok()
    }
}

impl Default for Currency {
    /// Amounts constructed without an explicit currency are USD.
    fn default() -> Self {
        Self::Usd
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "CHF" => Ok(Self::Chf),
            "BRL" => Ok(Self::Brl),
            "IDR" => Ok(Self::Idr),
            "SGD" => Ok(Self::Sgd),
            "INR" => Ok(Self::Inr),
            "JPY" => Ok(Self::Jpy),
            "KRW" => Ok(Self::Krw),
            "VND" => Ok(Self::Vnd),
            "IQD" => Ok(Self::Iqd),
            "KWD" => Ok(Self::Kwd),
            "BHD" => Ok(Self::Bhd),
            "CLF" => Ok(Self::Clf),
            _ => Err(CurrencyError::UnknownCode(s.trim().to_uppercase())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(Currency::Usd, 2)]
    #[case(Currency::Brl, 2)]
    #[case(Currency::Jpy, 0)]
    #[case(Currency::Krw, 0)]
    #[case(Currency::Iqd, 3)]
    #[case(Currency::Kwd, 3)]
    #[case(Currency::Clf, 4)]
    fn test_exponent(#[case] currency: Currency, #[case] expected: u32) {
        assert_eq!(currency.exponent(), expected);
    }

    #[rstest]
    #[case(Currency::Usd, 100)]
    #[case(Currency::Jpy, 1)]
    #[case(Currency::Iqd, 1000)]
    #[case(Currency::Clf, 10000)]
    fn test_minor_unit_factor(#[case] currency: Currency, #[case] expected: i64) {
        assert_eq!(currency.minor_unit_factor(), expected);
    }

    #[test]
    fn test_from_str_normalizes_case_and_whitespace() {
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str(" JPY ").unwrap(), Currency::Jpy);
        assert_eq!(Currency::from_str("Brl").unwrap(), Currency::Brl);
    }

    #[test]
    fn test_from_str_rejects_unknown_codes() {
        assert_eq!(
            Currency::from_str("AAA"),
            Err(CurrencyError::UnknownCode("AAA".to_string()))
        );
        assert!(Currency::from_str("").is_err());
        assert!(Currency::from_str("DOLLARS").is_err());
    }

    #[test]
    fn test_exists() {
        assert!(Currency::exists("USD"));
        assert!(Currency::exists("iqd"));
        assert!(!Currency::exists("AAA"));
    }

    #[test]
    fn test_display_round_trips_all() {
        for currency in Currency::ALL {
            let code = currency.to_string();
            assert_eq!(Currency::from_str(&code).unwrap(), currency);
        }
    }

    #[test]
    fn test_serde_uses_uppercase_code() {
        let json = serde_json::to_string(&Currency::Brl).unwrap();
        assert_eq!(json, "\"BRL\"");
        let parsed: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(parsed, Currency::Jpy);
    }

    #[test]
    fn test_default_is_usd() {
        assert_eq!(Currency::default(), Currency::Usd);
    }
}
