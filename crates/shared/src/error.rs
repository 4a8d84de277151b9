//! Shared error types.

use thiserror::Error;

/// Currency code errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The code does not name a currency in the supported table.
    #[error("unknown currency code: {0}")]
    UnknownCode(String),
}
