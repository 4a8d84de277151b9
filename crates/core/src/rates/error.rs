//! Exchange-rate error types.

use cambio_shared::CurrencyError;
use thiserror::Error;

/// Errors surfaced by the rate fetch pipeline and conversion.
///
/// Pipeline stages never wrap or replace an upstream error: the first
/// error encountered is the one the caller sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// Currency not recognized by the metadata table, or absent from the
    /// provider's rate table.
    #[error("unknown currency code: {0}")]
    UnknownCode(String),

    /// The provider endpoint does not exist (misconfigured base URL).
    #[error("rate provider endpoint not found")]
    NotFound,

    /// Timed out while establishing the connection.
    #[error("connect timeout contacting rate provider")]
    ConnectTimeout,

    /// Timed out while waiting for the response.
    #[error("timed out waiting for rate provider response")]
    ReceiveTimeout,

    /// Connection could not be established.
    #[error("connection to rate provider failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport-level failure, carried verbatim.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider returned a status outside the expected set.
    #[error("rate provider returned status {0}")]
    UnexpectedStatus(u16),

    /// Response body could not be decoded.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Business error reported by the provider, normalized to an
    /// underscore-delimited identifier (e.g. `invalid_key`).
    #[error("rate provider error: {0}")]
    Provider(String),

    /// Converted amount does not fit the minor-unit integer range.
    #[error("converted amount out of range")]
    AmountOutOfRange,

    /// Cache backend failure. The pipeline never propagates this kind:
    /// reads degrade to a miss and writes are dropped, both logged.
    #[error("rate cache error: {0}")]
    Store(String),
}

impl From<CurrencyError> for RateError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnknownCode(code) => Self::UnknownCode(code),
        }
    }
}
