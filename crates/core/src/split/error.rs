//! Split error types.

use thiserror::Error;

/// Splitting errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The requested number of parts was zero.
    #[error("cannot split into zero parts")]
    ZeroParts,

    /// The ratio list was empty.
    #[error("ratio list is empty")]
    EmptyRatios,

    /// A ratio was zero or negative.
    #[error("ratio at index {index} is not positive: {ratio}")]
    NonPositiveRatio {
        /// Position of the offending ratio.
        index: usize,
        /// The offending ratio value.
        ratio: i64,
    },
}
