//! Proportional splitting with exact-total guarantees.
//!
//! This module divides a monetary amount into shares whose minor-unit
//! amounts sum exactly to the original (no minor units lost or gained).

pub mod engine;
pub mod error;

#[cfg(test)]
mod props;

pub use engine::{split_even, split_weighted};
pub use error::SplitError;
