//! Instrument error types.
//!
//! This module provides structured error handling for chooser contract
//! construction and decision-rule evaluation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidSpot`: Spot price is non-positive
/// - `InvalidStrike`: Strike price is non-positive
/// - `InvalidVolatility`: Volatility is negative
/// - `InvalidSchedule`: Dates violate `t2 >= t1 >= 0`
/// - `NonFinite`: A parameter is NaN or infinite
/// - `LengthMismatch`: Paired price arrays differ in length
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid volatility (negative).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Decision and maturity times out of order.
    #[error("Invalid schedule: require t2 >= t1 >= 0, got t1 = {t1}, t2 = {t2}")]
    InvalidSchedule {
        /// Decision time in years
        t1: f64,
        /// Maturity in years
        t2: f64,
    },

    /// Parameter is NaN or infinite.
    #[error("Non-finite parameter '{name}': {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Two arrays that must be aligned have different lengths.
    #[error("Length mismatch: {left} prices at T1 vs {right} prices at T2")]
    LengthMismatch {
        /// Length of the first array
        left: usize,
        /// Length of the second array
        right: usize,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
