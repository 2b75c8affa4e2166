//! Error types for backtesting and validation.

use chrono::NaiveDate;
use pricer_core::types::PricingError;
use thiserror::Error;

/// Validation-layer errors.
///
/// # Examples
/// ```
/// use pricer_validation::ValidationError;
///
/// let err = ValidationError::InsufficientHistory { rows: 10, required: 64 };
/// assert!(err.to_string().contains("64"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Pricing or metric computation failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The observation table is too short for the configured horizon.
    #[error("Insufficient history: {rows} observations, need more than {required}")]
    InsufficientHistory {
        /// Number of observations supplied
        rows: usize,
        /// Rows needed to reach maturity from the first date
        required: usize,
    },

    /// Observation dates are not strictly increasing.
    #[error("Observations out of order at row {row}: {current} follows {previous}")]
    UnsortedDates {
        /// Row index of the offending observation
        row: usize,
        /// Date of the preceding row
        previous: NaiveDate,
        /// Date of the offending row
        current: NaiveDate,
    },

    /// An observation field is NaN or infinite.
    #[error("Non-finite {field} on {date}")]
    NonFiniteObservation {
        /// Observation date
        date: NaiveDate,
        /// Offending column name
        field: &'static str,
    },

    /// Backtest configuration is inconsistent.
    #[error("Invalid backtest configuration: {0}")]
    InvalidConfig(String),
}
