//! Error types for analytical pricing operations.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility passed to the BSM kernel
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidStrike`: Non-positive strike
/// - `NonFinite`: NaN or infinite input
/// - `Singular`: Closed form undefined because a parameter is zero
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::Singular { parameter: "volatility" };
/// assert!(format!("{}", err).contains("zero volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// An input is NaN or infinite.
    #[error("Non-finite {parameter}")]
    NonFinite {
        /// Name of the offending input
        parameter: &'static str,
    },

    /// Closed form divides by `σ·sqrt(t)` with that product equal to zero.
    #[error("Closed form undefined at zero {parameter}")]
    Singular {
        /// Name of the zero-valued parameter
        parameter: &'static str,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidVolatility { .. }
            | AnalyticalError::InvalidSpot { .. }
            | AnalyticalError::InvalidStrike { .. }
            | AnalyticalError::NonFinite { .. } => PricingError::InvalidInput(err.to_string()),
            AnalyticalError::Singular { .. } => PricingError::NumericalInstability(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_singular_display() {
        let err = AnalyticalError::Singular { parameter: "decision time" };
        assert_eq!(format!("{}", err), "Closed form undefined at zero decision time");
    }

    #[test]
    fn test_invalid_spot_to_pricing_error() {
        let pricing_err: PricingError = AnalyticalError::InvalidSpot { spot: -50.0 }.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("spot")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_strike_and_non_finite_to_invalid_input() {
        let strike: PricingError = AnalyticalError::InvalidStrike { strike: 0.0 }.into();
        assert!(matches!(strike, PricingError::InvalidInput(msg) if msg.contains("strike")));

        let nan: PricingError = AnalyticalError::NonFinite { parameter: "rate" }.into();
        assert!(matches!(nan, PricingError::InvalidInput(msg) if msg == "Non-finite rate"));
    }

    #[test]
    fn test_singular_to_numerical_instability() {
        let pricing_err: PricingError = AnalyticalError::Singular {
            parameter: "volatility",
        }
        .into();
        match pricing_err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("volatility")),
            _ => panic!("Expected NumericalInstability variant"),
        }
    }
}
