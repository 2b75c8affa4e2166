//! Daily market observations consumed by the backtest.
//!
//! One row per trading day, already cleaned and aligned by an upstream
//! preparation step. Column names double as the CSV header.

use chrono::NaiveDate;
use pricer_core::types::PricingError;

use crate::error::ValidationError;
use crate::regime::{regime_label_with_threshold, VolRegime};

/// Market state on one valuation date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_validation::observation::MarketObservation;
///
/// let obs = MarketObservation {
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     close_price: 182.5,
///     risk_free_rate: 0.042,
///     dividend_yield_proxy: 0.024,
///     volatility_estimate: 0.21,
///     vix_level: 13.4,
/// };
/// assert!(obs.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketObservation {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price of the underlying.
    pub close_price: f64,
    /// Continuously compounded risk-free rate, decimal.
    pub risk_free_rate: f64,
    /// Dividend yield proxy, decimal.
    pub dividend_yield_proxy: f64,
    /// Annualised volatility estimate, decimal.
    pub volatility_estimate: f64,
    /// VIX close, used for regime labelling.
    pub vix_level: f64,
}

impl MarketObservation {
    /// Checks that every field is usable for pricing.
    ///
    /// # Errors
    ///
    /// - `ValidationError::NonFiniteObservation` for NaN or infinite fields
    /// - `ValidationError::Pricing` for a non-positive close or negative volatility
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("close_price", self.close_price),
            ("risk_free_rate", self.risk_free_rate),
            ("dividend_yield_proxy", self.dividend_yield_proxy),
            ("volatility_estimate", self.volatility_estimate),
            ("vix_level", self.vix_level),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteObservation {
                    date: self.date,
                    field,
                });
            }
        }

        if self.close_price <= 0.0 {
            return Err(PricingError::invalid_input(format!(
                "Close price on {} must be positive, got {}",
                self.date, self.close_price
            ))
            .into());
        }
        if self.volatility_estimate < 0.0 {
            return Err(PricingError::invalid_input(format!(
                "Volatility estimate on {} must be non-negative, got {}",
                self.date, self.volatility_estimate
            ))
            .into());
        }
        Ok(())
    }

    /// Volatility regime of this date.
    #[inline]
    pub fn regime(&self, vix_threshold: f64) -> VolRegime {
        regime_label_with_threshold(self.vix_level, vix_threshold)
    }
}

/// Validates a whole observation table.
///
/// Dates must be strictly increasing and every row must pass
/// [`MarketObservation::validate`].
///
/// # Errors
///
/// The first failing row's error.
pub fn validate_observations(rows: &[MarketObservation]) -> Result<(), ValidationError> {
    for (row, obs) in rows.iter().enumerate() {
        obs.validate()?;
        if row > 0 {
            let previous = rows[row - 1].date;
            if obs.date <= previous {
                return Err(ValidationError::UnsortedDates {
                    row,
                    previous,
                    current: obs.date,
                });
            }
        }
    }
    Ok(())
}
