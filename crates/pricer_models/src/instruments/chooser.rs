//! Simple chooser option parameters.
//!
//! A simple chooser gives the holder the right, at the decision time `t1`,
//! to declare the contract a European call or a European put. Both legs
//! share the strike `K` and the maturity `t2`.

use super::error::InstrumentError;

/// Market and contract parameters for one chooser valuation.
///
/// Immutable once constructed. All fields are validated by [`ChooserParams::new`]:
/// - `spot > 0`, `strike > 0`
/// - `volatility >= 0`
/// - `t2 >= t1 >= 0`
/// - every value finite
///
/// Rates and dividend yields are continuously compounded and may be negative.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ChooserParams;
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.01, 0.2, 0.25, 1.0).unwrap();
/// assert_eq!(params.tau(), 0.75);
///
/// // Maturity before the decision date is rejected
/// assert!(ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooserParams {
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    t1: f64,
    t2: f64,
}

impl ChooserParams {
    /// Creates validated chooser parameters.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price (must be positive)
    /// * `strike` - Strike shared by both legs (must be positive)
    /// * `rate` - Continuously compounded risk-free rate
    /// * `dividend` - Continuous dividend yield
    /// * `volatility` - Annualised volatility (must be non-negative)
    /// * `t1` - Decision time in years
    /// * `t2` - Maturity in years, `t2 >= t1 >= 0`
    ///
    /// # Errors
    /// Returns the first violated constraint as an [`InstrumentError`].
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
        t1: f64,
        t2: f64,
    ) -> Result<Self, InstrumentError> {
        for (name, value) in [
            ("spot", spot),
            ("strike", strike),
            ("rate", rate),
            ("dividend", dividend),
            ("volatility", volatility),
            ("t1", t1),
            ("t2", t2),
        ] {
            if !value.is_finite() {
                return Err(InstrumentError::NonFinite { name, value });
            }
        }

        if spot <= 0.0 {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        if strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if volatility < 0.0 {
            return Err(InstrumentError::InvalidVolatility { volatility });
        }
        if t1 < 0.0 || t2 < t1 {
            return Err(InstrumentError::InvalidSchedule { t1, t2 });
        }

        Ok(Self {
            spot,
            strike,
            rate,
            dividend,
            volatility,
            t1,
            t2,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the decision time `t1`.
    #[inline]
    pub fn t1(&self) -> f64 {
        self.t1
    }

    /// Returns the maturity `t2`.
    #[inline]
    pub fn t2(&self) -> f64 {
        self.t2
    }

    /// Time between decision and maturity, `t2 - t1`.
    #[inline]
    pub fn tau(&self) -> f64 {
        self.t2 - self.t1
    }

    /// Discount factor to maturity, `exp(-r * t2)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.t2).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn valid() -> ChooserParams {
        ChooserParams::new(100.0, 95.0, 0.05, 0.02, 0.25, 0.5, 1.0).unwrap()
    }

    #[test]
    fn test_accessors() {
        let p = valid();
        assert_eq!(p.spot(), 100.0);
        assert_eq!(p.strike(), 95.0);
        assert_eq!(p.rate(), 0.05);
        assert_eq!(p.dividend(), 0.02);
        assert_eq!(p.volatility(), 0.25);
        assert_eq!(p.t1(), 0.5);
        assert_eq!(p.t2(), 1.0);
        assert_relative_eq!(p.tau(), 0.5);
        assert_relative_eq!(p.discount_factor(), (-0.05_f64).exp());
    }

    #[test]
    fn test_zero_volatility_and_zero_t1_allowed() {
        assert!(ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.0, 0.0, 1.0).is_ok());
        assert!(ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.5, 0.5).is_ok());
    }

    #[test]
    fn test_negative_rate_allowed() {
        assert!(ChooserParams::new(100.0, 100.0, -0.01, 0.0, 0.2, 0.5, 1.0).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        let err = ChooserParams::new(0.0, 100.0, 0.05, 0.0, 0.2, 0.5, 1.0).unwrap_err();
        assert_eq!(err, InstrumentError::InvalidSpot { spot: 0.0 });
    }

    #[test]
    fn test_rejects_non_positive_strike() {
        let err = ChooserParams::new(100.0, -5.0, 0.05, 0.0, 0.2, 0.5, 1.0).unwrap_err();
        assert_eq!(err, InstrumentError::InvalidStrike { strike: -5.0 });
    }

    #[test]
    fn test_rejects_negative_volatility() {
        let err = ChooserParams::new(100.0, 100.0, 0.05, 0.0, -0.2, 0.5, 1.0).unwrap_err();
        assert_eq!(err, InstrumentError::InvalidVolatility { volatility: -0.2 });
    }

    #[test]
    fn test_rejects_inverted_schedule() {
        let err = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, 0.5).unwrap_err();
        assert!(matches!(err, InstrumentError::InvalidSchedule { .. }));

        let err = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, -0.1, 0.5).unwrap_err();
        assert!(matches!(err, InstrumentError::InvalidSchedule { .. }));
    }

    #[test]
    fn test_rejects_nan() {
        let err = ChooserParams::new(100.0, 100.0, f64::NAN, 0.0, 0.2, 0.5, 1.0).unwrap_err();
        assert!(matches!(err, InstrumentError::NonFinite { name: "rate", .. }));
    }
}
