//! Black-Scholes-Merton pricing for European options with dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Black-Scholes-Merton model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes-Merton model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `dividend` - Continuous dividend yield (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, dividend: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// Requires `expiry > 0`.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend + half * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    ///
    /// Requires `expiry > 0`.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price. Returns intrinsic value when `expiry <= 0`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(110.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// assert_eq!(bs.price_call(100.0, 0.0), 10.0);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (self.spot - strike).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let growth = (-self.dividend * expiry).exp();
        let discount = (-self.rate * expiry).exp();

        self.spot * growth * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// European put price. Returns intrinsic value when `expiry <= 0`.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (strike - self.spot).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let growth = (-self.dividend * expiry).exp();
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * growth * norm_cdf(-d1)
    }
}

/// Forward intrinsic value `S·e^(-qt) - K·e^(-rt)`, the zero-volatility limit.
#[inline]
fn discounted_forward_spread(s: f64, k: f64, r: f64, q: f64, t: f64) -> f64 {
    s * (-q * t).exp() - k * (-r * t).exp()
}

/// Checks the inputs shared by [`bsm_call`] and [`bsm_put`].
fn check_vanilla_inputs(
    s: f64,
    k: f64,
    r: f64,
    q: f64,
    sigma: f64,
    t: f64,
) -> Result<(), AnalyticalError> {
    let named = [
        ("spot", s),
        ("strike", k),
        ("rate", r),
        ("dividend", q),
        ("volatility", sigma),
        ("expiry", t),
    ];
    for &(parameter, value) in &named {
        if !value.is_finite() {
            return Err(AnalyticalError::NonFinite { parameter });
        }
    }
    if s <= 0.0 {
        return Err(AnalyticalError::InvalidSpot { spot: s });
    }
    if k <= 0.0 {
        return Err(AnalyticalError::InvalidStrike { strike: k });
    }
    if sigma < 0.0 {
        return Err(AnalyticalError::InvalidVolatility { volatility: sigma });
    }
    Ok(())
}

/// BSM European call price with continuous dividend yield.
///
/// Two degenerate inputs have well-defined limits:
/// - `t <= 0`: intrinsic value `max(s - k, 0)`
/// - `sigma == 0`, `t > 0`: deterministic limit `max(s·e^(-qt) - k·e^(-rt), 0)`
///
/// # Errors
/// - `AnalyticalError::NonFinite` if any input is NaN or infinite
/// - `AnalyticalError::InvalidSpot` if `s <= 0`
/// - `AnalyticalError::InvalidStrike` if `k <= 0`
/// - `AnalyticalError::InvalidVolatility` if `sigma < 0`
///
/// # Examples
/// ```
/// use pricer_models::analytical::bsm_call;
///
/// let price = bsm_call(100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// assert!((price - 10.450583572185565).abs() < 1e-10);
/// assert_eq!(bsm_call(120.0, 100.0, 0.05, 0.0, 0.2, 0.0), Ok(20.0));
/// assert!(bsm_call(100.0, 100.0, 0.05, 0.0, -0.2, 1.0).is_err());
/// ```
pub fn bsm_call(
    s: f64,
    k: f64,
    r: f64,
    q: f64,
    sigma: f64,
    t: f64,
) -> Result<f64, AnalyticalError> {
    check_vanilla_inputs(s, k, r, q, sigma, t)?;
    if t <= 0.0 {
        return Ok((s - k).max(0.0));
    }
    if sigma == 0.0 {
        return Ok(discounted_forward_spread(s, k, r, q, t).max(0.0));
    }
    let model = BlackScholes {
        spot: s,
        rate: r,
        dividend: q,
        volatility: sigma,
    };
    Ok(model.price_call(k, t))
}

/// BSM European put price with continuous dividend yield.
///
/// Same limits and errors as [`bsm_call`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::bsm_put;
///
/// let price = bsm_put(100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// assert!((price - 5.573526022256971).abs() < 1e-10);
/// ```
pub fn bsm_put(
    s: f64,
    k: f64,
    r: f64,
    q: f64,
    sigma: f64,
    t: f64,
) -> Result<f64, AnalyticalError> {
    check_vanilla_inputs(s, k, r, q, sigma, t)?;
    if t <= 0.0 {
        return Ok((k - s).max(0.0));
    }
    if sigma == 0.0 {
        return Ok((-discounted_forward_spread(s, k, r, q, t)).max(0.0));
    }
    let model = BlackScholes {
        spot: s,
        rate: r,
        dividend: q,
        volatility: sigma,
    };
    Ok(model.price_put(k, t))
}
