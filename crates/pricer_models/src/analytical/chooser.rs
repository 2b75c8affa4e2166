//! Rubinstein (1991) closed form for the simple chooser option.
//!
//! ## Formula
//!
//! V = S·e^(-qT₂)·N(d₁) - K·e^(-rT₂)·N(d₂) - S·e^(-qT₂)·N(-y₁) + K·e^(-rT₂)·N(-y₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T₂) / (σ√T₂), d₂ = d₁ - σ√T₂
//! - y₁ = (ln(S/K) + (r - q)T₂ + σ²T₁/2) / (σ√T₁), y₂ = y₁ - σ√T₁
//!
//! Equivalently, by put-call parity at the decision date, the chooser is a
//! call to `T₂` plus `e^(-qτ)` puts to `T₁` struck at `K·e^(-(r-q)τ)`. That
//! decomposition is exposed through [`rubinstein_decomposition`].
//!
//! The boundary assumed here is the parity threshold, so Monte Carlo prices
//! agree with this value only under
//! [`DecisionRule::Parity`](crate::instruments::DecisionRule::Parity).

use super::black_scholes::{bsm_call, bsm_put};
use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::ChooserParams;

/// The two European legs whose sum is the chooser value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooserDecomposition {
    /// Call struck at `K`, expiring at `T₂`.
    pub call_leg: f64,
    /// `e^(-qτ)` puts struck at `K·e^(-(r-q)τ)`, expiring at `T₁`.
    pub put_leg: f64,
}

impl ChooserDecomposition {
    /// Chooser value, `call_leg + put_leg`.
    #[inline]
    pub fn total(&self) -> f64 {
        self.call_leg + self.put_leg
    }
}

fn ensure_regular(params: &ChooserParams) -> Result<(), AnalyticalError> {
    if params.volatility() == 0.0 {
        return Err(AnalyticalError::Singular {
            parameter: "volatility",
        });
    }
    // t2 >= t1 is guaranteed by ChooserParams, so this also covers t2 = 0
    if params.t1() == 0.0 {
        return Err(AnalyticalError::Singular {
            parameter: "decision time",
        });
    }
    Ok(())
}

/// Prices a simple chooser with the Rubinstein closed form.
///
/// # Errors
/// `AnalyticalError::Singular` when volatility or the decision time is zero,
/// where `σ·√T₁` vanishes in the denominator of `y₁`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::rubinstein_chooser;
/// use pricer_models::instruments::ChooserParams;
///
/// // Haug, "Complete Guide to Option Pricing Formulas"
/// let params = ChooserParams::new(50.0, 50.0, 0.08, 0.0, 0.25, 0.25, 0.5).unwrap();
/// let price = rubinstein_chooser(&params).unwrap();
/// assert!((price - 6.1071).abs() < 1e-4);
/// ```
pub fn rubinstein_chooser(params: &ChooserParams) -> Result<f64, AnalyticalError> {
    ensure_regular(params)?;

    let s = params.spot();
    let k = params.strike();
    let r = params.rate();
    let q = params.dividend();
    let sigma = params.volatility();
    let t1 = params.t1();
    let t2 = params.t2();

    let log_moneyness = (s / k).ln();
    let variance = sigma * sigma;
    let sqrt_t1 = t1.sqrt();
    let sqrt_t2 = t2.sqrt();

    let d1 = (log_moneyness + (r - q + 0.5 * variance) * t2) / (sigma * sqrt_t2);
    let d2 = d1 - sigma * sqrt_t2;
    let y1 = (log_moneyness + (r - q) * t2 + 0.5 * variance * t1) / (sigma * sqrt_t1);
    let y2 = y1 - sigma * sqrt_t1;

    let growth = s * (-q * t2).exp();
    let discounted_strike = k * (-r * t2).exp();

    Ok(growth * norm_cdf(d1) - discounted_strike * norm_cdf(d2) - growth * norm_cdf(-y1)
        + discounted_strike * norm_cdf(-y2))
}

/// Splits the chooser into its call and adjusted-put legs.
///
/// # Errors
/// Same conditions as [`rubinstein_chooser`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::{rubinstein_chooser, rubinstein_decomposition};
/// use pricer_models::instruments::ChooserParams;
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.02, 0.2, 0.5, 1.0).unwrap();
/// let legs = rubinstein_decomposition(&params).unwrap();
/// let direct = rubinstein_chooser(&params).unwrap();
/// assert!((legs.total() - direct).abs() < 1e-10);
/// ```
pub fn rubinstein_decomposition(
    params: &ChooserParams,
) -> Result<ChooserDecomposition, AnalyticalError> {
    ensure_regular(params)?;

    let s = params.spot();
    let k = params.strike();
    let r = params.rate();
    let q = params.dividend();
    let sigma = params.volatility();
    let tau = params.tau();

    let call_leg = bsm_call(s, k, r, q, sigma, params.t2())?;
    let adjusted_strike = k * (-(r - q) * tau).exp();
    let put_leg = (-q * tau).exp() * bsm_put(s, adjusted_strike, r, q, sigma, params.t1())?;

    Ok(ChooserDecomposition { call_leg, put_leg })
}
