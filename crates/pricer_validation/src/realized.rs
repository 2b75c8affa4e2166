//! Realized chooser outcomes from an observed price path.
//!
//! With no quoted chooser to compare against, the backtest uses the payoff
//! the contract would actually have delivered: the decision rule is applied
//! once to the observed price at `t1` and the chosen leg is settled at the
//! observed price at `t2`, then discounted by `exp(-r·t2)`.

use pricer_core::types::PricingError;
use pricer_models::instruments::{chooser_payoff, ChooserParams, DecisionRule};

/// Settlement of one chooser on observed prices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealizedOutcome {
    /// `true` if the call was chosen at `t1`.
    pub is_call: bool,
    /// Undiscounted payoff at `t2`.
    pub payoff: f64,
    /// Payoff discounted to the valuation date.
    pub present_value: f64,
}

fn ensure_observed(name: &str, price: f64) -> Result<(), PricingError> {
    if price > 0.0 && price.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_input(format!(
            "Observed {} must be positive and finite, got {}",
            name, price
        )))
    }
}

/// Settles a chooser on one observed pair of prices.
///
/// # Errors
///
/// `PricingError::InvalidInput` if either observed price is non-positive
/// or non-finite.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{ChooserParams, DecisionRule};
/// use pricer_validation::realized::realized_outcome;
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
/// let outcome = realized_outcome(110.0, 95.0, &params, DecisionRule::Naive).unwrap();
///
/// // Call chosen at t1, expired out of the money
/// assert!(outcome.is_call);
/// assert_eq!(outcome.payoff, 0.0);
/// ```
pub fn realized_outcome(
    s_t1_obs: f64,
    s_t2_obs: f64,
    params: &ChooserParams,
    rule: DecisionRule,
) -> Result<RealizedOutcome, PricingError> {
    ensure_observed("price at t1", s_t1_obs)?;
    ensure_observed("price at t2", s_t2_obs)?;

    let is_call = rule.chooses_call(s_t1_obs, params);
    let payoff = chooser_payoff(is_call, s_t2_obs, params.strike());

    Ok(RealizedOutcome {
        is_call,
        payoff,
        present_value: params.discount_factor() * payoff,
    })
}

/// Discounted realized chooser payoff.
///
/// # Errors
///
/// Same conditions as [`realized_outcome`].
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{ChooserParams, DecisionRule};
/// use pricer_validation::realized::realized_pv;
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
/// let pv = realized_pv(90.0, 80.0, &params, DecisionRule::Naive).unwrap();
/// assert!((pv - 20.0 * (-0.05_f64).exp()).abs() < 1e-12);
/// ```
pub fn realized_pv(
    s_t1_obs: f64,
    s_t2_obs: f64,
    params: &ChooserParams,
    rule: DecisionRule,
) -> Result<f64, PricingError> {
    realized_outcome(s_t1_obs, s_t2_obs, params, rule).map(|outcome| outcome.present_value)
}
