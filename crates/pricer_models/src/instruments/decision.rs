//! Decision rules applied at the chooser's decision date.
//!
//! At `t1` the holder declares the contract a call or a put. Two strategies
//! are supported:
//!
//! | Rule | Chooses call iff |
//! |------|------------------|
//! | [`DecisionRule::Naive`] | `S(t1) > K` |
//! | [`DecisionRule::Parity`] | `S(t1) > K·exp(-(r - q)·τ)`, `τ = t2 - t1` |
//!
//! The parity threshold is the indifference point of put-call parity: above
//! it the call is worth more than the put for the remaining tenor. Only this
//! rule matches the boundary assumed by the Rubinstein closed form, so
//! Monte Carlo prices converge to the analytic price under `Parity` and not
//! under `Naive`.
//!
//! A path sitting exactly on the threshold is labelled a put.

use std::fmt;
use std::str::FromStr;

use super::chooser::ChooserParams;
use super::error::InstrumentError;

/// Strategy used to pick call or put at the decision date.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ChooserParams, DecisionRule};
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.5, 1.0).unwrap();
///
/// assert_eq!(DecisionRule::Naive.threshold(&params), 100.0);
/// // Parity threshold sits below the strike when r > q
/// assert!(DecisionRule::Parity.threshold(&params) < 100.0);
/// assert!(DecisionRule::Parity.is_consistent_with_closed_form());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecisionRule {
    /// Call iff the price at `t1` exceeds the strike.
    #[default]
    Naive,
    /// Call iff the price at `t1` exceeds the forward-discounted strike.
    Parity,
}

impl DecisionRule {
    /// Price level at `t1` above which the call is chosen.
    #[inline]
    pub fn threshold(self, params: &ChooserParams) -> f64 {
        match self {
            DecisionRule::Naive => params.strike(),
            DecisionRule::Parity => {
                params.strike() * (-(params.rate() - params.dividend()) * params.tau()).exp()
            }
        }
    }

    /// Returns `true` if a path at `s_t1` becomes a call. Ties go to the put.
    #[inline]
    pub fn chooses_call(self, s_t1: f64, params: &ChooserParams) -> bool {
        s_t1 > self.threshold(params)
    }

    /// Labels every path and computes its undiscounted payoff at `t2`.
    ///
    /// # Arguments
    /// * `s_t1` - Prices at the decision date
    /// * `s_t2` - Prices at maturity, aligned with `s_t1`
    /// * `params` - Contract terms supplying strike, rate, dividend and tenor
    ///
    /// # Returns
    /// `(choices, payoffs)` where `choices[i]` is `true` for a call.
    ///
    /// # Errors
    /// `InstrumentError::LengthMismatch` if the slices differ in length.
    pub fn apply(
        self,
        s_t1: &[f64],
        s_t2: &[f64],
        params: &ChooserParams,
    ) -> Result<(Vec<bool>, Vec<f64>), InstrumentError> {
        if s_t1.len() != s_t2.len() {
            return Err(InstrumentError::LengthMismatch {
                left: s_t1.len(),
                right: s_t2.len(),
            });
        }

        let threshold = self.threshold(params);
        let strike = params.strike();

        let choices: Vec<bool> = s_t1.iter().map(|&s| s > threshold).collect();
        let payoffs = choices
            .iter()
            .zip(s_t2)
            .map(|(&is_call, &s)| chooser_payoff(is_call, s, strike))
            .collect();

        Ok((choices, payoffs))
    }

    /// Whether Monte Carlo prices under this rule converge to the Rubinstein price.
    #[inline]
    pub fn is_consistent_with_closed_form(self) -> bool {
        matches!(self, DecisionRule::Parity)
    }

    /// Lower-case identifier used in configuration files and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionRule::Naive => "naive",
            DecisionRule::Parity => "parity",
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "naive" => Ok(DecisionRule::Naive),
            "parity" => Ok(DecisionRule::Parity),
            other => Err(format!(
                "Unknown decision rule '{}'. Supported: naive, parity",
                other
            )),
        }
    }
}

/// Payoff at maturity of a chooser leg.
///
/// `max(S - K, 0)` for a call, `max(K - S, 0)` for a put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::chooser_payoff;
///
/// assert_eq!(chooser_payoff(true, 120.0, 100.0), 20.0);
/// assert_eq!(chooser_payoff(false, 120.0, 100.0), 0.0);
/// ```
#[inline]
pub fn chooser_payoff(is_call: bool, s_t2: f64, strike: f64) -> f64 {
    if is_call {
        (s_t2 - strike).max(0.0)
    } else {
        (strike - s_t2).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ChooserParams {
        ChooserParams::new(100.0, 100.0, 0.05, 0.01, 0.2, 0.5, 1.0).unwrap()
    }

    // ==========================================================
    // Naive rule
    // ==========================================================

    #[test]
    fn test_naive_above_strike_is_call() {
        assert!(DecisionRule::Naive.chooses_call(110.0, &params()));
    }

    #[test]
    fn test_naive_below_strike_is_put() {
        assert!(!DecisionRule::Naive.chooses_call(90.0, &params()));
    }

    #[test]
    fn test_naive_tie_is_put() {
        assert!(!DecisionRule::Naive.chooses_call(100.0, &params()));
    }

    // ==========================================================
    // Parity rule
    // ==========================================================

    #[test]
    fn test_parity_threshold_value() {
        let p = params();
        let expected = 100.0 * (-(0.05 - 0.01) * 0.5_f64).exp();
        assert_relative_eq!(DecisionRule::Parity.threshold(&p), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_parity_differs_from_naive_between_thresholds() {
        // 99.0 lies between K·exp(-(r-q)τ) ≈ 98.02 and K = 100
        let p = params();
        assert!(DecisionRule::Parity.chooses_call(99.0, &p));
        assert!(!DecisionRule::Naive.chooses_call(99.0, &p));
    }

    #[test]
    fn test_parity_tie_is_put() {
        let p = params();
        let threshold = DecisionRule::Parity.threshold(&p);
        assert!(!DecisionRule::Parity.chooses_call(threshold, &p));
    }

    #[test]
    fn test_parity_equals_naive_when_rate_equals_dividend() {
        let p = ChooserParams::new(100.0, 100.0, 0.03, 0.03, 0.2, 0.5, 1.0).unwrap();
        assert_eq!(
            DecisionRule::Parity.threshold(&p),
            DecisionRule::Naive.threshold(&p)
        );
    }

    // ==========================================================
    // Batch application
    // ==========================================================

    #[test]
    fn test_apply_labels_and_payoffs() {
        let s_t1 = [110.0, 90.0, 100.0];
        let s_t2 = [120.0, 80.0, 95.0];
        let (choices, payoffs) = DecisionRule::Naive.apply(&s_t1, &s_t2, &params()).unwrap();

        assert_eq!(choices, vec![true, false, false]);
        assert_eq!(payoffs, vec![20.0, 20.0, 5.0]);
    }

    #[test]
    fn test_apply_hard_branch_no_blend() {
        // Chosen call that finishes out of the money pays nothing
        let (choices, payoffs) = DecisionRule::Naive
            .apply(&[110.0], &[90.0], &params())
            .unwrap();
        assert_eq!(choices, vec![true]);
        assert_eq!(payoffs, vec![0.0]);
    }

    #[test]
    fn test_apply_length_mismatch() {
        let result = DecisionRule::Parity.apply(&[1.0, 2.0], &[1.0], &params());
        assert_eq!(
            result.unwrap_err(),
            InstrumentError::LengthMismatch { left: 2, right: 1 }
        );
    }

    #[test]
    fn test_apply_empty() {
        let (choices, payoffs) = DecisionRule::Naive.apply(&[], &[], &params()).unwrap();
        assert!(choices.is_empty());
        assert!(payoffs.is_empty());
    }

    // ==========================================================
    // Parsing and display
    // ==========================================================

    #[test]
    fn test_from_str_round_trip() {
        for rule in [DecisionRule::Naive, DecisionRule::Parity] {
            assert_eq!(rule.to_string().parse::<DecisionRule>().unwrap(), rule);
        }
        assert_eq!(" Parity ".parse::<DecisionRule>().unwrap(), DecisionRule::Parity);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "smooth".parse::<DecisionRule>().unwrap_err();
        assert!(err.contains("smooth"));
    }

    #[test]
    fn test_closed_form_consistency_flag() {
        assert!(!DecisionRule::Naive.is_consistent_with_closed_form());
        assert!(DecisionRule::Parity.is_consistent_with_closed_form());
    }

    #[test]
    fn test_payoff_at_strike_is_zero() {
        assert_eq!(chooser_payoff(true, 100.0, 100.0), 0.0);
        assert_eq!(chooser_payoff(false, 100.0, 100.0), 0.0);
    }
}
