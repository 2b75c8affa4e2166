//! Analytical comparison tests for Monte Carlo chooser pricing.
//!
//! These tests verify that Monte Carlo prices converge to the Rubinstein
//! closed form when the parity decision rule is used.
//!
//! # Test Categories
//!
//! 1. **Convergence**: MC vs Rubinstein within three standard errors
//! 2. **Rule sensitivity**: the naive rule leaves value on the table
//! 3. **Error scaling**: standard error shrinks like `1/√n`

use approx::assert_relative_eq;
use pricer_models::analytical::{bsm_call, bsm_put, rubinstein_chooser};
use pricer_models::instruments::{ChooserParams, DecisionRule};
use pricer_pricing::mc::{price_chooser_mc, ChooserMcPricer, MonteCarloConfig};

/// Standard test parameters for comparison tests.
fn standard_params() -> ChooserParams {
    // spot, strike, rate, div, vol, t1, t2
    ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap()
}

// ============================================================================
// Convergence to the closed form
// ============================================================================

#[test]
fn test_parity_rule_mc_vs_rubinstein() {
    let params = standard_params();
    let analytical_price = rubinstein_chooser(&params).unwrap();

    let result = price_chooser_mc(&params, 100_000, Some(42), DecisionRule::Parity).unwrap();

    let tolerance = 3.0 * result.std_error;
    assert!(
        (result.price - analytical_price).abs() < tolerance,
        "MC {} vs analytical {} (tolerance {})",
        result.price,
        analytical_price,
        tolerance
    );
}

#[test]
fn test_parity_rule_with_dividend_and_moneyness() {
    let cases = [
        ChooserParams::new(100.0, 100.0, 0.05, 0.02, 0.2, 0.5, 1.0).unwrap(),
        ChooserParams::new(50.0, 50.0, 0.08, 0.0, 0.25, 0.25, 0.5).unwrap(),
        ChooserParams::new(100.0, 110.0, 0.03, 0.01, 0.3, 0.1, 0.6).unwrap(),
    ];

    for (i, params) in cases.iter().enumerate() {
        let analytical_price = rubinstein_chooser(params).unwrap();
        let result =
            price_chooser_mc(params, 100_000, Some(1_000 + i as u64), DecisionRule::Parity)
                .unwrap();
        let tolerance = 3.0 * result.std_error;

        assert!(
            (result.price - analytical_price).abs() < tolerance,
            "case {}: MC {} vs analytical {} (tolerance {})",
            i,
            result.price,
            analytical_price,
            tolerance
        );
    }
}

#[test]
fn test_decision_at_maturity_prices_straddle() {
    // t1 = t2: parity threshold equals the strike, chooser pays |S - K|
    let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, 1.0).unwrap();
    let straddle = bsm_call(100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap()
        + bsm_put(100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap();

    let result = price_chooser_mc(&params, 100_000, Some(9), DecisionRule::Parity).unwrap();
    assert!((result.price - straddle).abs() < 3.0 * result.std_error);
}

// ============================================================================
// Decision rule sensitivity
// ============================================================================

#[test]
fn test_naive_rule_does_not_exceed_parity_rule() {
    // Same seed gives identical paths; only the choice boundary differs.
    // The parity boundary is optimal, so it can only add value on average.
    let params = standard_params();
    let naive = price_chooser_mc(&params, 100_000, Some(7), DecisionRule::Naive).unwrap();
    let parity = price_chooser_mc(&params, 100_000, Some(7), DecisionRule::Parity).unwrap();

    assert!(naive.price <= parity.price + 3.0 * parity.std_error);
    assert!(parity.call_ratio >= naive.call_ratio);
}

#[test]
fn test_rules_coincide_when_rate_equals_dividend() {
    let params = ChooserParams::new(100.0, 100.0, 0.03, 0.03, 0.2, 0.5, 1.0).unwrap();
    let naive = price_chooser_mc(&params, 20_000, Some(5), DecisionRule::Naive).unwrap();
    let parity = price_chooser_mc(&params, 20_000, Some(5), DecisionRule::Parity).unwrap();
    assert_eq!(naive, parity);
}

// ============================================================================
// Convergence and reproducibility
// ============================================================================

#[test]
fn test_standard_error_scales_with_inverse_sqrt_paths() {
    let params = standard_params();
    let small = price_chooser_mc(&params, 10_000, Some(3), DecisionRule::Parity).unwrap();
    let large = price_chooser_mc(&params, 160_000, Some(3), DecisionRule::Parity).unwrap();

    // 16x the paths should cut the error by roughly 4x
    let ratio = small.std_error / large.std_error;
    assert_relative_eq!(ratio, 4.0, max_relative = 0.1);
}

#[test]
fn test_seeded_pricer_is_bit_identical_across_instances() {
    let config = MonteCarloConfig::builder()
        .n_paths(25_000)
        .seed(314)
        .rule(DecisionRule::Parity)
        .keep_paths(true)
        .build()
        .unwrap();

    let a = ChooserMcPricer::new(config.clone())
        .unwrap()
        .price(&standard_params())
        .unwrap();
    let b = ChooserMcPricer::new(config)
        .unwrap()
        .price(&standard_params())
        .unwrap();

    assert_eq!(a.price.to_bits(), b.price.to_bits());
    assert_eq!(a.diagnostics, b.diagnostics);
}

#[test]
fn test_mc_chooser_dominates_vanillas() {
    let params = standard_params();
    let result = price_chooser_mc(&params, 100_000, Some(21), DecisionRule::Parity).unwrap();
    let call = bsm_call(100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
    let put = bsm_put(100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap();

    assert!(result.price + 3.0 * result.std_error > call.max(put));
}
