//! Check command implementation
//!
//! Validates the effective configuration and confirms the pricing stack
//! works end to end on a reference contract.

use pricer_core::types::PricingError;
use pricer_models::analytical::rubinstein_chooser;
use pricer_models::instruments::{ChooserParams, DecisionRule};
use pricer_pricing::mc::price_chooser_mc;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// MC paths for the self-test
const SELF_TEST_PATHS: usize = 20_000;

/// Run the check command
pub fn run(config: &CliConfig, config_path: &str) -> Result<()> {
    info!("Checking configuration...");

    if std::path::Path::new(config_path).exists() {
        println!("Configuration file: {}", config_path);
    } else {
        println!("Configuration file: {} (not found, using defaults)", config_path);
    }
    println!("  log_level        = {}", config.log_level);
    println!("  pricing.n_paths  = {}", config.pricing.n_paths);
    match config.pricing.seed {
        Some(seed) => println!("  pricing.seed     = {}", seed),
        None => println!("  pricing.seed     = (entropy)"),
    }
    println!("  pricing.rule     = {}", config.pricing.rule);
    println!(
        "  backtest         = t1 {}d, t2 {}d, {} paths, rule {}, VIX > {}",
        config.backtest.t1_days,
        config.backtest.t2_days,
        config.backtest.n_paths,
        config.backtest.rule,
        config.backtest.vix_threshold
    );

    let (mc, analytic, std_error) = self_test()?;
    println!(
        "Self-test: MC {:.4} vs closed form {:.4} (SE {:.4})",
        mc, analytic, std_error
    );

    info!("Configuration OK");
    println!("OK");
    Ok(())
}

/// Prices a reference chooser both ways and requires agreement within 4 SE.
pub fn self_test() -> Result<(f64, f64, f64)> {
    let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0)
        .map_err(PricingError::from)?;
    let mc = price_chooser_mc(&params, SELF_TEST_PATHS, Some(42), DecisionRule::Parity)?;
    let analytic = rubinstein_chooser(&params).map_err(PricingError::from)?;

    if (mc.price - analytic).abs() > 4.0 * mc.std_error {
        return Err(CliError::Pricing(PricingError::ModelFailure(format!(
            "Self-test mismatch: MC {} vs closed form {} (SE {})",
            mc.price, analytic, mc.std_error
        ))));
    }
    Ok((mc.price, analytic, mc.std_error))
}
