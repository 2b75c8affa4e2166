//! Realized-outcome backtest over a table of daily observations.
//!
//! For every date with enough forward history the backtest:
//! 1. Builds [`ChooserParams`] from the row (strike = close × moneyness,
//!    `t1 = t1_days / trading_days`, `t2 = t2_days / trading_days`)
//! 2. Prices the chooser by Monte Carlo and, when `σ > 0`, by the
//!    Rubinstein closed form
//! 3. Settles it on the closes `t1_days` and `t2_days` rows later
//! 4. Labels the date's volatility regime from the VIX
//!
//! Dates are valued in parallel with Rayon. Date `i` uses seed
//! `seed + i`, so results do not depend on scheduling.

use chrono::NaiveDate;
use pricer_core::types::PricingError;
use pricer_models::analytical::{rubinstein_chooser, AnalyticalError};
use pricer_models::instruments::{ChooserParams, DecisionRule};
use pricer_pricing::mc::{ChooserMcPricer, MonteCarloConfig, MAX_PATHS};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::metrics::{error_metrics, ErrorMetrics};
use crate::observation::{validate_observations, MarketObservation};
use crate::realized::realized_outcome;
use crate::regime::{summarize_by_regime, RegimeSummary, VolRegime, DEFAULT_VIX_THRESHOLD};

/// Backtest settings.
///
/// # Examples
///
/// ```
/// use pricer_validation::backtest::BacktestConfig;
///
/// let config = BacktestConfig::default();
/// assert_eq!(config.t1_days, 63);
/// assert_eq!(config.t2_days, 126);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BacktestConfig {
    /// Strike as a multiple of the close on the valuation date.
    pub moneyness: f64,
    /// Trading days from valuation to the decision date.
    pub t1_days: usize,
    /// Trading days from valuation to maturity.
    pub t2_days: usize,
    /// Trading days per year used to convert day counts to year fractions.
    pub trading_days: f64,
    /// Monte Carlo paths per valuation date.
    pub n_paths: usize,
    /// Base seed; date `i` uses `seed + i`.
    pub seed: u64,
    /// Decision rule for both simulation and settlement.
    pub rule: DecisionRule,
    /// VIX level above which a date is `high_vol`.
    pub vix_threshold: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            moneyness: 1.0,
            t1_days: 63,
            t2_days: 126,
            trading_days: 252.0,
            n_paths: 10_000,
            seed: 42,
            rule: DecisionRule::Naive,
            vix_threshold: DEFAULT_VIX_THRESHOLD,
        }
    }
}

impl BacktestConfig {
    /// Validates the configuration, reporting every problem at once.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidConfig` listing all violated constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if !(self.moneyness > 0.0 && self.moneyness.is_finite()) {
            errors.push(format!("moneyness must be positive, got {}", self.moneyness));
        }
        if self.t2_days == 0 {
            errors.push("t2_days must be at least 1".to_string());
        }
        if self.t1_days > self.t2_days {
            errors.push(format!(
                "t1_days ({}) must not exceed t2_days ({})",
                self.t1_days, self.t2_days
            ));
        }
        if !(self.trading_days > 0.0 && self.trading_days.is_finite()) {
            errors.push(format!(
                "trading_days must be positive, got {}",
                self.trading_days
            ));
        }
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            errors.push(format!(
                "n_paths must be in [1, {}], got {}",
                MAX_PATHS, self.n_paths
            ));
        }
        if !self.vix_threshold.is_finite() {
            errors.push("vix_threshold must be finite".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Decision time in years.
    #[inline]
    pub fn t1(&self) -> f64 {
        self.t1_days as f64 / self.trading_days
    }

    /// Maturity in years.
    #[inline]
    pub fn t2(&self) -> f64 {
        self.t2_days as f64 / self.trading_days
    }
}

/// Valuation of one date.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestRow {
    /// Valuation date.
    pub date: NaiveDate,
    /// Close on the valuation date.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Volatility used for pricing.
    pub volatility: f64,
    /// VIX on the valuation date.
    pub vix_level: f64,
    /// Regime of the valuation date.
    pub regime: VolRegime,
    /// Monte Carlo price.
    pub mc_price: f64,
    /// Monte Carlo standard error.
    pub mc_std_error: f64,
    /// Fraction of simulated paths choosing the call.
    pub call_ratio: f64,
    /// Rubinstein price, absent when the closed form is singular.
    pub analytic_price: Option<f64>,
    /// Discounted realized payoff.
    pub realized_pv: f64,
    /// Whether the realized path chose the call.
    pub realized_call: bool,
}

/// Backtest output: per-date rows plus aggregate error analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestReport {
    /// One row per valuation date, in date order.
    pub rows: Vec<BacktestRow>,
    /// Monte Carlo vs realized, all dates.
    pub mc_overall: ErrorMetrics,
    /// Rubinstein vs realized over dates with an analytic price.
    pub analytic_overall: Option<ErrorMetrics>,
    /// Monte Carlo vs realized by regime.
    pub mc_by_regime: Vec<RegimeSummary>,
    /// Rubinstein vs realized by regime.
    pub analytic_by_regime: Vec<RegimeSummary>,
}

fn value_date(
    observations: &[MarketObservation],
    index: usize,
    config: &BacktestConfig,
    mc_config: &MonteCarloConfig,
) -> Result<BacktestRow, ValidationError> {
    let obs = &observations[index];
    let params = ChooserParams::new(
        obs.close_price,
        obs.close_price * config.moneyness,
        obs.risk_free_rate,
        obs.dividend_yield_proxy,
        obs.volatility_estimate,
        config.t1(),
        config.t2(),
    )
    .map_err(PricingError::from)?;

    let seed = config.seed.wrapping_add(index as u64);
    let pricer = ChooserMcPricer::new(mc_config.with_seed(seed)).map_err(PricingError::from)?;
    let mc = pricer.price(&params)?;

    let analytic_price = match rubinstein_chooser(&params) {
        Ok(price) => Some(price),
        Err(AnalyticalError::Singular { parameter }) => {
            debug!(date = %obs.date, parameter, "closed form singular, skipping analytic price");
            None
        }
        Err(err) => return Err(PricingError::from(err).into()),
    };

    let realized = realized_outcome(
        observations[index + config.t1_days].close_price,
        observations[index + config.t2_days].close_price,
        &params,
        config.rule,
    )?;

    debug!(
        date = %obs.date,
        mc_price = mc.price,
        realized_pv = realized.present_value,
        "valued chooser"
    );

    Ok(BacktestRow {
        date: obs.date,
        spot: params.spot(),
        strike: params.strike(),
        volatility: params.volatility(),
        vix_level: obs.vix_level,
        regime: obs.regime(config.vix_threshold),
        mc_price: mc.price,
        mc_std_error: mc.std_error,
        call_ratio: mc.call_ratio,
        analytic_price,
        realized_pv: realized.present_value,
        realized_call: realized.is_call,
    })
}

/// Runs the backtest over a validated observation table.
///
/// # Errors
///
/// - `ValidationError::InvalidConfig` for an inconsistent configuration
/// - `ValidationError::UnsortedDates` / `NonFiniteObservation` for a bad table
/// - `ValidationError::InsufficientHistory` when no date reaches maturity
/// - `ValidationError::Pricing` if any date fails to price
pub fn run_backtest(
    observations: &[MarketObservation],
    config: &BacktestConfig,
) -> Result<BacktestReport, ValidationError> {
    config.validate()?;
    validate_observations(observations)?;

    if observations.len() <= config.t2_days {
        return Err(ValidationError::InsufficientHistory {
            rows: observations.len(),
            required: config.t2_days,
        });
    }
    let n_dates = observations.len() - config.t2_days;

    info!(
        dates = n_dates,
        n_paths = config.n_paths,
        rule = %config.rule,
        "starting chooser backtest"
    );

    let mc_config = MonteCarloConfig::builder()
        .n_paths(config.n_paths)
        .rule(config.rule)
        .build()
        .map_err(PricingError::from)?;

    let rows: Vec<BacktestRow> = (0..n_dates)
        .into_par_iter()
        .map(|index| value_date(observations, index, config, &mc_config))
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let realized: Vec<f64> = rows.iter().map(|r| r.realized_pv).collect();
    let mc: Vec<f64> = rows.iter().map(|r| r.mc_price).collect();
    let mc_overall = error_metrics(&realized, &mc)?;

    let with_analytic: Vec<(f64, f64, VolRegime)> = rows
        .iter()
        .filter_map(|r| r.analytic_price.map(|a| (r.realized_pv, a, r.regime)))
        .collect();
    let analytic_overall = if with_analytic.is_empty() {
        None
    } else {
        let (actual, predicted): (Vec<f64>, Vec<f64>) =
            with_analytic.iter().map(|&(t, p, _)| (t, p)).unzip();
        Some(error_metrics(&actual, &predicted)?)
    };

    let mc_by_regime = summarize_by_regime(&rows, |r| r.realized_pv, |r| r.mc_price, |r| r.regime)?;
    let analytic_by_regime = summarize_by_regime(&with_analytic, |r| r.0, |r| r.1, |r| r.2)?;

    info!(
        dates = rows.len(),
        mc_mae = mc_overall.mae,
        mc_rmse = mc_overall.rmse,
        analytic_dates = with_analytic.len(),
        "backtest complete"
    );

    Ok(BacktestReport {
        rows,
        mc_overall,
        analytic_overall,
        mc_by_regime,
        analytic_by_regime,
    })
}
