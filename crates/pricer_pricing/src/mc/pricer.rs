//! Monte Carlo pricing engine for simple chooser options.
//!
//! # Overview
//!
//! [`ChooserMcPricer::price`] coordinates:
//! 1. Random number generation: one [`PricerRng`] per call, drawing all
//!    first-period normals, then all second-period normals
//! 2. Period 1: `S(0) → S(t1)` via [`simulate_terminal`]
//! 3. Period 2: `S(t1) → S(t2)` via [`evolve_terminal`]
//! 4. Call/put choice and payoff via [`DecisionRule::apply`]
//! 5. Discounting by `exp(-r·t2)` and aggregation
//!
//! The standard error uses the population standard deviation of the
//! discounted payoffs, `std / √n`.

use pricer_core::math::RunningMoments;
use pricer_core::types::PricingError;
use pricer_models::instruments::{ChooserParams, DecisionRule};

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::paths::{evolve_terminal, simulate_terminal, GbmStep, NormalSource};
use crate::rng::PricerRng;

/// Per-path arrays retained when [`MonteCarloConfig::keep_paths`] is set.
///
/// All four vectors share the same length and path order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDiagnostics {
    /// Simulated prices at the decision date.
    pub s_t1: Vec<f64>,
    /// Simulated prices at maturity.
    pub s_t2: Vec<f64>,
    /// `true` where the call was chosen.
    pub choices: Vec<bool>,
    /// Undiscounted payoffs at maturity.
    pub payoffs: Vec<f64>,
}

/// Monte Carlo chooser valuation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::ChooserPricingResult;
///
/// let result = ChooserPricingResult {
///     price: 12.4,
///     std_error: 0.05,
///     ..Default::default()
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooserPricingResult {
    /// Present value, the mean of discounted payoffs.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Mean undiscounted payoff.
    pub mean_payoff: f64,
    /// Population standard deviation of undiscounted payoffs.
    pub std_payoff: f64,
    /// Fraction of paths on which the call was chosen.
    pub call_ratio: f64,
    /// `exp(-r·t2)`.
    pub discount_factor: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Seed of the generator used, so unseeded runs can be replayed.
    pub seed: u64,
    /// Per-path arrays, present only when requested.
    pub diagnostics: Option<PathDiagnostics>,
}

impl ChooserPricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Two-period Monte Carlo pricer for simple chooser options.
///
/// The pricer holds only its configuration; every call to
/// [`price`](ChooserMcPricer::price) builds a fresh generator, so a pricer
/// can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::rubinstein_chooser;
/// use pricer_models::instruments::{ChooserParams, DecisionRule};
/// use pricer_pricing::mc::{ChooserMcPricer, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .seed(42)
///     .rule(DecisionRule::Parity)
///     .build()
///     .unwrap();
/// let pricer = ChooserMcPricer::new(config).unwrap();
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
/// let result = pricer.price(&params).unwrap();
/// let analytic = rubinstein_chooser(&params).unwrap();
///
/// assert!((result.price - analytic).abs() < 4.0 * result.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct ChooserMcPricer {
    config: MonteCarloConfig,
}

impl ChooserMcPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices a simple chooser.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` if simulation inputs are rejected.
    /// `ChooserParams` is already validated, so this only fails on
    /// internal inconsistencies.
    pub fn price(&self, params: &ChooserParams) -> Result<ChooserPricingResult, PricingError> {
        let n_paths = self.config.n_paths();
        let mut rng = match self.config.seed() {
            Some(seed) => PricerRng::from_seed(seed),
            None => PricerRng::from_entropy(),
        };

        // Draw order is part of the reproducibility contract: all z1, then all z2
        let z1 = rng.normals(n_paths);
        let z2 = rng.normals(n_paths);

        let first = GbmStep::new(
            params.rate(),
            params.dividend(),
            params.volatility(),
            params.t1(),
        );
        let second = GbmStep::new(
            params.rate(),
            params.dividend(),
            params.volatility(),
            params.tau(),
        );

        let s_t1 =
            simulate_terminal(params.spot(), first, n_paths, NormalSource::Precomputed(&z1))?;
        let s_t2 = evolve_terminal(&s_t1, &second, &z2)?;

        let (choices, payoffs) = self.config.rule().apply(&s_t1, &s_t2, params)?;

        let discount_factor = params.discount_factor();
        let mut undiscounted = RunningMoments::new();
        let mut discounted = RunningMoments::new();
        for &payoff in &payoffs {
            undiscounted.push(payoff);
            discounted.push(discount_factor * payoff);
        }

        let n_calls = choices.iter().filter(|&&is_call| is_call).count();

        let diagnostics = self.config.keep_paths().then(|| PathDiagnostics {
            s_t1,
            s_t2,
            choices,
            payoffs,
        });

        Ok(ChooserPricingResult {
            price: discounted.mean(),
            std_error: discounted.population_std() / (discounted.count() as f64).sqrt(),
            mean_payoff: undiscounted.mean(),
            std_payoff: undiscounted.population_std(),
            call_ratio: n_calls as f64 / n_paths as f64,
            discount_factor,
            n_paths,
            seed: rng.seed(),
            diagnostics,
        })
    }
}

/// Prices a simple chooser without building a pricer explicitly.
///
/// # Arguments
///
/// * `params` - Validated contract and market parameters
/// * `n_paths` - Number of paths in [1, 10_000_000]
/// * `seed` - Fixed seed, or `None` for OS entropy
/// * `rule` - Decision rule applied at `t1`
///
/// # Errors
///
/// `PricingError::InvalidInput` for an out-of-range path count.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{ChooserParams, DecisionRule};
/// use pricer_pricing::mc::price_chooser_mc;
///
/// let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
/// assert!(price_chooser_mc(&params, 0, Some(1), DecisionRule::Naive).is_err());
/// ```
pub fn price_chooser_mc(
    params: &ChooserParams,
    n_paths: usize,
    seed: Option<u64>,
    rule: DecisionRule,
) -> Result<ChooserPricingResult, PricingError> {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .maybe_seed(seed)
        .rule(rule)
        .build()?;
    ChooserMcPricer::new(config)?.price(params)
}
