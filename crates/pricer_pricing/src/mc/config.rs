//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for chooser
//! pricing simulations.

use pricer_models::instruments::DecisionRule;

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::DecisionRule;
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .rule(DecisionRule::Parity)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.rule(), DecisionRule::Parity);
/// assert!(!config.keep_paths());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Decision rule applied at `t1`.
    rule: DecisionRule,
    /// Whether per-path arrays are returned with the result.
    keep_paths: bool,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the decision rule.
    #[inline]
    pub fn rule(&self) -> DecisionRule {
        self.rule
    }

    /// Returns whether per-path diagnostics are retained.
    #[inline]
    pub fn keep_paths(&self) -> bool {
        self.keep_paths
    }

    /// Returns a copy of this configuration with a different seed.
    ///
    /// Used to derive one independent stream per valuation date.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPathCount` if `n_paths` is 0 or greater
    /// than 10,000,000.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .keep_paths(true)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    rule: DecisionRule,
    keep_paths: bool,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    ///
    /// # Arguments
    ///
    /// * `n_paths` - Number of paths in [1, 10_000_000]
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws one from OS entropy at pricing time.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the decision rule (default: [`DecisionRule::Naive`]).
    #[inline]
    pub fn rule(mut self, rule: DecisionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Retains per-path prices, choices and payoffs in the result.
    #[inline]
    pub fn keep_paths(mut self, keep_paths: bool) -> Self {
        self.keep_paths = keep_paths;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` is not set or out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            seed: self.seed,
            rule: self.rule,
            keep_paths: self.keep_paths,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = MonteCarloConfig::builder().n_paths(10_000).build().unwrap();

        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.seed(), None);
        assert_eq!(config.rule(), DecisionRule::Naive);
        assert!(!config.keep_paths());
    }

    #[test]
    fn test_config_builder_with_seed_and_rule() {
        let config = MonteCarloConfig::builder()
            .n_paths(1000)
            .seed(42)
            .rule(DecisionRule::Parity)
            .keep_paths(true)
            .build()
            .unwrap();

        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.rule(), DecisionRule::Parity);
        assert!(config.keep_paths());
    }

    #[test]
    fn test_maybe_seed_none_clears_seed() {
        let config = MonteCarloConfig::builder()
            .n_paths(10)
            .seed(1)
            .maybe_seed(None)
            .build()
            .unwrap();
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_with_seed_keeps_other_fields() {
        let base = MonteCarloConfig::builder()
            .n_paths(500)
            .rule(DecisionRule::Parity)
            .build()
            .unwrap();
        let derived = base.with_seed(77);

        assert_eq!(derived.seed(), Some(77));
        assert_eq!(derived.n_paths(), 500);
        assert_eq!(derived.rule(), DecisionRule::Parity);
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = MonteCarloConfig::builder().n_paths(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = MonteCarloConfig::builder().n_paths(MAX_PATHS + 1).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(_))));
    }

    #[test]
    fn test_config_max_paths_accepted() {
        assert!(MonteCarloConfig::builder().n_paths(MAX_PATHS).build().is_ok());
    }

    #[test]
    fn test_config_missing_paths() {
        let result = MonteCarloConfig::builder().seed(3).build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "n_paths",
                ..
            })
        ));
    }
}
