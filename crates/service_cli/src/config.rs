//! CLI configuration management.
//!
//! Settings are read from a TOML file (`chooser.toml` by default) and may be
//! overridden through `CHOOSER_*` environment variables. A missing file
//! falls back to the built-in defaults; a malformed one is an error.
//!
//! ```toml
//! log_level = "info"
//!
//! [pricing]
//! n_paths = 100000
//! seed = 42
//! rule = "parity"
//!
//! [backtest]
//! t1_days = 63
//! t2_days = 126
//! n_paths = 10000
//! rule = "naive"
//! ```

use pricer_models::instruments::DecisionRule;
use pricer_pricing::mc::MAX_PATHS;
use pricer_validation::backtest::BacktestConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults for the `price` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Monte Carlo paths per valuation.
    pub n_paths: usize,
    /// Seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Decision rule applied at `t1`.
    pub rule: DecisionRule,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            n_paths: 100_000,
            seed: Some(42),
            rule: DecisionRule::Parity,
        }
    }
}

/// Chooser CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `price` command defaults
    #[serde(default)]
    pub pricing: PricingSettings,

    /// `backtest` command defaults
    #[serde(default)]
    pub backtest: BacktestConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            pricing: PricingSettings::default(),
            backtest: BacktestConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(log_level) = std::env::var("CHOOSER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(n_paths) = std::env::var("CHOOSER_N_PATHS") {
            let n_paths = parse_env("CHOOSER_N_PATHS", &n_paths)?;
            self.pricing.n_paths = n_paths;
            self.backtest.n_paths = n_paths;
        }

        if let Ok(seed) = std::env::var("CHOOSER_SEED") {
            let seed = parse_env("CHOOSER_SEED", &seed)?;
            self.pricing.seed = Some(seed);
            self.backtest.seed = seed;
        }

        if let Ok(rule) = std::env::var("CHOOSER_RULE") {
            let rule: DecisionRule = rule.parse().map_err(ConfigError::Parse)?;
            self.pricing.rule = rule;
            self.backtest.rule = rule;
        }

        if let Ok(threshold) = std::env::var("CHOOSER_VIX_THRESHOLD") {
            self.backtest.vix_threshold = parse_env("CHOOSER_VIX_THRESHOLD", &threshold)?;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.pricing.n_paths == 0 || self.pricing.n_paths > MAX_PATHS {
            errors.push(format!(
                "pricing.n_paths must be in [1, {}], got {}",
                MAX_PATHS, self.pricing.n_paths
            ));
        }

        if let Err(err) = self.backtest.validate() {
            errors.push(format!("backtest: {}", err));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Parse(format!("{} has invalid value '{}'", name, value)))
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file or environment
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Environment variables are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_validates() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing.rule, DecisionRule::Parity);
        assert_eq!(config.backtest.rule, DecisionRule::Naive);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
log_level = "debug"

[pricing]
n_paths = 50000
seed = 7
rule = "naive"

[backtest]
t1_days = 21
t2_days = 42
vix_threshold = 25.0
"#,
        );

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.pricing.n_paths, 50_000);
        assert_eq!(config.pricing.seed, Some(7));
        assert_eq!(config.pricing.rule, DecisionRule::Naive);
        assert_eq!(config.backtest.t1_days, 21);
        assert_eq!(config.backtest.t2_days, 42);
        assert_eq!(config.backtest.vix_threshold, 25.0);
        // Unspecified backtest fields keep their defaults
        assert_eq!(config.backtest.n_paths, BacktestConfig::default().n_paths);
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_config("");
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("[pricing]\nn_paths = \"many\"\n");
        assert!(matches!(
            CliConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_rule_is_parse_error() {
        let file = write_config("[pricing]\nrule = \"optimal\"\n");
        assert!(matches!(
            CliConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();
        config.pricing.n_paths = 0;
        config.backtest.t1_days = 200;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("pricing.n_paths")));
                assert!(errors.iter().any(|e| e.starts_with("backtest")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_log_levels_case_insensitive() {
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            let mut config = CliConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "{} should be valid", level);
        }
    }

    #[test]
    fn test_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("CHOOSER_RULE", "naive");
        std::env::set_var("CHOOSER_SEED", "99");
        let config = CliConfig::default().with_env_override();
        std::env::remove_var("CHOOSER_RULE");
        std::env::remove_var("CHOOSER_SEED");

        let config = config.unwrap();
        assert_eq!(config.pricing.rule, DecisionRule::Naive);
        assert_eq!(config.pricing.seed, Some(99));
        assert_eq!(config.backtest.seed, 99);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("CHOOSER_N_PATHS", "lots");
        let result = CliConfig::default().with_env_override();
        std::env::remove_var("CHOOSER_N_PATHS");

        assert!(matches!(result, Err(ConfigError::Parse(msg)) if msg.contains("CHOOSER_N_PATHS")));
    }
}
