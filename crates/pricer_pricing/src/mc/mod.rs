//! Monte Carlo pricing for simple chooser options.
//!
//! # Architecture
//!
//! ```text
//! ChooserMcPricer
//! ├── MonteCarloConfig  (path count, seed, decision rule)
//! ├── PricerRng         (one per pricing call)
//! └── Orchestration
//!     ├── simulate_terminal()   S(0)  → S(t1)
//!     ├── evolve_terminal()     S(t1) → S(t2)
//!     ├── DecisionRule::apply() call/put choice and payoff
//!     └── discounting and aggregation
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::instruments::{ChooserParams, DecisionRule};
//! use pricer_pricing::mc::{ChooserMcPricer, MonteCarloConfig};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .rule(DecisionRule::Naive)
//!     .build()
//!     .unwrap();
//!
//! let pricer = ChooserMcPricer::new(config).unwrap();
//! let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
//!
//! let result = pricer.price(&params).unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.std_error);
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod pricer;

// Re-exports for convenient access
pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_PATHS};
pub use error::ConfigError;
pub use paths::{evolve_terminal, simulate_terminal, GbmStep, NormalSource};
pub use pricer::{price_chooser_mc, ChooserMcPricer, ChooserPricingResult, PathDiagnostics};
