//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing values simple chooser options by simulation:
//! - Seeded, reproducible random number generation ([`rng::PricerRng`])
//! - Exact GBM terminal-price simulation over one period ([`mc::paths`])
//! - Two-period chooser pricing with a selectable decision rule ([`mc::pricer`])
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `PricingError`, moment aggregation
//! - Layer 2 (pricer_models): `ChooserParams`, `DecisionRule`, closed forms used in tests
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{ChooserParams, DecisionRule};
//! use pricer_pricing::mc::price_chooser_mc;
//!
//! let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
//! let result = price_chooser_mc(&params, 10_000, Some(42), DecisionRule::Parity).unwrap();
//!
//! assert!(result.price > 0.0);
//! assert!(result.std_error > 0.0);
//! ```
//!
//! ## Reproducibility
//!
//! A pricing call owns exactly one generator. The first-period normals are
//! drawn before the second-period normals from that same stream, so the same
//! seed and parameters always yield a bit-identical result.

#![deny(missing_docs)]

pub mod mc;
pub mod rng;
