//! # Random Number Generation Infrastructure
//!
//! This module provides the random source for Monte Carlo chooser pricing.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Every generator carries the seed it was initialised with,
//!   including generators seeded from OS entropy
//! - **Efficiency**: Batch operations write into `&mut [f64]` slices
//! - **Ownership**: One generator per pricing call; nothing is shared between threads
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//!
//! // Standard normal variates (mean=0, std=1)
//! let z = rng.gen_normal();
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
