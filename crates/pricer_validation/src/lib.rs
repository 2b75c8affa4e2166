//! # Pricer Validation (L4: Application)
//!
//! Ex-post validation of chooser prices against realized market outcomes.
//!
//! This crate provides:
//! - Realized chooser payoffs from an observed price path ([`realized`])
//! - MAE / RMSE / MAPE between aligned series ([`metrics`])
//! - Volatility-regime labelling and per-regime error summaries ([`regime`])
//! - Daily market observations consumed by the backtest ([`observation`])
//! - A parallel backtest over an observation table ([`backtest`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         pricer_validation (L4)          │
//! ├─────────────────────────────────────────┤
//! │  observation/ - MarketObservation       │
//! │  realized/    - realized PV             │
//! │  metrics/     - MAE, RMSE, MAPE         │
//! │  regime/      - VIX regimes, summaries  │
//! │  backtest/    - Rayon fan-out per date  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Two-period Monte Carlo chooser engine  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_validation::metrics::error_metrics;
//! use pricer_validation::regime::{regime_label, VolRegime};
//!
//! let m = error_metrics(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(m.mae, 0.0);
//! assert_eq!(regime_label(35.0), VolRegime::HighVol);
//! ```

#![deny(missing_docs)]

pub mod backtest;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod realized;
pub mod regime;

pub use error::ValidationError;
