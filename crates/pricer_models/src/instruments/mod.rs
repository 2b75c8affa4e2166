//! Chooser option contract definitions.
//!
//! # Instrument Types
//!
//! - [`ChooserParams`]: spot, strike, rate, dividend yield, volatility and the
//!   two dates of a simple chooser
//! - [`DecisionRule`]: how the holder picks call or put at the choosing date
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{ChooserParams, DecisionRule};
//!
//! let params = ChooserParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 0.25, 1.0).unwrap();
//!
//! // Naive rule compares against the raw strike
//! assert!(DecisionRule::Naive.chooses_call(101.0, &params));
//! assert!(!DecisionRule::Naive.chooses_call(100.0, &params));
//! ```

mod chooser;
mod decision;
mod error;

pub use chooser::ChooserParams;
pub use decision::{chooser_payoff, DecisionRule};
pub use error::InstrumentError;
