//! Numerical helpers shared across layers.
//!
//! - `statistics`: streaming moment accumulator used for Monte Carlo
//!   standard errors.

pub mod statistics;

pub use statistics::RunningMoments;
