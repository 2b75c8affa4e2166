//! Analytical pricing formulas.
//!
//! This module provides closed-form solutions used to validate the
//! Monte Carlo engine:
//! - Black-Scholes-Merton vanilla prices with continuous dividend yield
//! - Rubinstein (1991) simple chooser price
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the BSM kernel and normal distribution
//! - **Degenerate inputs are explicit**: zero tenor returns intrinsic value,
//!   zero volatility in the chooser closed form is an error, never NaN

pub mod black_scholes;
pub mod chooser;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{bsm_call, bsm_put, BlackScholes};
pub use chooser::{rubinstein_chooser, rubinstein_decomposition, ChooserDecomposition};
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
