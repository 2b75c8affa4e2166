//! # pricer_core: Foundation for Chooser Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the pricing workspace, providing:
//! - Error types: `PricingError` (`types::error`)
//! - Streaming statistics: `RunningMoments` (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::statistics::RunningMoments;
//! use pricer_core::types::PricingError;
//!
//! let mut acc = RunningMoments::new();
//! for x in [1.0, 2.0, 3.0, 4.0] {
//!     acc.push(x);
//! }
//! assert_eq!(acc.mean(), 2.5);
//! assert!((acc.population_std() - 1.118_033_988_749_895).abs() < 1e-12);
//!
//! let err = PricingError::InvalidInput("Negative spot price".to_string());
//! assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `RunningMoments`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
