//! # Pricer Models (L2: Business Logic)
//!
//! Chooser option terms, exercise decision rules and closed-form prices.
//!
//! This crate provides:
//! - Contract parameters for a simple chooser option ([`instruments::ChooserParams`])
//! - Decision rules applied at the choosing date ([`instruments::DecisionRule`])
//! - Black-Scholes-Merton vanilla prices with continuous dividend yield
//! - The Rubinstein (1991) closed form for the simple chooser
//!
//! ## Design Principles
//!
//! - **Enum-based strategies** for static dispatch of decision rules
//! - **Validated construction**: parameters are checked once, never clamped
//! - **Generic over `T: Float`** for the normal distribution and BSM kernel

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
