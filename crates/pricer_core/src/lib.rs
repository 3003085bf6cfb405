//! # pricer_core: Foundation for the Exact Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Validated per-call market inputs: `MarketParams` (`types::market`)
//! - Error types: `PricingError` (`types::error`)
//! - Central finite differences for Greeks validation (`math::finite_difference`)
//! - Evenly spaced parameter grids for scenario sweeps (`math::grid`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::finite_difference::central_first_difference;
//! use pricer_core::types::MarketParams;
//!
//! let market = MarketParams::new(100.0, 0.2, 0.05, 0.05).unwrap();
//! assert_eq!(market.spot(), 100.0);
//!
//! // d/dx x² at x = 3
//! let slope = central_first_difference(|x| Ok(x * x), 3.0, 1e-3).unwrap();
//! assert!((slope - 6.0).abs() < 1e-8);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
