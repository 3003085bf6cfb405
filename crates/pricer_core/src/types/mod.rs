//! Core market and error types.
//!
//! This module provides:
//! - `market`: Validated market parameters (spot, volatility, rate, cost-of-carry)
//! - `error`: Structured error types for pricing and grid construction
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`MarketParams`] from `market`
//! - [`PricingError`], [`GridError`] from `error`

pub mod error;
pub mod market;

// Re-export commonly used types at module level
pub use error::{GridError, PricingError};
pub use market::MarketParams;
