//! Analytical pricing formulas.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes-Merton model with cost-of-carry for European options
//! - Optimal-exercise value of perpetual American options
//! - Analytical Greeks (Delta, Gamma, Theta, Vega)
//!
//! ## Design Principles
//!
//! - **Market state in the model, contract terms per call**: one model value can
//!   price any strike/expiry
//! - **Numerical Accuracy**: normal CDF via `erfc` to full double precision

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod perpetual_american;

// Re-export main types at module level
pub use black_scholes::{BlackScholesMerton, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use perpetual_american::PerpetualAmerican;
