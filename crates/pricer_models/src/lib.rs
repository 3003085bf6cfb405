//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option models and the instruments built on them.
//!
//! This crate provides:
//! - Standard normal distribution functions
//! - Black-Scholes-Merton pricing with cost-of-carry, Greeks and put-call parity
//! - Perpetual American pricing on the optimal exercise boundary
//! - Instrument definitions (European, perpetual American) behind one contract
//!   that also exposes finite-difference Delta/Gamma for validation
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Validated construction**: option type, strike and maturity are checked once
//! - **Fallible evaluation**: degenerate inputs surface as errors, never as silent NaN

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
