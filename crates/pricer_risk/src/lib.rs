//! # Pricer Risk (L4: Application)
//!
//! Scenario matrices and parallel batch evaluation.
//!
//! This crate provides:
//! - `ScenarioMatrix`: ordered scenario rows, each bound to its own instrument
//! - One-parameter sweeps (spot, volatility, rate, carry, strike, maturity)
//! - Batch Price/Delta/Gamma and finite-difference Delta/Gamma with
//!   per-row error reporting
//! - Rayon-based parallelisation above a configurable row threshold
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  scenarios/  - Rows, sweeps, matrix    │
//! │  parallel/   - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)           │
//! │  Closed-form models and instruments    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Emits `tracing` events (`debug` for batch sizes and the parallel decision,
//! `warn` for rejected rows). No subscriber is installed here.
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::OptionType;
//! use pricer_risk::scenarios::{ScenarioMatrix, ScenarioRow, SweepParameter};
//!
//! let base = ScenarioRow::perpetual(110.0, 0.1, 0.1, 0.02, OptionType::Put, 100.0);
//! let mut matrix = ScenarioMatrix::sweep(&base, SweepParameter::Spot, &[90.0, 100.0, 110.0]).unwrap();
//!
//! // Raw rows: 6 values bind a perpetual, 7 a European option
//! matrix.append(&[60.0, 0.3, 0.08, 0.08, 1.0, 65.0, 0.25]).unwrap();
//!
//! let prices = matrix.price();
//! assert_eq!(prices.len(), matrix.len());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod scenarios;
