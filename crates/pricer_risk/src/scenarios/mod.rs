//! Scenario matrices for batch evaluation.
//!
//! This module provides infrastructure for:
//! - Typed scenario rows and their flat 6/7-tuple form
//! - One-parameter sweeps over a base scenario
//! - Batch evaluation of prices and Greeks with per-row results
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               ScenarioMatrix                 │
//! ├──────────────────────────────────────────────┤
//! │  ScenarioRow    - Market + instrument terms  │
//! │  SweepParameter - Which parameter varies     │
//! │  Measure        - What is evaluated per row  │
//! │  Instrument     - Bound 1:1 to each row      │
//! └──────────────────────────────────────────────┘
//! ```

mod error;
mod matrix;
mod row;
mod sweep;

pub use error::ScenarioError;
pub use matrix::{Measure, ScenarioMatrix};
pub use row::{ScenarioRow, EUROPEAN_ROW_LEN, PERPETUAL_ROW_LEN};
pub use sweep::{BaseScenario, SweepParameter};
