//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to analytical pricing models

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Provides structured error handling for analytical pricing operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidSpot`: Non-positive spot price
/// - `NoOptimalExercise`: Perpetual option has no finite optimal-exercise value
/// - `NumericalInstability`: Computation encountered numerical issues
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// The perpetual option is never optimally exercised.
    ///
    /// A perpetual call needs `b < r`; a perpetual put needs `r > 0`.
    #[error("No optimal exercise for perpetual {option}: r = {rate}, b = {carry}")]
    NoOptimalExercise {
        /// "call" or "put"
        option: &'static str,
        /// Risk-free rate
        rate: f64,
        /// Cost-of-carry
        carry: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidVolatility { .. } | AnalyticalError::InvalidSpot { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            AnalyticalError::NoOptimalExercise { .. } => PricingError::ModelFailure(err.to_string()),
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
