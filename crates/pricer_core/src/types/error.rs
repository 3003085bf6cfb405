//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing and sensitivity operations
//! - `GridError`: Errors from parameter grid construction

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode. Every layer of the workspace
/// converts its own error type into this one at the crate boundary.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation produced a non-finite value
/// - `ModelFailure`: Model assumptions violated
/// - `UnsupportedInstrument`: Instrument type not supported by the operation
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),

    /// Instrument type not supported
    UnsupportedInstrument(String),
}

impl PricingError {
    /// Passes `value` through when it is finite.
    ///
    /// Formulas are evaluated without branching on degenerate inputs; this is
    /// the single place where NaN or ±∞ is turned into an error so callers can
    /// tell "mathematically undefined" apart from a genuine small price.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// assert_eq!(PricingError::ensure_finite(1.5, "price"), Ok(1.5));
    /// assert!(PricingError::ensure_finite(f64::NAN, "price").is_err());
    /// ```
    #[inline]
    pub fn ensure_finite(value: f64, quantity: &str) -> Result<f64, PricingError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NumericalInstability(format!(
                "{} evaluated to {}",
                quantity, value
            )))
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
            PricingError::UnsupportedInstrument(msg) => {
                write!(f, "Unsupported instrument: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Grid construction errors.
///
/// # Variants
/// - `InvalidStep`: Step is zero, negative or not finite
/// - `InvalidBounds`: Bounds are not finite or `end < start`
///
/// # Examples
/// ```
/// use pricer_core::types::GridError;
///
/// let err = GridError::InvalidStep { step: 0.0 };
/// assert!(format!("{}", err).contains("step"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Step is zero, negative or not finite.
    #[error("Invalid grid step: h = {step}")]
    InvalidStep {
        /// The rejected step
        step: f64,
    },

    /// Bounds are not finite or reversed.
    #[error("Invalid grid bounds: [{start}, {end}]")]
    InvalidBounds {
        /// Grid start
        start: f64,
        /// Grid end
        end: f64,
    },

    /// The grid would hold more points than allowed.
    #[error("Grid too large: {points} points (maximum {max})")]
    TooManyPoints {
        /// Requested point count
        points: f64,
        /// Largest accepted point count
        max: usize,
    },
}

impl From<GridError> for PricingError {
    fn from(err: GridError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidInput("bad spot".to_string());
        assert_eq!(format!("{}", err), "Invalid input: bad spot");

        let err = PricingError::NumericalInstability("NaN".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: NaN");

        let err = PricingError::ModelFailure("no exercise".to_string());
        assert_eq!(format!("{}", err), "Model failure: no exercise");

        let err = PricingError::UnsupportedInstrument("perpetual".to_string());
        assert_eq!(format!("{}", err), "Unsupported instrument: perpetual");
    }

    #[test]
    fn test_ensure_finite_passes_values() {
        assert_eq!(PricingError::ensure_finite(0.0, "delta"), Ok(0.0));
        assert_eq!(PricingError::ensure_finite(-3.5, "delta"), Ok(-3.5));
    }

    #[test]
    fn test_ensure_finite_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match PricingError::ensure_finite(value, "gamma") {
                Err(PricingError::NumericalInstability(msg)) => assert!(msg.contains("gamma")),
                other => panic!("Expected NumericalInstability, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_grid_error_to_pricing_error() {
        let err: PricingError = GridError::InvalidStep { step: -1.0 }.into();
        match err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("-1")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::ModelFailure("x".to_string());
        let _: &dyn std::error::Error = &err;
        let err = GridError::InvalidBounds {
            start: 2.0,
            end: 1.0,
        };
        let _: &dyn std::error::Error = &err;
    }
}
