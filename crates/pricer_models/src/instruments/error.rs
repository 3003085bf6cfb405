//! Instrument error types.
//!
//! This module provides structured error handling for instrument
//! construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidOptionType`: Option type code is neither call nor put
/// - `InvalidStrike`: Strike price is non-positive
/// - `InvalidExpiry`: Expiry time is non-positive
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Unknown option type code.
    #[error("Invalid option type: {value:?} (expected 'C' or 'P')")]
    InvalidOptionType {
        /// The rejected input
        value: String,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry time (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },
}

impl InstrumentError {
    /// Validates a strike: finite and strictly positive.
    pub(crate) fn check_strike(strike: f64) -> Result<f64, InstrumentError> {
        if strike.is_finite() && strike > 0.0 {
            Ok(strike)
        } else {
            Err(InstrumentError::InvalidStrike { strike })
        }
    }

    /// Validates an expiry: finite and strictly positive.
    pub(crate) fn check_expiry(expiry: f64) -> Result<f64, InstrumentError> {
        if expiry.is_finite() && expiry > 0.0 {
            Ok(expiry)
        } else {
            Err(InstrumentError::InvalidExpiry { expiry })
        }
    }
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", InstrumentError::InvalidOptionType { value: "X".into() }),
            "Invalid option type: \"X\" (expected 'C' or 'P')"
        );
        assert_eq!(
            format!("{}", InstrumentError::InvalidStrike { strike: -100.0 }),
            "Invalid strike: K = -100"
        );
        assert_eq!(
            format!("{}", InstrumentError::InvalidExpiry { expiry: 0.0 }),
            "Invalid expiry: T = 0"
        );
    }

    #[test]
    fn test_checks() {
        assert_eq!(InstrumentError::check_strike(100.0), Ok(100.0));
        assert!(InstrumentError::check_strike(0.0).is_err());
        assert!(InstrumentError::check_strike(f64::INFINITY).is_err());
        assert_eq!(InstrumentError::check_expiry(0.5), Ok(0.5));
        assert!(InstrumentError::check_expiry(-1.0).is_err());
        assert!(InstrumentError::check_expiry(f64::NAN).is_err());
    }

    #[test]
    fn test_to_pricing_error() {
        let err: PricingError = InstrumentError::InvalidExpiry { expiry: 0.0 }.into();
        match err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("expiry")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
