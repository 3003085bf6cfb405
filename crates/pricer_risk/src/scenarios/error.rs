//! Scenario matrix error types.

use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use super::{SweepParameter, EUROPEAN_ROW_LEN, PERPETUAL_ROW_LEN};

/// Errors raised while building a scenario matrix.
///
/// Evaluation errors are reported per row as [`PricingError`]; these are the
/// structural errors that reject a row before it is stored.
///
/// # Examples
/// ```
/// use pricer_risk::scenarios::ScenarioError;
///
/// let err = ScenarioError::InvalidRowLength { len: 5 };
/// assert!(format!("{}", err).contains("5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// Row is neither a 6-tuple (perpetual) nor a 7-tuple (European).
    #[error(
        "Invalid scenario row length: {len} (expected {} for perpetual American or {} for European)",
        PERPETUAL_ROW_LEN,
        EUROPEAN_ROW_LEN
    )]
    InvalidRowLength {
        /// Length of the rejected row
        len: usize,
    },

    /// The swept parameter does not exist for the base instrument.
    #[error("Cannot sweep {parameter} on a {instrument} scenario")]
    UnsupportedSweep {
        /// Requested parameter
        parameter: SweepParameter,
        /// Instrument family of the base scenario
        instrument: &'static str,
    },

    /// The row's instrument terms are invalid.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}

impl From<ScenarioError> for PricingError {
    fn from(err: ScenarioError) -> Self {
        match err {
            ScenarioError::Instrument(inner) => inner.into(),
            ScenarioError::InvalidRowLength { .. } => PricingError::InvalidInput(err.to_string()),
            ScenarioError::UnsupportedSweep { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
        }
    }
}
