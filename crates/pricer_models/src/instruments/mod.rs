//! Option instrument definitions.
//!
//! This module provides the option instruments with enum dispatch
//! architecture.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects) for static dispatch:
//! - [`Instrument`] enum wraps all instrument types
//! - [`InstrumentTrait`] is the common contract, implemented by each variant
//!   and by the enum itself
//!
//! # Instrument Types
//!
//! - [`EuropeanOption`]: Black-Scholes-Merton European call/put
//! - [`PerpetualAmericanOption`]: American call/put without expiry
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::MarketParams;
//! use pricer_models::instruments::{
//!     EuropeanOption, Instrument, InstrumentTrait, OptionType, PerpetualAmericanOption,
//! };
//!
//! let market = MarketParams::new(110.0, 0.1, 0.1, 0.02).unwrap();
//! let book = vec![
//!     Instrument::European(EuropeanOption::new(OptionType::Call, 100.0, 1.0).unwrap()),
//!     Instrument::PerpetualAmerican(PerpetualAmericanOption::new(OptionType::Put, 100.0).unwrap()),
//! ];
//!
//! for instrument in &book {
//!     assert!(instrument.price(&market).unwrap() > 0.0);
//! }
//! ```

mod error;
mod european;
mod option_type;
mod perpetual;
mod traits;

pub use error::InstrumentError;
pub use european::EuropeanOption;
pub use option_type::OptionType;
pub use perpetual::PerpetualAmericanOption;
pub use traits::InstrumentTrait;

use pricer_core::types::{MarketParams, PricingError};

/// Unified instrument enum for static dispatch.
///
/// # Variants
/// - `European`: European option with finite maturity
/// - `PerpetualAmerican`: American option without expiry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instrument {
    /// European option
    European(EuropeanOption),
    /// Perpetual American option
    PerpetualAmerican(PerpetualAmericanOption),
}

impl Instrument {
    /// Returns the maturity, `None` for a perpetual.
    #[inline]
    pub fn maturity(&self) -> Option<f64> {
        match self {
            Instrument::European(option) => Some(option.maturity()),
            Instrument::PerpetualAmerican(_) => None,
        }
    }

    /// Analytic Theta.
    ///
    /// # Errors
    /// `PricingError::UnsupportedInstrument` for a perpetual, which has no
    /// time dependence.
    pub fn theta(&self, market: &MarketParams) -> Result<f64, PricingError> {
        match self {
            Instrument::European(option) => option.theta(market),
            Instrument::PerpetualAmerican(_) => Err(self.unsupported("theta")),
        }
    }

    /// Analytic Vega.
    ///
    /// # Errors
    /// `PricingError::UnsupportedInstrument` for a perpetual.
    pub fn vega(&self, market: &MarketParams) -> Result<f64, PricingError> {
        match self {
            Instrument::European(option) => option.vega(market),
            Instrument::PerpetualAmerican(_) => Err(self.unsupported("vega")),
        }
    }

    fn unsupported(&self, measure: &str) -> PricingError {
        PricingError::UnsupportedInstrument(format!(
            "{} does not provide {}",
            self.type_name(),
            measure
        ))
    }

    /// Returns whether this is a European option.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, Instrument::European(_))
    }

    /// Returns whether this is a perpetual American option.
    #[inline]
    pub fn is_perpetual(&self) -> bool {
        matches!(self, Instrument::PerpetualAmerican(_))
    }

    /// Returns a reference to the European option if this is a European variant.
    pub fn as_european(&self) -> Option<&EuropeanOption> {
        match self {
            Instrument::European(option) => Some(option),
            _ => None,
        }
    }

    /// Returns a reference to the perpetual if this is a PerpetualAmerican variant.
    pub fn as_perpetual(&self) -> Option<&PerpetualAmericanOption> {
        match self {
            Instrument::PerpetualAmerican(option) => Some(option),
            _ => None,
        }
    }
}

impl InstrumentTrait for Instrument {
    #[inline]
    fn option_type(&self) -> OptionType {
        match self {
            Instrument::European(option) => option.option_type(),
            Instrument::PerpetualAmerican(option) => option.option_type(),
        }
    }

    #[inline]
    fn strike(&self) -> f64 {
        match self {
            Instrument::European(option) => option.strike(),
            Instrument::PerpetualAmerican(option) => option.strike(),
        }
    }

    fn price(&self, market: &MarketParams) -> Result<f64, PricingError> {
        match self {
            Instrument::European(option) => option.price(market),
            Instrument::PerpetualAmerican(option) => option.price(market),
        }
    }

    fn delta(&self, market: &MarketParams) -> Result<f64, PricingError> {
        match self {
            Instrument::European(option) => option.delta(market),
            Instrument::PerpetualAmerican(option) => option.delta(market),
        }
    }

    fn gamma(&self, market: &MarketParams) -> Result<f64, PricingError> {
        match self {
            Instrument::European(option) => option.gamma(market),
            Instrument::PerpetualAmerican(option) => option.gamma(market),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Instrument::European(option) => option.type_name(),
            Instrument::PerpetualAmerican(option) => option.type_name(),
        }
    }
}

impl From<EuropeanOption> for Instrument {
    fn from(option: EuropeanOption) -> Self {
        Instrument::European(option)
    }
}

impl From<PerpetualAmericanOption> for Instrument {
    fn from(option: PerpetualAmericanOption) -> Self {
        Instrument::PerpetualAmerican(option)
    }
}
