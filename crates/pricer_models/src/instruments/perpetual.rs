//! Perpetual American option.

use pricer_core::types::{MarketParams, PricingError};

use super::error::InstrumentError;
use super::traits::InstrumentTrait;
use super::OptionType;
use crate::analytical::PerpetualAmerican;

/// American option without expiry.
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParams;
/// use pricer_models::instruments::{InstrumentTrait, OptionType, PerpetualAmericanOption};
///
/// let put = PerpetualAmericanOption::new(OptionType::Put, 100.0).unwrap();
/// let market = MarketParams::new(110.0, 0.1, 0.1, 0.02).unwrap();
///
/// let delta = put.delta(&market).unwrap();
/// let approx = put.approx_delta(&market, 0.01).unwrap();
/// assert!((delta - approx).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerpetualAmericanOption {
    option_type: OptionType,
    strike: f64,
}

impl PerpetualAmericanOption {
    /// Creates a perpetual American option.
    ///
    /// # Errors
    /// `InstrumentError::InvalidStrike` if strike is not finite and positive.
    pub fn new(option_type: OptionType, strike: f64) -> Result<Self, InstrumentError> {
        Ok(Self {
            option_type,
            strike: InstrumentError::check_strike(strike)?,
        })
    }

    /// Spot level S* at which immediate exercise becomes optimal.
    ///
    /// # Errors
    /// `PricingError::ModelFailure` when no finite optimal exercise exists
    /// (call with `b >= r`, put with `r <= 0`).
    pub fn exercise_boundary(&self, market: &MarketParams) -> Result<f64, PricingError> {
        Ok(PerpetualAmerican::from_market(market).exercise_boundary(self.strike, self.option_type)?)
    }
}

impl InstrumentTrait for PerpetualAmericanOption {
    #[inline]
    fn option_type(&self) -> OptionType {
        self.option_type
    }

    #[inline]
    fn strike(&self) -> f64 {
        self.strike
    }

    fn price(&self, market: &MarketParams) -> Result<f64, PricingError> {
        Ok(PerpetualAmerican::from_market(market).price(self.strike, self.option_type)?)
    }

    fn delta(&self, market: &MarketParams) -> Result<f64, PricingError> {
        Ok(PerpetualAmerican::from_market(market).delta(self.strike, self.option_type)?)
    }

    fn gamma(&self, market: &MarketParams) -> Result<f64, PricingError> {
        Ok(PerpetualAmerican::from_market(market).gamma(self.strike, self.option_type)?)
    }

    fn type_name(&self) -> &'static str {
        "PerpetualAmericanOption"
    }
}
