//! Typed scenario rows.
//!
//! A row carries the market parameters of one scenario plus the terms of the
//! instrument bound to it. On the wire a row is a flat tuple:
//!
//! - 6 values `(spot, vol, rate, carry, sign, strike)`: perpetual American
//! - 7 values `(spot, vol, rate, carry, sign, strike, maturity)`: European
//!
//! with `sign == +1` for a call and any other value for a put.

use pricer_core::types::{MarketParams, PricingError};
use pricer_models::instruments::{
    EuropeanOption, Instrument, InstrumentError, OptionType, PerpetualAmericanOption,
};

use super::ScenarioError;

/// Tuple length of a perpetual American row.
pub const PERPETUAL_ROW_LEN: usize = 6;

/// Tuple length of a European row.
pub const EUROPEAN_ROW_LEN: usize = 7;

/// One scenario: market parameters plus instrument terms.
///
/// `maturity == None` denotes a perpetual American option. Market values are
/// stored as given and validated when the row is evaluated, so a degenerate
/// row (e.g. zero volatility) yields a per-row error rather than being dropped.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_risk::scenarios::ScenarioRow;
///
/// let row = ScenarioRow::try_from(&[60.0, 0.3, 0.08, 0.08, 1.0, 65.0, 0.25][..]).unwrap();
/// assert_eq!(row.option_type, OptionType::Call);
/// assert_eq!(row.maturity, Some(0.25));
/// assert_eq!(row.to_vec(), vec![60.0, 0.3, 0.08, 0.08, 1.0, 65.0, 0.25]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRow {
    /// Spot price (S)
    pub spot: f64,
    /// Volatility (σ)
    pub volatility: f64,
    /// Risk-free rate (r)
    pub rate: f64,
    /// Cost-of-carry (b)
    pub carry: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Strike (K)
    pub strike: f64,
    /// Time to maturity; `None` for a perpetual
    pub maturity: Option<f64>,
}

impl ScenarioRow {
    /// European row.
    pub fn european(
        spot: f64,
        volatility: f64,
        rate: f64,
        carry: f64,
        option_type: OptionType,
        strike: f64,
        maturity: f64,
    ) -> Self {
        Self {
            spot,
            volatility,
            rate,
            carry,
            option_type,
            strike,
            maturity: Some(maturity),
        }
    }

    /// Perpetual American row.
    pub fn perpetual(
        spot: f64,
        volatility: f64,
        rate: f64,
        carry: f64,
        option_type: OptionType,
        strike: f64,
    ) -> Self {
        Self {
            spot,
            volatility,
            rate,
            carry,
            option_type,
            strike,
            maturity: None,
        }
    }

    /// Returns true for a perpetual American row.
    #[inline]
    pub fn is_perpetual(&self) -> bool {
        self.maturity.is_none()
    }

    /// Instrument family name, for messages.
    pub fn family(&self) -> &'static str {
        if self.is_perpetual() {
            "perpetual American"
        } else {
            "European"
        }
    }

    /// Validated market parameters of this row.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for non-positive spot or volatility, or
    /// non-finite values.
    pub fn market(&self) -> Result<MarketParams, PricingError> {
        MarketParams::new(self.spot, self.volatility, self.rate, self.carry)
    }

    /// Builds the instrument bound to this row.
    ///
    /// # Errors
    /// `InstrumentError` for a non-positive strike or maturity.
    pub fn instrument(&self) -> Result<Instrument, InstrumentError> {
        Ok(match self.maturity {
            Some(maturity) => EuropeanOption::new(self.option_type, self.strike, maturity)?.into(),
            None => PerpetualAmericanOption::new(self.option_type, self.strike)?.into(),
        })
    }

    /// Flat tuple form, with the sign rendered as +1 or -1.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.tuple_len());
        values.extend_from_slice(&[
            self.spot,
            self.volatility,
            self.rate,
            self.carry,
            self.option_type.sign(),
            self.strike,
        ]);
        if let Some(maturity) = self.maturity {
            values.push(maturity);
        }
        values
    }

    /// Tuple length of this row: [`PERPETUAL_ROW_LEN`] or [`EUROPEAN_ROW_LEN`].
    #[inline]
    pub fn tuple_len(&self) -> usize {
        if self.is_perpetual() {
            PERPETUAL_ROW_LEN
        } else {
            EUROPEAN_ROW_LEN
        }
    }
}

impl TryFrom<&[f64]> for ScenarioRow {
    type Error = ScenarioError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match *values {
            [spot, volatility, rate, carry, sign, strike] => Ok(Self::perpetual(
                spot,
                volatility,
                rate,
                carry,
                OptionType::from_sign(sign),
                strike,
            )),
            [spot, volatility, rate, carry, sign, strike, maturity] => Ok(Self::european(
                spot,
                volatility,
                rate,
                carry,
                OptionType::from_sign(sign),
                strike,
                maturity,
            )),
            _ => Err(ScenarioError::InvalidRowLength { len: values.len() }),
        }
    }
}
