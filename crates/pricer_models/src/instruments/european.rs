//! European option under Black-Scholes-Merton.

use pricer_core::types::{MarketParams, PricingError};

use super::error::InstrumentError;
use super::traits::InstrumentTrait;
use super::OptionType;
use crate::analytical::{BlackScholesMerton, Greeks};

/// European option with strike and time to maturity.
///
/// Maturity is the only mutable term and is re-validated by
/// [`set_maturity`](EuropeanOption::set_maturity).
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParams;
/// use pricer_models::instruments::{EuropeanOption, InstrumentTrait, OptionType};
///
/// let put = EuropeanOption::new(OptionType::Put, 120.0, 1.45).unwrap();
/// let market = MarketParams::new(108.0, 0.51, 0.045, 0.0).unwrap();
///
/// let price = put.price(&market).unwrap();
/// let delta = put.delta(&market).unwrap();
/// assert!(price > 0.0);
/// assert!(delta < 0.0 && delta > -1.0);
///
/// // Zero maturity is rejected up front
/// assert!(EuropeanOption::new(OptionType::Call, 100.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanOption {
    option_type: OptionType,
    strike: f64,
    maturity: f64,
}

impl EuropeanOption {
    /// Creates a European option.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if strike is not finite and positive
    /// - `InstrumentError::InvalidExpiry` if maturity is not finite and positive
    pub fn new(option_type: OptionType, strike: f64, maturity: f64) -> Result<Self, InstrumentError> {
        Ok(Self {
            option_type,
            strike: InstrumentError::check_strike(strike)?,
            maturity: InstrumentError::check_expiry(maturity)?,
        })
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Replaces the time to maturity.
    ///
    /// # Errors
    /// `InstrumentError::InvalidExpiry` if `maturity` is not finite and
    /// positive; the option is left unchanged.
    pub fn set_maturity(&mut self, maturity: f64) -> Result<(), InstrumentError> {
        self.maturity = InstrumentError::check_expiry(maturity)?;
        Ok(())
    }

    #[inline]
    fn model(market: &MarketParams) -> BlackScholesMerton {
        BlackScholesMerton::from_market(market)
    }

    /// Analytic Theta (∂V/∂t, calendar time).
    pub fn theta(&self, market: &MarketParams) -> Result<f64, PricingError> {
        let theta = Self::model(market).theta(self.strike, self.maturity, self.option_type);
        PricingError::ensure_finite(theta, "European theta")
    }

    /// Analytic Vega (∂V/∂σ).
    pub fn vega(&self, market: &MarketParams) -> Result<f64, PricingError> {
        let vega = Self::model(market).vega(self.strike, self.maturity);
        PricingError::ensure_finite(vega, "European vega")
    }

    /// Price, Delta, Gamma, Theta and Vega in one pass.
    pub fn greeks(&self, market: &MarketParams) -> Result<Greeks, PricingError> {
        let greeks = Self::model(market).greeks(self.strike, self.maturity, self.option_type);
        PricingError::ensure_finite(greeks.price, "European price")?;
        PricingError::ensure_finite(greeks.delta, "European delta")?;
        PricingError::ensure_finite(greeks.gamma, "European gamma")?;
        PricingError::ensure_finite(greeks.theta, "European theta")?;
        PricingError::ensure_finite(greeks.vega, "European vega")?;
        Ok(greeks)
    }

    /// Price of the opposite option (same strike and maturity) implied by
    /// put-call parity.
    ///
    /// Given a put price on a call this returns `P + S·e^((b-r)T) - K·e^(-rT)`;
    /// given a call price on a put it returns `C - (S·e^((b-r)T) - K·e^(-rT))`.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::MarketParams;
    /// use pricer_models::instruments::{EuropeanOption, InstrumentTrait, OptionType};
    ///
    /// let market = MarketParams::new(60.0, 0.3, 0.08, 0.08).unwrap();
    /// let call = EuropeanOption::new(OptionType::Call, 65.0, 0.25).unwrap();
    /// let put = EuropeanOption::new(OptionType::Put, 65.0, 0.25).unwrap();
    ///
    /// let put_price = put.price(&market).unwrap();
    /// let implied_call = call.parity_price(put_price, &market).unwrap();
    /// assert!((implied_call - call.price(&market).unwrap()).abs() < 1e-10);
    /// ```
    pub fn parity_price(&self, other_price: f64, market: &MarketParams) -> Result<f64, PricingError> {
        let forward = Self::model(market).parity_forward(self.strike, self.maturity);
        let price = match self.option_type {
            OptionType::Call => other_price + forward,
            OptionType::Put => other_price - forward,
        };
        PricingError::ensure_finite(price, "parity price")
    }

    /// Checks `|(C - P) - (S·e^((b-r)T) - K·e^(-rT))| < tolerance`.
    ///
    /// Purely diagnostic: the prices may come from anywhere. Parity does not
    /// involve volatility, so only spot, rate and carry are taken. Any
    /// non-finite input fails the check.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::EuropeanOption;
    ///
    /// assert!(EuropeanOption::check_parity(2.13337, 5.84628, 65.0, 0.25, 60.0, 0.08, 0.08, 1e-4));
    /// assert!(!EuropeanOption::check_parity(2.2, 5.84628, 65.0, 0.25, 60.0, 0.08, 0.08, 1e-4));
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn check_parity(
        call_price: f64,
        put_price: f64,
        strike: f64,
        maturity: f64,
        spot: f64,
        rate: f64,
        carry: f64,
        tolerance: f64,
    ) -> bool {
        let forward =
            spot * ((carry - rate) * maturity).exp() - strike * (-rate * maturity).exp();
        ((call_price - put_price) - forward).abs() < tolerance
    }
}

impl InstrumentTrait for EuropeanOption {
    #[inline]
    fn option_type(&self) -> OptionType {
        self.option_type
    }

    #[inline]
    fn strike(&self) -> f64 {
        self.strike
    }

    fn price(&self, market: &MarketParams) -> Result<f64, PricingError> {
        let price = Self::model(market).price(self.strike, self.maturity, self.option_type);
        PricingError::ensure_finite(price, "European price")
    }

    fn delta(&self, market: &MarketParams) -> Result<f64, PricingError> {
        let delta = Self::model(market).delta(self.strike, self.maturity, self.option_type);
        PricingError::ensure_finite(delta, "European delta")
    }

    fn gamma(&self, market: &MarketParams) -> Result<f64, PricingError> {
        let gamma = Self::model(market).gamma(self.strike, self.maturity);
        PricingError::ensure_finite(gamma, "European gamma")
    }

    fn type_name(&self) -> &'static str {
        "EuropeanOption"
    }
}
