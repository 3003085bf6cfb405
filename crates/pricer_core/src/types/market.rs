//! Market parameters supplied to every pricing call.
//!
//! Instruments own only their contractual terms (strike, maturity). The
//! observable market state is passed in per call as a [`MarketParams`], which
//! is validated once on construction.

use super::error::PricingError;

/// Spot, volatility, risk-free rate and cost-of-carry for one evaluation.
///
/// # Invariants
/// - `spot` is finite and strictly positive
/// - `volatility` is finite and strictly positive
/// - `rate` and `carry` are finite (negative values are allowed)
///
/// Common carry choices: `b = r` (non-dividend stock), `b = r - q`
/// (continuous dividend yield `q`), `b = 0` (futures option).
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParams;
///
/// let market = MarketParams::new(108.0, 0.51, 0.045, 0.0).unwrap();
/// assert_eq!(market.volatility(), 0.51);
///
/// // Zero volatility is a domain error, not a silent NaN later on
/// assert!(MarketParams::new(108.0, 0.0, 0.045, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    spot: f64,
    volatility: f64,
    rate: f64,
    carry: f64,
}

impl MarketParams {
    /// Creates validated market parameters.
    ///
    /// # Arguments
    /// * `spot` - Current price of the underlying (S)
    /// * `volatility` - Annualised volatility (σ)
    /// * `rate` - Risk-free interest rate (r)
    /// * `carry` - Cost-of-carry (b)
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if spot or volatility is not strictly
    /// positive, or any argument is not finite.
    pub fn new(spot: f64, volatility: f64, rate: f64, carry: f64) -> Result<Self, PricingError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "spot must be positive and finite: S = {}",
                spot
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "volatility must be positive and finite: σ = {}",
                volatility
            )));
        }
        if !rate.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "rate must be finite: r = {}",
                rate
            )));
        }
        if !carry.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "cost-of-carry must be finite: b = {}",
                carry
            )));
        }

        Ok(Self {
            spot,
            volatility,
            rate,
            carry,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the cost-of-carry.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Returns a copy with the spot replaced, re-validated.
    ///
    /// Used for spot bumps in finite-difference Greeks.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::MarketParams;
    ///
    /// let market = MarketParams::new(100.0, 0.2, 0.05, 0.05).unwrap();
    /// assert_eq!(market.with_spot(101.0).unwrap().spot(), 101.0);
    /// assert!(market.with_spot(-1.0).is_err());
    /// ```
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(spot, self.volatility, self.rate, self.carry)
    }

    /// Growth factor of the underlying over `expiry`: e^((b-r)T).
    #[inline]
    pub fn carry_factor(&self, expiry: f64) -> f64 {
        ((self.carry - self.rate) * expiry).exp()
    }

    /// Discount factor over `expiry`: e^(-rT).
    #[inline]
    pub fn discount_factor(&self, expiry: f64) -> f64 {
        (-self.rate * expiry).exp()
    }
}
