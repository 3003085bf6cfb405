//! Black-Scholes-Merton pricing model for European options.
//!
//! This module provides the generalised Black-Scholes-Merton model with a
//! cost-of-carry term `b`, covering calls and puts on stocks (`b = r`),
//! stocks with continuous dividend yield `q` (`b = r - q`), futures (`b = 0`)
//! and currencies (`b = r - r_f`).
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::types::MarketParams;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Price and analytic sensitivities of one European option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks {
    /// Option value
    pub price: f64,
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t (calendar time, usually negative)
    pub theta: f64,
    /// ∂V/∂σ
    pub vega: f64,
}

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market state; contract terms (strike, expiry, option type) are
/// supplied per call so one model value prices a whole strip of options.
///
/// Expiries passed to the pricing methods must be strictly positive. The
/// instrument layer enforces this on construction.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholesMerton;
/// use pricer_models::instruments::OptionType;
///
/// let bsm = BlackScholesMerton::new(100.0, 0.2, 0.05, 0.05).unwrap();
/// let call = bsm.price(100.0, 1.0, OptionType::Call);
/// let put = bsm.price(100.0, 1.0, OptionType::Put);
///
/// // Put-call parity: C - P = S·e^((b-r)T) - K·e^(-rT)
/// let parity = call - put - bsm.parity_forward(100.0, 1.0);
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesMerton {
    /// Spot price (S)
    spot: f64,
    /// Volatility (σ)
    volatility: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Cost-of-carry (b)
    carry: f64,
}

impl BlackScholesMerton {
    /// Creates a new Black-Scholes-Merton model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `volatility` - Volatility (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `carry` - Cost-of-carry (annualised)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholesMerton;
    ///
    /// assert!(BlackScholesMerton::new(100.0, 0.2, 0.05, 0.0).is_ok());
    /// assert!(BlackScholesMerton::new(-100.0, 0.2, 0.05, 0.0).is_err());
    /// assert!(BlackScholesMerton::new(100.0, 0.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, volatility: f64, rate: f64, carry: f64) -> Result<Self, AnalyticalError> {
        if !(spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            volatility,
            rate,
            carry,
        })
    }

    /// Creates the model from already validated market parameters.
    #[inline]
    pub fn from_market(market: &MarketParams) -> Self {
        Self {
            spot: market.spot(),
            volatility: market.volatility(),
            rate: market.rate(),
            carry: market.carry(),
        }
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

    /// e^((b-r)T)
    #[inline]
    fn carry_factor(&self, expiry: f64) -> f64 {
        ((self.carry - self.rate) * expiry).exp()
    }

    /// e^(-rT)
    #[inline]
    fn discount_factor(&self, expiry: f64) -> f64 {
        (-self.rate * expiry).exp()
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
    ///
    /// # Arguments
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to expiration in years (T)
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.carry + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the option price.
    ///
    /// - Call: S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
    /// - Put: K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholesMerton;
    /// use pricer_models::instruments::OptionType;
    ///
    /// // Futures option (b = 0)
    /// let bsm = BlackScholesMerton::new(100.0, 0.2, 0.0, 0.0).unwrap();
    /// let call = bsm.price(100.0, 1.0, OptionType::Call);
    /// assert!((call - 7.965567).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn price(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let forward = self.spot * self.carry_factor(expiry);
        let discounted_strike = strike * self.discount_factor(expiry);

        match option_type {
            OptionType::Call => forward * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionType::Put => discounted_strike * norm_cdf(-d2) - forward * norm_cdf(-d1),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^((b-r)T)·N(d₁)
    /// - Put Delta = e^((b-r)T)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        let carry_factor = self.carry_factor(expiry);

        match option_type {
            OptionType::Call => carry_factor * n_d1,
            OptionType::Put => carry_factor * (n_d1 - 1.0),
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = φ(d₁)·e^((b-r)T) / (S·σ·√T)
    ///
    /// Gamma is the same for both calls and puts.
    #[inline]
    pub fn gamma(&self, strike: f64, expiry: f64) -> f64 {
        let d1 = self.d1(strike, expiry);
        norm_pdf(d1) * self.carry_factor(expiry) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ).
    ///
    /// Vega = S·√T·e^((b-r)T)·φ(d₁)
    ///
    /// Vega is the same for both calls and puts.
    #[inline]
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        let d1 = self.d1(strike, expiry);
        self.spot * expiry.sqrt() * self.carry_factor(expiry) * norm_pdf(d1)
    }

    /// Computes Theta (∂V/∂t).
    ///
    /// - Call Theta = -S·σ·e^((b-r)T)·φ(d₁)/(2√T) - (b-r)·S·e^((b-r)T)·N(d₁) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -S·σ·e^((b-r)T)·φ(d₁)/(2√T) + (b-r)·S·e^((b-r)T)·N(-d₁) + r·K·e^(-rT)·N(-d₂)
    ///
    /// This is the rate of change with respect to calendar time, i.e. minus the
    /// derivative with respect to time to expiry.
    #[inline]
    pub fn theta(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let forward = self.spot * self.carry_factor(expiry);
        let discounted_strike = strike * self.discount_factor(expiry);
        let carry_excess = self.carry - self.rate;

        // Common term: -S·σ·e^((b-r)T)·φ(d₁)/(2√T)
        let decay = -forward * self.volatility * norm_pdf(d1) / (2.0 * expiry.sqrt());

        match option_type {
            OptionType::Call => {
                decay
                    - carry_excess * forward * norm_cdf(d1)
                    - self.rate * discounted_strike * norm_cdf(d2)
            }
            OptionType::Put => {
                decay
                    + carry_excess * forward * norm_cdf(-d1)
                    + self.rate * discounted_strike * norm_cdf(-d2)
            }
        }
    }

    /// Computes all analytic quantities in one pass.
    pub fn greeks(&self, strike: f64, expiry: f64, option_type: OptionType) -> Greeks {
        Greeks {
            price: self.price(strike, expiry, option_type),
            delta: self.delta(strike, expiry, option_type),
            gamma: self.gamma(strike, expiry),
            theta: self.theta(strike, expiry, option_type),
            vega: self.vega(strike, expiry),
        }
    }

    /// Right-hand side of put-call parity: S·e^((b-r)T) - K·e^(-rT).
    ///
    /// For same-strike, same-expiry European options, `C - P` equals this value.
    #[inline]
    pub fn parity_forward(&self, strike: f64, expiry: f64) -> f64 {
        self.spot * self.carry_factor(expiry) - strike * self.discount_factor(expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn futures_model() -> BlackScholesMerton {
        BlackScholesMerton::new(105.0, 0.36, 0.1, 0.0).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bsm = BlackScholesMerton::new(100.0, 0.2, 0.05, 0.02).unwrap();
        assert_eq!(bsm.spot(), 100.0);
        assert_eq!(bsm.volatility(), 0.2);
        assert_eq!(bsm.rate(), 0.05);
        assert_eq!(bsm.carry(), 0.02);
    }

    #[test]
    fn test_new_invalid_spot() {
        for spot in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                BlackScholesMerton::new(spot, 0.2, 0.05, 0.05),
                Err(AnalyticalError::InvalidSpot { .. })
            ));
        }
    }

    #[test]
    fn test_new_invalid_volatility() {
        for vol in [0.0, -0.2, f64::NAN] {
            assert!(matches!(
                BlackScholesMerton::new(100.0, vol, 0.05, 0.05),
                Err(AnalyticalError::InvalidVolatility { .. })
            ));
        }
    }

    #[test]
    fn test_from_market_copies_fields() {
        let market = MarketParams::new(60.0, 0.3, 0.08, 0.08).unwrap();
        let bsm = BlackScholesMerton::from_market(&market);
        assert_eq!(bsm, BlackScholesMerton::new(60.0, 0.3, 0.08, 0.08).unwrap());
    }

    // ==========================================================
    // d1 / d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_relationship() {
        let bsm = BlackScholesMerton::new(100.0, 0.25, 0.05, 0.03).unwrap();
        let d1 = bsm.d1(90.0, 2.0);
        let d2 = bsm.d2(90.0, 2.0);
        assert_relative_eq!(d1 - d2, 0.25 * 2.0_f64.sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_d1_uses_carry_not_rate() {
        // With b = 0 at the money, d1 = σ√T/2 regardless of r
        let bsm = BlackScholesMerton::new(100.0, 0.2, 0.3, 0.0).unwrap();
        assert_relative_eq!(bsm.d1(100.0, 1.0), 0.1, epsilon = 1e-14);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        let bsm = BlackScholesMerton::new(60.0, 0.3, 0.08, 0.08).unwrap();
        assert_relative_eq!(bsm.price(65.0, 0.25, OptionType::Call), 2.13337, epsilon = 1e-4);
        assert_relative_eq!(bsm.price(65.0, 0.25, OptionType::Put), 5.84628, epsilon = 1e-4);

        let bsm = BlackScholesMerton::new(5.0, 0.5, 0.12, 0.12).unwrap();
        assert_relative_eq!(bsm.price(10.0, 1.0, OptionType::Call), 0.204058, epsilon = 1e-4);
        assert_relative_eq!(bsm.price(10.0, 1.0, OptionType::Put), 4.07326, epsilon = 1e-4);
    }

    #[test]
    fn test_atm_futures_option_call_equals_put() {
        let bsm = BlackScholesMerton::new(100.0, 0.2, 0.0, 0.0).unwrap();
        let call = bsm.price(100.0, 1.0, OptionType::Call);
        let put = bsm.price(100.0, 1.0, OptionType::Put);
        assert_relative_eq!(call, put, epsilon = 1e-12);
        assert_relative_eq!(call, 7.965567, epsilon = 1e-6);
    }

    #[test]
    fn test_put_call_parity_with_carry() {
        for carry in [-0.03, 0.0, 0.02, 0.08] {
            let bsm = BlackScholesMerton::new(95.0, 0.35, 0.05, carry).unwrap();
            for (strike, expiry) in [(80.0, 0.5), (100.0, 1.0), (130.0, 3.0)] {
                let call = bsm.price(strike, expiry, OptionType::Call);
                let put = bsm.price(strike, expiry, OptionType::Put);
                assert_relative_eq!(
                    call - put,
                    bsm.parity_forward(strike, expiry),
                    epsilon = 1e-10
                );
            }
        }
    }

    #[test]
    fn test_prices_positive() {
        let bsm = BlackScholesMerton::new(108.0, 0.51, 0.045, 0.0).unwrap();
        assert!(bsm.price(120.0, 1.45, OptionType::Call) > 0.0);
        assert!(bsm.price(120.0, 1.45, OptionType::Put) > 0.0);
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_futures_option_reference_greeks() {
        let bsm = futures_model();
        assert_relative_eq!(bsm.delta(100.0, 0.5, OptionType::Call), 0.5946, epsilon = 1e-4);
        assert_relative_eq!(bsm.delta(100.0, 0.5, OptionType::Put), -0.3566, epsilon = 1e-4);
        assert_relative_eq!(bsm.gamma(100.0, 0.5), 0.0135, epsilon = 1e-4);
    }

    #[test]
    fn test_delta_call_put_relationship() {
        let bsm = futures_model();
        let call = bsm.delta(100.0, 0.5, OptionType::Call);
        let put = bsm.delta(100.0, 0.5, OptionType::Put);
        assert_relative_eq!(call - put, (-0.1_f64 * 0.5).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let bsm = BlackScholesMerton::new(100.0, 0.25, 0.04, 0.01).unwrap();
        let h = 1e-4;
        let up = BlackScholesMerton::new(100.0 + h, 0.25, 0.04, 0.01).unwrap();
        let down = BlackScholesMerton::new(100.0 - h, 0.25, 0.04, 0.01).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let fd = (up.price(110.0, 0.75, option_type) - down.price(110.0, 0.75, option_type))
                / (2.0 * h);
            assert_relative_eq!(bsm.delta(110.0, 0.75, option_type), fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let bsm = BlackScholesMerton::new(100.0, 0.25, 0.04, 0.01).unwrap();
        let h = 1e-5;
        let up = BlackScholesMerton::new(100.0, 0.25 + h, 0.04, 0.01).unwrap();
        let down = BlackScholesMerton::new(100.0, 0.25 - h, 0.04, 0.01).unwrap();
        let fd = (up.price(95.0, 1.5, OptionType::Put) - down.price(95.0, 1.5, OptionType::Put))
            / (2.0 * h);
        assert_relative_eq!(bsm.vega(95.0, 1.5), fd, epsilon = 1e-5);
    }

    #[test]
    fn test_theta_matches_finite_difference_in_expiry() {
        let bsm = BlackScholesMerton::new(100.0, 0.3, 0.06, 0.02).unwrap();
        let h = 1e-5;
        for option_type in [OptionType::Call, OptionType::Put] {
            // Theta is minus the derivative with respect to time to expiry
            let fd = (bsm.price(105.0, 1.0 - h, option_type)
                - bsm.price(105.0, 1.0 + h, option_type))
                / (2.0 * h);
            assert_relative_eq!(bsm.theta(105.0, 1.0, option_type), fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_gamma_and_vega_positive() {
        let bsm = futures_model();
        for strike in [60.0, 100.0, 160.0] {
            assert!(bsm.gamma(strike, 0.5) > 0.0);
            assert!(bsm.vega(strike, 0.5) > 0.0);
        }
    }

    #[test]
    fn test_greeks_bundle_matches_individual_methods() {
        let bsm = futures_model();
        let greeks = bsm.greeks(100.0, 0.5, OptionType::Put);
        assert_eq!(greeks.price, bsm.price(100.0, 0.5, OptionType::Put));
        assert_eq!(greeks.delta, bsm.delta(100.0, 0.5, OptionType::Put));
        assert_eq!(greeks.gamma, bsm.gamma(100.0, 0.5));
        assert_eq!(greeks.theta, bsm.theta(100.0, 0.5, OptionType::Put));
        assert_eq!(greeks.vega, bsm.vega(100.0, 0.5));
    }
}
