//! Perpetual American option pricing.
//!
//! An American option with no expiry has a time-independent value that solves
//! the ODE ½σ²S²V'' + bSV' - rV = 0. Its general solution is a combination of
//! S^y1 and S^y2, where y1 > 0 > y2 are the roots of ½σ²y(y-1) + by - r = 0:
//!
//! - y₁ = (½ - b/σ²) + √((b/σ² - ½)² + 2r/σ²)
//! - y₂ = (½ - b/σ²) - √((b/σ² - ½)² + 2r/σ²)
//!
//! Value matching and smooth pasting at the optimal exercise boundary give
//!
//! **Call**: C = K/(y₁-1) · ((y₁-1)/y₁ · S/K)^y₁, exercised at S* = K·y₁/(y₁-1)
//! **Put**: P = K/(1-y₂) · ((y₂-1)/y₂ · S/K)^y₂, exercised at S* = K·y₂/(y₂-1)
//!
//! The closed form is the value on the continuation region. Once the spot has
//! crossed the boundary the option is worth its intrinsic value.

use pricer_core::types::MarketParams;

use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Perpetual American option model.
///
/// # Domain
/// - A call has a finite optimal exercise only when `b < r` (then `y₁ > 1`).
/// - A put has a finite optimal exercise only when `r > 0` (then `y₂ < 0`).
///
/// Outside that domain every pricing method returns
/// [`AnalyticalError::NoOptimalExercise`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::PerpetualAmerican;
/// use pricer_models::instruments::OptionType;
///
/// let model = PerpetualAmerican::new(110.0, 0.1, 0.1, 0.02).unwrap();
/// let call = model.price(100.0, OptionType::Call).unwrap();
/// let put = model.price(100.0, OptionType::Put).unwrap();
/// assert!(call > 10.0 && put > 0.0);
///
/// // Never optimal to exercise a call early when b >= r
/// let no_dividend = PerpetualAmerican::new(110.0, 0.1, 0.05, 0.05).unwrap();
/// assert!(no_dividend.price(100.0, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerpetualAmerican {
    spot: f64,
    volatility: f64,
    rate: f64,
    carry: f64,
}

impl PerpetualAmerican {
    /// Creates a new perpetual American model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
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

    /// (½ - b/σ²) and √((b/σ² - ½)² + 2r/σ²)
    #[inline]
    fn root_terms(&self) -> (f64, f64) {
        let variance = self.volatility * self.volatility;
        let centre = 0.5 - self.carry / variance;
        let radius = (centre * centre + 2.0 * self.rate / variance).sqrt();
        (centre, radius)
    }

    /// Positive root y₁ of the characteristic equation.
    #[inline]
    pub fn y1(&self) -> f64 {
        let (centre, radius) = self.root_terms();
        centre + radius
    }

    /// Negative root y₂ of the characteristic equation.
    #[inline]
    pub fn y2(&self) -> f64 {
        let (centre, radius) = self.root_terms();
        centre - radius
    }

    /// Returns the characteristic root that governs `option_type`.
    ///
    /// # Errors
    /// `AnalyticalError::NoOptimalExercise` outside the model domain.
    fn exponent(&self, option_type: OptionType) -> Result<f64, AnalyticalError> {
        let in_domain = match option_type {
            OptionType::Call => self.carry < self.rate,
            OptionType::Put => self.rate > 0.0,
        };
        if !in_domain {
            return Err(AnalyticalError::NoOptimalExercise {
                option: option_type.name(),
                rate: self.rate,
                carry: self.carry,
            });
        }

        Ok(match option_type {
            OptionType::Call => self.y1(),
            OptionType::Put => self.y2(),
        })
    }

    /// Optimal exercise boundary S*.
    ///
    /// The call is exercised once `S >= S*`, the put once `S <= S*`.
    ///
    /// # Errors
    /// `AnalyticalError::NoOptimalExercise` outside the model domain.
    pub fn exercise_boundary(
        &self,
        strike: f64,
        option_type: OptionType,
    ) -> Result<f64, AnalyticalError> {
        let y = self.exponent(option_type)?;
        Ok(strike * y / (y - 1.0))
    }

    /// Returns true if the current spot lies in the exercise region.
    fn is_exercised(&self, boundary: f64, option_type: OptionType) -> bool {
        match option_type {
            OptionType::Call => self.spot >= boundary,
            OptionType::Put => self.spot <= boundary,
        }
    }

    /// Computes the option value.
    ///
    /// # Errors
    /// - `AnalyticalError::NoOptimalExercise` outside the model domain
    /// - `AnalyticalError::NumericalInstability` if the power term overflows
    pub fn price(&self, strike: f64, option_type: OptionType) -> Result<f64, AnalyticalError> {
        let y = self.exponent(option_type)?;
        let boundary = strike * y / (y - 1.0);
        if self.is_exercised(boundary, option_type) {
            return Ok(option_type.intrinsic(self.spot, strike));
        }

        // K/|y-1| · ((y-1)/y · S/K)^y, the same expression for both sides
        let scale = strike / (y - 1.0).abs();
        let value = scale * ((y - 1.0) / y * self.spot / strike).powf(y);
        finite(value, "perpetual American price")
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// Delta = y·V/S on the continuation region, ±1 once exercised.
    ///
    /// # Errors
    /// Same as [`price`](Self::price).
    pub fn delta(&self, strike: f64, option_type: OptionType) -> Result<f64, AnalyticalError> {
        let y = self.exponent(option_type)?;
        let boundary = strike * y / (y - 1.0);
        if self.is_exercised(boundary, option_type) {
            return Ok(option_type.sign());
        }

        let value = self.price(strike, option_type)?;
        finite(y * value / self.spot, "perpetual American delta")
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = y(y-1)·V/S² on the continuation region, 0 once exercised.
    /// Positive for both calls (y₁ > 1) and puts (y₂ < 0).
    ///
    /// # Errors
    /// Same as [`price`](Self::price).
    pub fn gamma(&self, strike: f64, option_type: OptionType) -> Result<f64, AnalyticalError> {
        let y = self.exponent(option_type)?;
        let boundary = strike * y / (y - 1.0);
        if self.is_exercised(boundary, option_type) {
            return Ok(0.0);
        }

        let value = self.price(strike, option_type)?;
        finite(
            y * (y - 1.0) * value / (self.spot * self.spot),
            "perpetual American gamma",
        )
    }
}

fn finite(value: f64, quantity: &str) -> Result<f64, AnalyticalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticalError::NumericalInstability {
            message: format!("{} evaluated to {}", quantity, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model(spot: f64) -> PerpetualAmerican {
        PerpetualAmerican::new(spot, 0.1, 0.1, 0.02).unwrap()
    }

    #[test]
    fn test_new_invalid_inputs() {
        assert!(matches!(
            PerpetualAmerican::new(0.0, 0.1, 0.1, 0.02),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            PerpetualAmerican::new(100.0, -0.1, 0.1, 0.02),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_roots_solve_characteristic_equation() {
        let m = model(110.0);
        for y in [m.y1(), m.y2()] {
            let residual = 0.5 * 0.01 * y * (y - 1.0) + 0.02 * y - 0.1;
            assert_relative_eq!(residual, 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(m.y1(), 3.216_990_566, epsilon = 1e-8);
        assert_relative_eq!(m.y2(), -6.216_990_566, epsilon = 1e-8);
    }

    #[test]
    fn test_exercise_boundaries() {
        let m = model(110.0);
        let call_boundary = m.exercise_boundary(100.0, OptionType::Call).unwrap();
        let put_boundary = m.exercise_boundary(100.0, OptionType::Put).unwrap();
        assert!(call_boundary > 110.0);
        assert!(put_boundary < 110.0);
        assert_relative_eq!(call_boundary, 145.1, epsilon = 0.1);
        assert_relative_eq!(put_boundary, 86.14, epsilon = 0.01);
    }

    #[test]
    fn test_value_matching_at_boundary() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let boundary = model(110.0).exercise_boundary(100.0, option_type).unwrap();
            // Approach from the continuation side
            let nudge = -option_type.sign() * 1e-9;
            let at_boundary = model(boundary + nudge);
            let price = at_boundary.price(100.0, option_type).unwrap();
            assert_relative_eq!(
                price,
                option_type.intrinsic(boundary, 100.0),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_smooth_pasting_at_boundary() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let boundary = model(110.0).exercise_boundary(100.0, option_type).unwrap();
            let nudge = -option_type.sign() * 1e-9;
            let delta = model(boundary + nudge).delta(100.0, option_type).unwrap();
            assert_relative_eq!(delta, option_type.sign(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_exercise_region_returns_intrinsic() {
        let deep_call = model(200.0);
        assert_eq!(deep_call.price(100.0, OptionType::Call).unwrap(), 100.0);
        assert_eq!(deep_call.delta(100.0, OptionType::Call).unwrap(), 1.0);
        assert_eq!(deep_call.gamma(100.0, OptionType::Call).unwrap(), 0.0);

        let deep_put = model(50.0);
        assert_eq!(deep_put.price(100.0, OptionType::Put).unwrap(), 50.0);
        assert_eq!(deep_put.delta(100.0, OptionType::Put).unwrap(), -1.0);
        assert_eq!(deep_put.gamma(100.0, OptionType::Put).unwrap(), 0.0);
    }

    #[test]
    fn test_value_exceeds_intrinsic_in_continuation_region() {
        let m = model(110.0);
        let call = m.price(100.0, OptionType::Call).unwrap();
        let put = m.price(100.0, OptionType::Put).unwrap();
        assert!(call > 10.0);
        assert!(put > 0.0);
    }

    #[test]
    fn test_delta_and_gamma_match_finite_difference() {
        let h = 1e-3;
        for option_type in [OptionType::Call, OptionType::Put] {
            let up = model(110.0 + h).price(100.0, option_type).unwrap();
            let mid = model(110.0).price(100.0, option_type).unwrap();
            let down = model(110.0 - h).price(100.0, option_type).unwrap();

            let delta = model(110.0).delta(100.0, option_type).unwrap();
            let gamma = model(110.0).gamma(100.0, option_type).unwrap();
            assert_relative_eq!(delta, (up - down) / (2.0 * h), epsilon = 1e-6);
            assert_relative_eq!(gamma, (up - 2.0 * mid + down) / (h * h), epsilon = 1e-4);
            assert!(gamma > 0.0);
        }
    }

    #[test]
    fn test_call_requires_carry_below_rate() {
        let m = PerpetualAmerican::new(110.0, 0.1, 0.05, 0.05).unwrap();
        let err = m.price(100.0, OptionType::Call).unwrap_err();
        assert!(matches!(err, AnalyticalError::NoOptimalExercise { option: "call", .. }));
        assert!(m.delta(100.0, OptionType::Call).is_err());
        assert!(m.exercise_boundary(100.0, OptionType::Call).is_err());
        // The put is still well-defined
        assert!(m.price(100.0, OptionType::Put).is_ok());
    }

    #[test]
    fn test_put_requires_positive_rate() {
        let m = PerpetualAmerican::new(110.0, 0.1, 0.0, -0.02).unwrap();
        assert!(matches!(
            m.gamma(100.0, OptionType::Put),
            Err(AnalyticalError::NoOptimalExercise { option: "put", .. })
        ));
        assert!(m.price(100.0, OptionType::Call).is_ok());
    }
}
