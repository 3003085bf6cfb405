//! Instrument trait definitions.
//!
//! This module provides the core [`InstrumentTrait`] that every option
//! implements: analytic price, Delta and Gamma, plus finite-difference
//! approximations of Delta and Gamma for validating the analytic values.
//!
//! # Design Philosophy
//!
//! The trait is designed for **static dispatch** through the
//! [`Instrument`](super::Instrument) enum. Instruments own only their
//! contractual terms; market parameters are passed in per call, so every
//! method is a pure function of `&self` and `&MarketParams`.

use pricer_core::math::finite_difference::{
    central_first_difference, central_second_difference, validate_step,
};
use pricer_core::types::{MarketParams, PricingError};

use super::OptionType;

/// Core trait for all option instruments.
///
/// # Required Methods
///
/// - [`option_type`](InstrumentTrait::option_type), [`strike`](InstrumentTrait::strike)
/// - [`price`](InstrumentTrait::price), [`delta`](InstrumentTrait::delta),
///   [`gamma`](InstrumentTrait::gamma)
///
/// # Provided Methods
///
/// - [`approx_delta`](InstrumentTrait::approx_delta): (V(S+h) - V(S-h)) / 2h
/// - [`approx_gamma`](InstrumentTrait::approx_gamma): (V(S+h) - 2V(S) + V(S-h)) / h²
/// - [`delta_approx_error`](InstrumentTrait::delta_approx_error),
///   [`gamma_approx_error`](InstrumentTrait::gamma_approx_error): |analytic - approx|
///
/// # Examples
///
/// ```
/// use pricer_core::types::{MarketParams, PricingError};
/// use pricer_models::instruments::{InstrumentTrait, OptionType};
///
/// /// Linear payoff S - K; both stencils are exact for it.
/// struct Linear {
///     strike: f64,
/// }
///
/// impl InstrumentTrait for Linear {
///     fn option_type(&self) -> OptionType {
///         OptionType::Call
///     }
///     fn strike(&self) -> f64 {
///         self.strike
///     }
///     fn price(&self, market: &MarketParams) -> Result<f64, PricingError> {
///         Ok(market.spot() - self.strike)
///     }
///     fn delta(&self, _market: &MarketParams) -> Result<f64, PricingError> {
///         Ok(1.0)
///     }
///     fn gamma(&self, _market: &MarketParams) -> Result<f64, PricingError> {
///         Ok(0.0)
///     }
/// }
///
/// let market = MarketParams::new(100.0, 0.2, 0.05, 0.05).unwrap();
/// let linear = Linear { strike: 90.0 };
/// assert!(linear.delta_approx_error(&market, 0.5).unwrap() < 1e-12);
/// ```
pub trait InstrumentTrait {
    /// Call or put.
    fn option_type(&self) -> OptionType;

    /// Strike price.
    fn strike(&self) -> f64;

    /// Analytic value.
    fn price(&self, market: &MarketParams) -> Result<f64, PricingError>;

    /// Analytic Delta (∂V/∂S).
    fn delta(&self, market: &MarketParams) -> Result<f64, PricingError>;

    /// Analytic Gamma (∂²V/∂S²).
    fn gamma(&self, market: &MarketParams) -> Result<f64, PricingError>;

    /// Return a human-readable instrument type name.
    ///
    /// Used for logging and error messages.
    fn type_name(&self) -> &'static str {
        "Unknown"
    }

    /// Central-difference Delta with spot bump `h`.
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` if `h <= 0`, `h` is not finite, or `S - h <= 0`
    /// - any pricing error at the bumped spots
    fn approx_delta(&self, market: &MarketParams, h: f64) -> Result<f64, PricingError> {
        check_spot_bump(market, h)?;
        central_first_difference(
            |spot| self.price(&market.with_spot(spot)?),
            market.spot(),
            h,
        )
    }

    /// Central second-difference Gamma with spot bump `h`.
    ///
    /// # Errors
    /// Same as [`approx_delta`](InstrumentTrait::approx_delta).
    fn approx_gamma(&self, market: &MarketParams, h: f64) -> Result<f64, PricingError> {
        check_spot_bump(market, h)?;
        central_second_difference(
            |spot| self.price(&market.with_spot(spot)?),
            market.spot(),
            h,
        )
    }

    /// |delta - approx_delta|, the truncation error of the Delta stencil.
    fn delta_approx_error(&self, market: &MarketParams, h: f64) -> Result<f64, PricingError> {
        Ok((self.delta(market)? - self.approx_delta(market, h)?).abs())
    }

    /// |gamma - approx_gamma|, the truncation error of the Gamma stencil.
    fn gamma_approx_error(&self, market: &MarketParams, h: f64) -> Result<f64, PricingError> {
        Ok((self.gamma(market)? - self.approx_gamma(market, h)?).abs())
    }
}

/// The down-bumped spot must stay inside the pricing domain.
fn check_spot_bump(market: &MarketParams, h: f64) -> Result<(), PricingError> {
    validate_step(h)?;
    if market.spot() - h <= 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "spot bump leaves the domain: S - h = {} - {} <= 0",
            market.spot(),
            h
        )));
    }
    Ok(())
}
