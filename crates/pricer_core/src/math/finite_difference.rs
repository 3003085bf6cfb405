//! Central finite differences.
//!
//! Used to validate analytic Greeks numerically. Both schemes are second-order
//! accurate: the truncation error is O(h²) until round-off, which grows like
//! ε/h (first derivative) or ε/h² (second derivative), takes over.
//!
//! The evaluated function is fallible so that bumps leaving the domain of the
//! pricing formula (e.g. a non-positive spot) propagate as errors.

use crate::types::PricingError;

/// Validates a finite-difference step.
///
/// # Errors
/// `PricingError::InvalidInput` if `h` is zero, negative or not finite.
#[inline]
pub fn validate_step(h: f64) -> Result<(), PricingError> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidInput(format!(
            "finite-difference step must be positive and finite: h = {}",
            h
        )))
    }
}

/// Central first difference: (f(x+h) - f(x-h)) / 2h.
///
/// # Arguments
/// * `f` - Function to differentiate
/// * `x` - Evaluation point
/// * `h` - Step (radius of the stencil around `x`)
///
/// # Errors
/// Invalid step, any error from `f`, or a non-finite result.
///
/// # Examples
/// ```
/// use pricer_core::math::finite_difference::central_first_difference;
///
/// let d = central_first_difference(|x| Ok(x.exp()), 0.0, 1e-4).unwrap();
/// assert!((d - 1.0).abs() < 1e-8);
/// ```
pub fn central_first_difference<F>(f: F, x: f64, h: f64) -> Result<f64, PricingError>
where
    F: Fn(f64) -> Result<f64, PricingError>,
{
    validate_step(h)?;
    let up = f(x + h)?;
    let down = f(x - h)?;
    PricingError::ensure_finite((up - down) / (2.0 * h), "central first difference")
}

/// Central second difference: (f(x+h) - 2f(x) + f(x-h)) / h².
///
/// # Errors
/// Invalid step, any error from `f`, or a non-finite result.
///
/// # Examples
/// ```
/// use pricer_core::math::finite_difference::central_second_difference;
///
/// let d2 = central_second_difference(|x| Ok(x * x * x), 2.0, 1e-3).unwrap();
/// assert!((d2 - 12.0).abs() < 1e-5);
/// ```
pub fn central_second_difference<F>(f: F, x: f64, h: f64) -> Result<f64, PricingError>
where
    F: Fn(f64) -> Result<f64, PricingError>,
{
    validate_step(h)?;
    let up = f(x + h)?;
    let mid = f(x)?;
    let down = f(x - h)?;
    PricingError::ensure_finite(
        (up - 2.0 * mid + down) / (h * h),
        "central second difference",
    )
}
