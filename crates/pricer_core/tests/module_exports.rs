//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that finite-difference helpers are accessible via absolute path.
#[test]
fn test_finite_difference_module_exports() {
    use pricer_core::math::finite_difference::central_first_difference;
    use pricer_core::math::finite_difference::central_second_difference;
    use pricer_core::math::finite_difference::validate_step;

    assert!(validate_step(0.5).is_ok());
    let d = central_first_difference(|x| Ok(2.0 * x), 1.0, 0.5).unwrap();
    assert!((d - 2.0).abs() < 1e-12);
    let d2 = central_second_difference(|x| Ok(x * x), 1.0, 0.5).unwrap();
    assert!((d2 - 2.0).abs() < 1e-12);
}

/// Test that the grid builder is accessible via absolute path.
#[test]
fn test_grid_module_exports() {
    use pricer_core::math::grid::mesh;

    let grid = mesh(90.0, 120.0, 5.0).unwrap();
    assert_eq!(grid.len(), 7);
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{GridError, PricingError};
    use pricer_core::types::market::MarketParams;

    let market = MarketParams::new(110.0, 0.1, 0.1, 0.02).unwrap();
    assert_eq!(market.spot(), 110.0);

    let err: PricingError = GridError::InvalidStep { step: 0.0 }.into();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

/// Test that re-exports at the `types` level resolve to the same items.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{MarketParams, PricingError};

    let result = MarketParams::new(-1.0, 0.2, 0.0, 0.0);
    assert!(matches!(result, Err(PricingError::InvalidInput(_))));
}
