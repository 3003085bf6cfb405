//! Evenly spaced grids for parameter sweeps.

use crate::types::GridError;

/// Largest number of points [`mesh`] will build.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Builds the grid `start, start + step, ...` up to `end`.
///
/// Points are computed as `start + i * step` (no accumulated drift). If the
/// last regular point falls short of `end`, `end` itself is appended, so the
/// grid always spans the full interval.
///
/// # Errors
/// - `GridError::InvalidStep` if `step` is not strictly positive and finite
/// - `GridError::InvalidBounds` if a bound is not finite or `end < start`
/// - `GridError::TooManyPoints` if the grid would exceed [`MAX_GRID_POINTS`]
///
/// # Examples
/// ```
/// use pricer_core::math::grid::mesh;
///
/// assert_eq!(mesh(5.0, 35.0, 5.0).unwrap(), vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);
/// assert_eq!(mesh(0.0, 1.0, 0.4).unwrap(), vec![0.0, 0.4, 0.8, 1.0]);
/// ```
pub fn mesh(start: f64, end: f64, step: f64) -> Result<Vec<f64>, GridError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(GridError::InvalidStep { step });
    }
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Err(GridError::InvalidBounds { start, end });
    }

    // Tolerate representation error so mesh(0.2, 0.55, 0.05) ends on 0.55
    let tolerance = step * 1e-9;
    let intervals = ((end - start) / step + 1e-9).floor();
    // One regular point per interval, the start, and possibly the end
    let count = intervals + 2.0;
    if !count.is_finite() || count > MAX_GRID_POINTS as f64 {
        return Err(GridError::TooManyPoints {
            points: count,
            max: MAX_GRID_POINTS,
        });
    }
    let intervals = intervals as usize;

    let mut points: Vec<f64> = (0..=intervals)
        .map(|i| start + i as f64 * step)
        .collect();

    let last = points.last().copied().unwrap_or(start);
    if (end - last).abs() <= tolerance {
        if let Some(slot) = points.last_mut() {
            *slot = end;
        }
    } else {
        points.push(end);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_integer_mesh() {
        let grid = mesh(7.0, 12.0, 1.0).unwrap();
        assert_eq!(grid, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_fractional_mesh_ends_exactly() {
        let grid = mesh(0.2, 0.55, 0.05).unwrap();
        assert_eq!(grid.len(), 8);
        assert_relative_eq!(grid[0], 0.2);
        assert_eq!(*grid.last().unwrap(), 0.55);
    }

    #[test]
    fn test_maturity_mesh() {
        let grid = mesh(0.25, 1.75, 0.25).unwrap();
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[6], 1.75);
    }

    #[test]
    fn test_end_appended_when_step_overshoots() {
        let grid = mesh(80.0, 125.0, 10.0).unwrap();
        assert_eq!(grid, vec![80.0, 90.0, 100.0, 110.0, 120.0, 125.0]);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(mesh(3.0, 3.0, 1.0).unwrap(), vec![3.0]);
    }

    #[test]
    fn test_ascending() {
        let grid = mesh(90.0, 120.0, 5.0).unwrap();
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_step() {
        assert_eq!(
            mesh(0.0, 1.0, 0.0),
            Err(GridError::InvalidStep { step: 0.0 })
        );
        assert!(mesh(0.0, 1.0, -0.1).is_err());
        assert!(mesh(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(
            mesh(2.0, 1.0, 0.1),
            Err(GridError::InvalidBounds {
                start: 2.0,
                end: 1.0
            })
        );
        assert!(mesh(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let result = mesh(0.0, 1e12, 1e-9);
        assert!(matches!(
            result,
            Err(GridError::TooManyPoints { max: MAX_GRID_POINTS, .. })
        ));
        assert!(mesh(0.0, f64::MAX, f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn test_grid_at_limit_accepted() {
        let grid = mesh(0.0, 999_998.0, 1.0).unwrap();
        assert_eq!(grid.len(), 999_999);
        assert!(mesh(0.0, 999_999.0, 1.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_mesh_spans_interval(
            start in -100.0f64..100.0,
            span in 0.0f64..100.0,
            step in 0.01f64..10.0,
        ) {
            let end = start + span;
            let grid = mesh(start, end, step).unwrap();
            prop_assert_eq!(grid[0], start);
            prop_assert_eq!(*grid.last().unwrap(), end);
            for w in grid.windows(2) {
                prop_assert!(w[1] > w[0]);
                prop_assert!(w[1] - w[0] <= step * (1.0 + 1e-6));
            }
        }
    }
}
