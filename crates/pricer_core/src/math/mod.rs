//! Numerical helpers shared by the pricing layers.
//!
//! - [`finite_difference`]: central difference approximations of first and second derivatives
//! - [`grid`]: evenly spaced grids used to drive parameter sweeps

pub mod finite_difference;
pub mod grid;
