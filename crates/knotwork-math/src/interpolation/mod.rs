//! One-dimensional interpolation.
//!
//! This module provides the interpolants used to turn a set of pillar
//! quotes into a continuous curve.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: Piecewise linear
//! - [`BackwardFlat`]: Piecewise constant, value taken from the next knot
//! - [`ForwardFlat`]: Piecewise constant, value taken from the previous knot
//! - [`CubicInterpolation`]: Piecewise cubic Hermite with a configurable
//!   slope scheme ([`DerivativeApprox`]), end conditions
//!   ([`BoundaryCondition`]) and an optional Hyman monotonicity filter
//!
//! # Choosing an Interpolation Method
//!
//! | Method | Smoothness | Preserves Monotonicity | Use Case |
//! |--------|------------|------------------------|----------|
//! | Linear | C0 | Yes | Quick prototyping |
//! | Backward/Forward Flat | Discontinuous | Yes | Step forward curves, fixings |
//! | Cubic Spline | C2 | No | Smooth curves |
//! | Monotonic Cubic | C1 | **Yes** | Smooth curves without spurious wiggles |
//! | Fritsch-Butland / Kruger / Harmonic | C1 | Yes | Local, shape-preserving |
//!
//! Every interpolant refuses queries outside `[min_x, max_x]` with
//! [`MathError::ExtrapolationNotAllowed`](crate::MathError::ExtrapolationNotAllowed)
//! until extrapolation is enabled.

mod cubic_spline;
mod flat;
mod linear;
mod samples;

pub use cubic_spline::{BoundaryCondition, CubicInterpolation, DerivativeApprox};
pub use flat::{BackwardFlat, ForwardFlat};
pub use linear::LinearInterpolator;

use crate::comparison::within;
use crate::error::MathResult;

/// Trait for one-dimensional interpolants.
///
/// All interpolation methods implement this trait, providing a unified
/// interface for curve construction.
pub trait Interpolator: Send + Sync + std::fmt::Debug {
    /// Returns the interpolated value at x.
    fn value(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the second derivative at x.
    fn second_derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the integral of the interpolant from `min_x` to x.
    fn primitive(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Allows or forbids queries outside the data range.
    fn set_extrapolation(&mut self, allow: bool);

    /// Allows queries outside the data range.
    fn enable_extrapolation(&mut self) {
        self.set_extrapolation(true);
    }

    /// Forbids queries outside the data range.
    fn disable_extrapolation(&mut self) {
        self.set_extrapolation(false);
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range, up to rounding noise
    /// at the end knots.
    fn in_range(&self, x: f64) -> bool {
        within(x, self.min_x(), self.max_x())
    }
}
