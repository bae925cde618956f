//! Cubic interpolation with configurable end conditions.
//!
//! Every scheme in this module produces a piecewise cubic Hermite polynomial.
//! They differ only in how the slope `t[i]` at each knot is chosen:
//!
//! - [`DerivativeApprox::Spline`] solves the global tridiagonal system that
//!   makes the second derivative continuous (C2), closed by one
//!   [`BoundaryCondition`] at each end.
//! - The local schemes ([`DerivativeApprox::Parabolic`],
//!   [`DerivativeApprox::FritschButland`], [`DerivativeApprox::Kruger`],
//!   [`DerivativeApprox::Harmonic`]) estimate each slope from neighbouring
//!   secants only (C1).
//!
//! Once the slopes are known, the Hyman monotonicity filter may clip them,
//! and each interval `[x_i, x_{i+1}]` is stored as
//!
//! ```text
//! f(x) = y_i + dx * (a_i + dx * (b_i + dx * c_i)),   dx = x - x_i
//! ```

use serde::{Deserialize, Serialize};

use crate::error::MathResult;
use crate::interpolation::samples::Samples;
use crate::interpolation::Interpolator;
use crate::linear_algebra::solve_tridiagonal;

/// End condition applied at one end of a [`DerivativeApprox::Spline`] fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// Third derivative continuous across the first (last) interior knot.
    #[default]
    NotAKnot,
    /// Clamped: the first derivative at the end equals the value.
    FirstDerivative(f64),
    /// The second derivative at the end equals the value (0 = natural).
    SecondDerivative(f64),
    /// End slope taken from the cubic Lagrange polynomial through the four
    /// nearest knots.
    Lagrange,
}

impl BoundaryCondition {
    /// Natural end condition: zero curvature.
    pub const NATURAL: Self = Self::SecondDerivative(0.0);

    /// Minimum number of knots the condition needs.
    #[must_use]
    pub fn required_points(&self) -> usize {
        match self {
            Self::NotAKnot => 3,
            Self::Lagrange => 4,
            Self::FirstDerivative(_) | Self::SecondDerivative(_) => 2,
        }
    }
}

impl std::fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAKnot => write!(f, "not-a-knot"),
            Self::FirstDerivative(v) => write!(f, "first derivative = {v}"),
            Self::SecondDerivative(v) => write!(f, "second derivative = {v}"),
            Self::Lagrange => write!(f, "Lagrange"),
        }
    }
}

/// How the knot slopes are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeApprox {
    /// Global C2 spline (tridiagonal solve).
    #[default]
    Spline,
    /// Slope of the parabola through three consecutive knots.
    Parabolic,
    /// Fritsch-Butland weighted harmonic mean, monotone-preserving.
    FritschButland,
    /// Kruger harmonic mean with sign check.
    Kruger,
    /// Distance-weighted harmonic mean with sign check.
    Harmonic,
}

impl DerivativeApprox {
    /// Returns true for schemes that only look at neighbouring secants.
    #[must_use]
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Spline)
    }
}

impl std::fmt::Display for DerivativeApprox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Spline => "Spline",
            Self::Parabolic => "Parabolic",
            Self::FritschButland => "Fritsch-Butland",
            Self::Kruger => "Kruger",
            Self::Harmonic => "Harmonic",
        };
        write!(f, "{name}")
    }
}

/// Piecewise cubic interpolation.
///
/// Construction validates the samples and fits the curve; after changing the
/// y values through [`CubicInterpolation::y_values_mut`] call
/// [`CubicInterpolation::update`] to refit.
///
/// # Example
///
/// ```rust
/// use knotwork_math::interpolation::{BoundaryCondition, CubicInterpolation, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 8.0, 27.0];
///
/// // Clamped spline with the exact end slopes of x^3 reproduces the cubic.
/// let spline = CubicInterpolation::clamped(xs, ys, 0.0, 27.0).unwrap();
/// assert!((spline.value(1.5).unwrap() - 3.375).abs() < 1e-12);
/// assert!((spline.derivative(3.0).unwrap() - 27.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CubicInterpolation {
    samples: Samples,
    derivative_approx: DerivativeApprox,
    monotonic: bool,
    left: BoundaryCondition,
    right: BoundaryCondition,
    /// Linear coefficients (knot slopes) per interval
    a: Vec<f64>,
    /// Quadratic coefficients per interval
    b: Vec<f64>,
    /// Cubic coefficients per interval
    c: Vec<f64>,
    /// Integral from x[0] to x[i]
    primitive_const: Vec<f64>,
    monotonicity_adjustments: Vec<bool>,
}

impl CubicInterpolation {
    /// Creates and fits a cubic interpolation.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    /// * `derivative_approx` - Slope estimation scheme
    /// * `monotonic` - Apply the Hyman monotonicity filter to the slopes
    /// * `left`, `right` - End conditions (used by [`DerivativeApprox::Spline`] only)
    ///
    /// # Errors
    ///
    /// Returns an error if the samples are malformed or there are too few
    /// points for the requested end conditions.
    pub fn new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        derivative_approx: DerivativeApprox,
        monotonic: bool,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> MathResult<Self> {
        let samples = Samples::new(xs, ys, required_points(derivative_approx, left, right))?;

        if derivative_approx.is_local()
            && (left != BoundaryCondition::default() || right != BoundaryCondition::default())
        {
            log::warn!(
                "{} slopes use their own end formulas; boundary conditions ({}, {}) are ignored",
                derivative_approx,
                left,
                right
            );
        }

        let intervals = samples.len() - 1;
        let mut spline = Self {
            samples,
            derivative_approx,
            monotonic,
            left,
            right,
            a: vec![0.0; intervals],
            b: vec![0.0; intervals],
            c: vec![0.0; intervals],
            primitive_const: vec![0.0; intervals],
            monotonicity_adjustments: Vec::new(),
        };
        spline.update()?;
        Ok(spline)
    }

    /// Natural cubic spline (zero curvature at both ends).
    pub fn natural(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Self::new(
            xs,
            ys,
            DerivativeApprox::Spline,
            false,
            BoundaryCondition::NATURAL,
            BoundaryCondition::NATURAL,
        )
    }

    /// Natural cubic spline with the Hyman monotonicity filter.
    pub fn monotonic_natural(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Self::new(
            xs,
            ys,
            DerivativeApprox::Spline,
            true,
            BoundaryCondition::NATURAL,
            BoundaryCondition::NATURAL,
        )
    }

    /// Not-a-knot cubic spline.
    pub fn not_a_knot(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Self::new(
            xs,
            ys,
            DerivativeApprox::Spline,
            false,
            BoundaryCondition::NotAKnot,
            BoundaryCondition::NotAKnot,
        )
    }

    /// Clamped cubic spline with the given end slopes.
    pub fn clamped(
        xs: Vec<f64>,
        ys: Vec<f64>,
        left_slope: f64,
        right_slope: f64,
    ) -> MathResult<Self> {
        Self::new(
            xs,
            ys,
            DerivativeApprox::Spline,
            false,
            BoundaryCondition::FirstDerivative(left_slope),
            BoundaryCondition::FirstDerivative(right_slope),
        )
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.samples.set_extrapolation(true);
        self
    }

    /// Minimum number of knots [`CubicInterpolation::new`] accepts for these settings.
    #[must_use]
    pub fn min_points(
        derivative_approx: DerivativeApprox,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> usize {
        required_points(derivative_approx, left, right).max(2)
    }

    /// Refits the curve from the current samples.
    ///
    /// Replaces the stored coefficients; nothing else changes.
    pub fn update(&mut self) -> MathResult<()> {
        let xs = self.samples.xs();
        let ys = self.samples.ys();
        let n = xs.len();

        let dx: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let s: Vec<f64> = ys
            .windows(2)
            .zip(&dx)
            .map(|(w, h)| (w[1] - w[0]) / h)
            .collect();

        let mut slopes = match self.derivative_approx {
            DerivativeApprox::Spline => spline_slopes(xs, ys, &dx, &s, self.left, self.right)?,
            scheme => local_slopes(scheme, &dx, &s),
        };

        self.monotonicity_adjustments = if self.monotonic {
            hyman_filter(&mut slopes, &dx, &s)
        } else {
            vec![false; n]
        };

        for i in 0..n - 1 {
            self.a[i] = slopes[i];
            self.b[i] = (3.0 * s[i] - slopes[i + 1] - 2.0 * slopes[i]) / dx[i];
            self.c[i] = (slopes[i + 1] + slopes[i] - 2.0 * s[i]) / (dx[i] * dx[i]);
        }

        self.primitive_const[0] = 0.0;
        for i in 1..n - 1 {
            let h = dx[i - 1];
            self.primitive_const[i] = self.primitive_const[i - 1]
                + h * (ys[i - 1]
                    + h * (self.a[i - 1] / 2.0 + h * (self.b[i - 1] / 3.0 + h * self.c[i - 1] / 4.0)));
        }

        log::debug!(
            "fitted {} cubic on {} knots (monotonic: {}, adjusted: {})",
            self.derivative_approx,
            n,
            self.monotonic,
            self.monotonicity_adjustments.iter().filter(|&&adj| adj).count()
        );

        Ok(())
    }

    /// Mutable access to the y values. Call [`Self::update`] afterwards.
    pub fn y_values_mut(&mut self) -> &mut [f64] {
        self.samples.ys_mut()
    }

    /// Replaces the y values and refits.
    pub fn set_y_values(&mut self, ys: Vec<f64>) -> MathResult<()> {
        self.samples.replace_ys(ys)?;
        self.update()
    }

    /// The knot abscissae.
    pub fn x_values(&self) -> &[f64] {
        self.samples.xs()
    }

    /// The knot ordinates.
    pub fn y_values(&self) -> &[f64] {
        self.samples.ys()
    }

    /// Linear coefficient (knot slope) of each interval.
    pub fn a_coefficients(&self) -> &[f64] {
        &self.a
    }

    /// Quadratic coefficient of each interval.
    pub fn b_coefficients(&self) -> &[f64] {
        &self.b
    }

    /// Cubic coefficient of each interval (one sixth of the third derivative).
    pub fn c_coefficients(&self) -> &[f64] {
        &self.c
    }

    /// Integral of the curve from the first knot to the left knot of each interval.
    pub fn primitive_constants(&self) -> &[f64] {
        &self.primitive_const
    }

    /// One flag per knot, set where the monotonicity filter changed the slope.
    pub fn monotonicity_adjustments(&self) -> &[bool] {
        &self.monotonicity_adjustments
    }

    /// The slope estimation scheme.
    pub fn derivative_approx(&self) -> DerivativeApprox {
        self.derivative_approx
    }

    /// Whether the monotonicity filter is applied.
    pub fn is_monotonic(&self) -> bool {
        self.monotonic
    }

    /// The `(left, right)` end conditions.
    pub fn boundary_conditions(&self) -> (BoundaryCondition, BoundaryCondition) {
        (self.left, self.right)
    }

    /// Brackets `x` and returns the interval index and the offset from its left knot.
    fn bracket(&self, x: f64) -> MathResult<(usize, f64)> {
        self.samples.check_range(x)?;
        let i = self.samples.locate(x);
        Ok((i, x - self.samples.xs()[i]))
    }
}

impl Interpolator for CubicInterpolation {
    fn value(&self, x: f64) -> MathResult<f64> {
        let (i, dx) = self.bracket(x)?;
        Ok(self.samples.ys()[i] + dx * (self.a[i] + dx * (self.b[i] + dx * self.c[i])))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        let (i, dx) = self.bracket(x)?;
        Ok(self.a[i] + (2.0 * self.b[i] + 3.0 * self.c[i] * dx) * dx)
    }

    fn second_derivative(&self, x: f64) -> MathResult<f64> {
        let (i, dx) = self.bracket(x)?;
        Ok(2.0 * self.b[i] + 6.0 * self.c[i] * dx)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        let (i, dx) = self.bracket(x)?;
        Ok(self.primitive_const[i]
            + dx * (self.samples.ys()[i]
                + dx * (self.a[i] / 2.0 + dx * (self.b[i] / 3.0 + dx * self.c[i] / 4.0))))
    }

    fn allows_extrapolation(&self) -> bool {
        self.samples.allows_extrapolation()
    }

    fn set_extrapolation(&mut self, allow: bool) {
        self.samples.set_extrapolation(allow);
    }

    fn min_x(&self) -> f64 {
        self.samples.min_x()
    }

    fn max_x(&self) -> f64 {
        self.samples.max_x()
    }
}

/// Minimum number of knots for a scheme and its end conditions.
///
/// Not-a-knot at both ends on three knots imposes the same condition twice,
/// so that combination needs a fourth knot.
fn required_points(
    derivative_approx: DerivativeApprox,
    left: BoundaryCondition,
    right: BoundaryCondition,
) -> usize {
    if derivative_approx.is_local() {
        return 2;
    }
    if left == BoundaryCondition::NotAKnot && right == BoundaryCondition::NotAKnot {
        return 4;
    }
    left.required_points().max(right.required_points())
}

/// Solves the C2 continuity system for the knot slopes.
fn spline_slopes(
    xs: &[f64],
    ys: &[f64],
    dx: &[f64],
    s: &[f64],
    left: BoundaryCondition,
    right: BoundaryCondition,
) -> MathResult<Vec<f64>> {
    let n = xs.len();
    let mut lower = vec![0.0; n - 1];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n - 1];
    let mut rhs = vec![0.0; n];

    for i in 1..n - 1 {
        lower[i - 1] = dx[i];
        diag[i] = 2.0 * (dx[i] + dx[i - 1]);
        upper[i] = dx[i - 1];
        rhs[i] = 3.0 * (dx[i] * s[i - 1] + dx[i - 1] * s[i]);
    }

    match left {
        BoundaryCondition::NotAKnot => {
            diag[0] = dx[1] * (dx[1] + dx[0]);
            upper[0] = (dx[0] + dx[1]) * (dx[0] + dx[1]);
            rhs[0] = s[0] * dx[1] * (2.0 * dx[1] + 3.0 * dx[0]) + s[1] * dx[0] * dx[0];
        }
        BoundaryCondition::FirstDerivative(value) => {
            diag[0] = 1.0;
            upper[0] = 0.0;
            rhs[0] = value;
        }
        BoundaryCondition::SecondDerivative(value) => {
            diag[0] = 2.0;
            upper[0] = 1.0;
            rhs[0] = 3.0 * s[0] - value * dx[0] / 2.0;
        }
        BoundaryCondition::Lagrange => {
            diag[0] = 1.0;
            upper[0] = 0.0;
            rhs[0] = lagrange_derivative(&xs[..4], &ys[..4], xs[0]);
        }
    }

    match right {
        BoundaryCondition::NotAKnot => {
            let (h1, h2) = (dx[n - 3], dx[n - 2]);
            lower[n - 2] = -(h2 + h1) * (h2 + h1);
            diag[n - 1] = -h1 * (h1 + h2);
            rhs[n - 1] = -s[n - 3] * h2 * h2 - s[n - 2] * h1 * (3.0 * h2 + 2.0 * h1);
        }
        BoundaryCondition::FirstDerivative(value) => {
            lower[n - 2] = 0.0;
            diag[n - 1] = 1.0;
            rhs[n - 1] = value;
        }
        BoundaryCondition::SecondDerivative(value) => {
            lower[n - 2] = 1.0;
            diag[n - 1] = 2.0;
            rhs[n - 1] = 3.0 * s[n - 2] + value * dx[n - 2] / 2.0;
        }
        BoundaryCondition::Lagrange => {
            lower[n - 2] = 0.0;
            diag[n - 1] = 1.0;
            rhs[n - 1] = lagrange_derivative(&xs[n - 4..], &ys[n - 4..], xs[n - 1]);
        }
    }

    solve_tridiagonal(&lower, &diag, &upper, &rhs)
}

/// Slopes from neighbouring secants only.
fn local_slopes(scheme: DerivativeApprox, dx: &[f64], s: &[f64]) -> Vec<f64> {
    let n = dx.len() + 1;
    if n == 2 {
        return vec![s[0], s[0]];
    }

    let mut t = vec![0.0; n];
    match scheme {
        DerivativeApprox::Spline => unreachable!("spline slopes come from the global solve"),
        DerivativeApprox::Parabolic => {
            for i in 1..n - 1 {
                t[i] = (dx[i - 1] * s[i] + dx[i] * s[i - 1]) / (dx[i] + dx[i - 1]);
            }
            parabolic_ends(&mut t, dx, s);
        }
        DerivativeApprox::FritschButland => {
            for i in 1..n - 1 {
                if s[i - 1] * s[i] <= 0.0 {
                    t[i] = 0.0;
                } else {
                    let s_min = s[i - 1].min(s[i]);
                    let s_max = s[i - 1].max(s[i]);
                    t[i] = 3.0 * s_min * s_max / (s_max + 2.0 * s_min);
                }
            }
            parabolic_ends(&mut t, dx, s);
        }
        DerivativeApprox::Kruger => {
            for i in 1..n - 1 {
                if s[i - 1] * s[i] <= 0.0 {
                    t[i] = 0.0;
                } else {
                    t[i] = 2.0 / (1.0 / s[i - 1] + 1.0 / s[i]);
                }
            }
            t[0] = (3.0 * s[0] - t[1]) / 2.0;
            t[n - 1] = (3.0 * s[n - 2] - t[n - 2]) / 2.0;
        }
        DerivativeApprox::Harmonic => {
            for i in 1..n - 1 {
                let w1 = 2.0 * dx[i] + dx[i - 1];
                let w2 = dx[i] + 2.0 * dx[i - 1];
                if s[i - 1] * s[i] <= 0.0 {
                    t[i] = 0.0;
                } else {
                    t[i] = (w1 + w2) / (w1 / s[i - 1] + w2 / s[i]);
                }
            }
            parabolic_ends(&mut t, dx, s);
            // Keep the end slopes consistent with the end secants.
            if t[0] * s[0] < 0.0 {
                t[0] = 0.0;
            } else if s[0] * s[1] < 0.0 && t[0].abs() > (3.0 * s[0]).abs() {
                t[0] = 3.0 * s[0];
            }
            if t[n - 1] * s[n - 2] < 0.0 {
                t[n - 1] = 0.0;
            } else if s[n - 2] * s[n - 3] < 0.0 && t[n - 1].abs() > (3.0 * s[n - 2]).abs() {
                t[n - 1] = 3.0 * s[n - 2];
            }
        }
    }
    t
}

/// Three-point one-sided end slopes.
fn parabolic_ends(t: &mut [f64], dx: &[f64], s: &[f64]) {
    let n = t.len();
    t[0] = ((2.0 * dx[0] + dx[1]) * s[0] - dx[0] * s[1]) / (dx[0] + dx[1]);
    t[n - 1] = ((2.0 * dx[n - 2] + dx[n - 3]) * s[n - 2] - dx[n - 2] * s[n - 3])
        / (dx[n - 2] + dx[n - 3]);
}

/// Hyman monotonicity filter (non-restrictive Dougherty-Edelman-Hyman form).
///
/// Clips each slope so the Hermite cubic on the adjacent intervals cannot
/// overshoot monotone data. Returns one flag per knot marking the slopes
/// that were changed.
fn hyman_filter(t: &mut [f64], dx: &[f64], s: &[f64]) -> Vec<bool> {
    let n = t.len();
    let mut adjusted = vec![false; n];

    for i in 0..n {
        let correction = if i == 0 || i == n - 1 {
            let secant = if i == 0 { s[0] } else { s[n - 2] };
            if t[i] * secant > 0.0 {
                t[i].signum() * t[i].abs().min((3.0 * secant).abs())
            } else {
                0.0
            }
        } else {
            let pm = (s[i - 1] * dx[i] + s[i] * dx[i - 1]) / (dx[i - 1] + dx[i]);
            let mut m = 3.0 * s[i - 1].abs().min(s[i].abs()).min(pm.abs());

            if i > 1 && (s[i - 1] - s[i - 2]) * (s[i] - s[i - 1]) > 0.0 {
                let pd = (s[i - 1] * (2.0 * dx[i - 1] + dx[i - 2]) - s[i - 2] * dx[i - 1])
                    / (dx[i - 2] + dx[i - 1]);
                if pm * pd > 0.0 && pm * (s[i - 1] - s[i - 2]) > 0.0 {
                    m = m.max(1.5 * pm.abs().min(pd.abs()));
                }
            }
            if i < n - 2 && (s[i] - s[i - 1]) * (s[i + 1] - s[i]) > 0.0 {
                let pu = (s[i] * (2.0 * dx[i] + dx[i + 1]) - s[i + 1] * dx[i])
                    / (dx[i] + dx[i + 1]);
                if pm * pu > 0.0 && -pm * (s[i] - s[i - 1]) > 0.0 {
                    m = m.max(1.5 * pm.abs().min(pu.abs()));
                }
            }

            if t[i] * pm > 0.0 {
                t[i].signum() * t[i].abs().min(m)
            } else {
                0.0
            }
        };

        if correction != t[i] {
            log::trace!("monotonicity filter: slope at knot {} {} -> {}", i, t[i], correction);
            t[i] = correction;
            adjusted[i] = true;
        }
    }

    adjusted
}

/// Derivative at `x` of the cubic through the four points `(xs[k], ys[k])`.
fn lagrange_derivative(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let mut result = 0.0;
    for i in 0..4 {
        let denominator: f64 = (0..4).filter(|&j| j != i).map(|j| xs[i] - xs[j]).product();
        let numerator: f64 = (0..4)
            .filter(|&k| k != i)
            .map(|k| {
                (0..4)
                    .filter(|&j| j != i && j != k)
                    .map(|j| x - xs[j])
                    .product::<f64>()
            })
            .sum();
        result += ys[i] * numerator / denominator;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::error::MathError;

    fn cubic(x: f64) -> f64 {
        x * x * x - 2.0 * x * x + 0.5 * x + 1.0
    }

    fn cubic_slope(x: f64) -> f64 {
        3.0 * x * x - 4.0 * x + 0.5
    }

    fn cubic_curvature(x: f64) -> f64 {
        6.0 * x - 4.0
    }

    fn cubic_data() -> (Vec<f64>, Vec<f64>) {
        let xs = vec![-1.0, -0.2, 0.5, 1.5, 2.0, 3.1];
        let ys = xs.iter().map(|&x| cubic(x)).collect();
        (xs, ys)
    }

    #[test]
    fn test_cubic_spline_through_points() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let spline = CubicInterpolation::natural(xs.clone(), ys.clone()).unwrap();

        // Should pass through all data points
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.value(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_every_end_condition_reproduces_a_cubic() {
        let (xs, ys) = cubic_data();
        let (x0, xn) = (xs[0], xs[xs.len() - 1]);

        let conditions = [
            (BoundaryCondition::NotAKnot, BoundaryCondition::NotAKnot),
            (
                BoundaryCondition::FirstDerivative(cubic_slope(x0)),
                BoundaryCondition::FirstDerivative(cubic_slope(xn)),
            ),
            (
                BoundaryCondition::SecondDerivative(cubic_curvature(x0)),
                BoundaryCondition::SecondDerivative(cubic_curvature(xn)),
            ),
            (BoundaryCondition::Lagrange, BoundaryCondition::Lagrange),
            (BoundaryCondition::Lagrange, BoundaryCondition::NotAKnot),
        ];

        for (left, right) in conditions {
            let spline = CubicInterpolation::new(
                xs.clone(),
                ys.clone(),
                DerivativeApprox::Spline,
                false,
                left,
                right,
            )
            .unwrap();

            for k in 0..=40 {
                let x = x0 + (xn - x0) * f64::from(k) / 40.0;
                assert_relative_eq!(spline.value(x).unwrap(), cubic(x), epsilon = 1e-11);
                assert_relative_eq!(spline.derivative(x).unwrap(), cubic_slope(x), epsilon = 1e-10);
                assert_relative_eq!(
                    spline.second_derivative(x).unwrap(),
                    cubic_curvature(x),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_lagrange_derivative_exact_on_cubic() {
        let xs = [0.0, 0.7, 1.1, 2.5];
        let ys: Vec<f64> = xs.iter().map(|&x| cubic(x)).collect();
        for x in [0.0, 0.7, 1.8, 2.5] {
            assert_relative_eq!(lagrange_derivative(&xs, &ys, x), cubic_slope(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_natural_end_curvature() {
        let xs = vec![0.0, 1.0, 3.0, 4.0];
        let ys = vec![0.0, 0.0, 2.0, 2.0];

        let spline = CubicInterpolation::natural(xs.clone(), ys).unwrap();

        // Known second derivatives at the knots for this data set.
        let expected = [0.0, 1.5, -1.5, 0.0];
        for (x, y2) in xs.iter().zip(expected) {
            assert_relative_eq!(spline.second_derivative(*x).unwrap(), y2, epsilon = 1e-13);
        }
    }

    #[test]
    fn test_not_a_knot_third_derivative_continuity() {
        let (xs, ys) = cubic_data();
        let ys: Vec<f64> = ys.iter().zip(&xs).map(|(y, x)| y + (3.0 * x).sin()).collect();

        let spline = CubicInterpolation::not_a_knot(xs, ys).unwrap();
        let c = spline.c_coefficients();
        let n = c.len();

        let scale = c.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        assert!((c[0] - c[1]).abs() < 1e-13 * scale);
        assert!((c[n - 1] - c[n - 2]).abs() < 1e-13 * scale);
    }

    #[test]
    fn test_three_point_not_a_knot_needs_the_other_end_pinned() {
        let xs = vec![0.0, 1.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x * x - x + 1.0).collect();

        assert!(matches!(
            CubicInterpolation::not_a_knot(xs.clone(), ys.clone()),
            Err(MathError::InsufficientData { required: 4, actual: 3 })
        ));

        let spline = CubicInterpolation::new(
            xs,
            ys,
            DerivativeApprox::Spline,
            false,
            BoundaryCondition::NotAKnot,
            BoundaryCondition::FirstDerivative(11.0),
        )
        .unwrap();

        assert_relative_eq!(spline.value(2.0).unwrap(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(spline.second_derivative(0.5).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_point_clamped_spline() {
        let spline = CubicInterpolation::clamped(vec![0.0, 1.0], vec![0.0, 1.0], 0.0, 0.0).unwrap();

        // Smoothstep: 3x^2 - 2x^3
        assert_relative_eq!(spline.value(0.5).unwrap(), 0.5, epsilon = 1e-15);
        assert_relative_eq!(spline.value(0.25).unwrap(), 0.15625, epsilon = 1e-15);
        assert_relative_eq!(spline.derivative(1.0).unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_insufficient_points_for_end_conditions() {
        let xs = vec![0.0, 1.0];
        let ys = vec![0.0, 1.0];

        assert!(CubicInterpolation::not_a_knot(xs.clone(), ys.clone()).is_err());

        let lagrange = CubicInterpolation::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 4.0],
            DerivativeApprox::Spline,
            false,
            BoundaryCondition::Lagrange,
            BoundaryCondition::NATURAL,
        );
        assert!(matches!(
            lagrange,
            Err(MathError::InsufficientData { required: 4, actual: 3 })
        ));

        // Local schemes fall back to the secant on two points.
        let parabolic = CubicInterpolation::new(
            xs,
            ys,
            DerivativeApprox::Parabolic,
            false,
            BoundaryCondition::default(),
            BoundaryCondition::default(),
        )
        .unwrap();
        assert_relative_eq!(parabolic.value(0.3).unwrap(), 0.3, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_input() {
        let err = CubicInterpolation::natural(vec![0.0, 2.0, 1.0], vec![0.0; 3]).unwrap_err();
        assert!(err.is_invalid_input());

        let err = CubicInterpolation::natural(vec![0.0, 1.0, 2.0], vec![0.0; 2]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_cubic_spline_extrapolation_error() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let spline = CubicInterpolation::natural(xs, ys).unwrap();

        assert!(spline.value(-0.5).unwrap_err().is_extrapolation());
        assert!(spline.derivative(3.5).unwrap_err().is_extrapolation());
        assert!(spline.primitive(3.5).is_err());
    }

    #[test]
    fn test_cubic_spline_extrapolation_enabled() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let mut spline = CubicInterpolation::natural(xs, ys).unwrap();
        spline.enable_extrapolation();

        // Extrapolation continues the boundary cubics
        let i = spline.a_coefficients().len() - 1;
        let dx = 3.5 - 2.0;
        let expected = 4.0
            + dx * (spline.a_coefficients()[i]
                + dx * (spline.b_coefficients()[i] + dx * spline.c_coefficients()[i]));
        assert_relative_eq!(spline.value(3.5).unwrap(), expected, epsilon = 1e-14);
        assert!(spline.value(-0.5).is_ok());

        spline.disable_extrapolation();
        assert!(spline.value(3.5).is_err());
    }

    #[test]
    fn test_primitive_matches_running_sum() {
        let (xs, ys) = cubic_data();
        let spline = CubicInterpolation::not_a_knot(xs.clone(), ys).unwrap();

        // Exact on a cubic: integral of the polynomial
        let antiderivative =
            |x: f64| x.powi(4) / 4.0 - 2.0 * x.powi(3) / 3.0 + 0.25 * x * x + x;
        for &x in &[-1.0, -0.5, 0.5, 1.0, 2.7, 3.1] {
            assert_relative_eq!(
                spline.primitive(x).unwrap(),
                antiderivative(x) - antiderivative(xs[0]),
                epsilon = 1e-11
            );
        }

        assert_eq!(spline.primitive(xs[0]).unwrap(), 0.0);
        for (i, &x) in xs.iter().enumerate().take(xs.len() - 1) {
            assert_eq!(spline.primitive(x).unwrap(), spline.primitive_constants()[i]);
        }
    }

    #[test]
    fn test_update_after_changing_samples() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let mut spline = CubicInterpolation::natural(xs.clone(), vec![0.0; 4]).unwrap();
        assert_eq!(spline.value(1.5).unwrap(), 0.0);

        for (y, x) in spline.y_values_mut().iter_mut().zip(&xs) {
            *y = 2.0 * x;
        }
        spline.update().unwrap();
        assert_relative_eq!(spline.value(1.5).unwrap(), 3.0, epsilon = 1e-14);

        spline.set_y_values(vec![1.0; 4]).unwrap();
        assert_relative_eq!(spline.value(2.5).unwrap(), 1.0, epsilon = 1e-15);
        assert!(spline.set_y_values(vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_local_schemes_reproduce_lines() {
        let xs = vec![0.0, 0.5, 1.5, 2.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 1.0 + 2.0 * x).collect();

        for scheme in [
            DerivativeApprox::Parabolic,
            DerivativeApprox::FritschButland,
            DerivativeApprox::Kruger,
            DerivativeApprox::Harmonic,
        ] {
            let interp = CubicInterpolation::new(
                xs.clone(),
                ys.clone(),
                scheme,
                false,
                BoundaryCondition::default(),
                BoundaryCondition::default(),
            )
            .unwrap();
            for x in [0.2, 1.0, 1.7, 3.3] {
                assert_relative_eq!(interp.value(x).unwrap(), 1.0 + 2.0 * x, epsilon = 1e-12);
                assert_relative_eq!(interp.derivative(x).unwrap(), 2.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_local_monotone_schemes_flatten_at_extrema() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 1.0, 0.5, 2.0, 1.5];

        for scheme in [
            DerivativeApprox::FritschButland,
            DerivativeApprox::Kruger,
            DerivativeApprox::Harmonic,
        ] {
            let interp = CubicInterpolation::new(
                xs.clone(),
                ys.clone(),
                scheme,
                false,
                BoundaryCondition::default(),
                BoundaryCondition::default(),
            )
            .unwrap();
            // Data extrema at x = 1, 2, 3 get zero slope
            for i in 1..4 {
                assert_eq!(interp.a_coefficients()[i], 0.0, "{scheme} at knot {i}");
            }
        }
    }

    #[test]
    fn test_hyman_filter_flags_adjusted_knots() {
        // Step-like data: unfiltered spline overshoots on the flat parts
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];

        let plain = CubicInterpolation::natural(xs.clone(), ys.clone()).unwrap();
        let filtered = CubicInterpolation::monotonic_natural(xs, ys).unwrap();

        assert!(plain.monotonicity_adjustments().iter().all(|&adj| !adj));
        assert!(filtered.monotonicity_adjustments().iter().any(|&adj| adj));
        assert!(plain.value(1.5).unwrap() < 0.0);

        let mut prev = filtered.value(0.0).unwrap();
        for k in 1..=100 {
            let v = filtered.value(5.0 * f64::from(k) / 100.0).unwrap();
            assert!(v >= prev - 1e-14, "not monotone at step {k}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn test_boundary_condition_serde() {
        let json = serde_json::to_string(&BoundaryCondition::FirstDerivative(0.5)).unwrap();
        assert_eq!(json, r#"{"type":"first_derivative","value":0.5}"#);

        let bc: BoundaryCondition = serde_json::from_str(r#"{"type":"not_a_knot"}"#).unwrap();
        assert_eq!(bc, BoundaryCondition::NotAKnot);

        let da: DerivativeApprox = serde_json::from_str(r#""fritsch_butland""#).unwrap();
        assert_eq!(da, DerivativeApprox::FritschButland);
    }
}
