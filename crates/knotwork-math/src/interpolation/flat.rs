//! Step-function interpolation.
//!
//! - [`BackwardFlat`]: on `[x_i, x_{i+1})` the value is carried backward from
//!   the next knot, `y_{i+1}`. Typical for piecewise-constant forward curves
//!   quoted at the end of each period.
//! - [`ForwardFlat`]: on `[x_i, x_{i+1})` the value is carried forward from
//!   the previous knot, `y_i`.
//!
//! Both hold the boundary value when extrapolating and integrate exactly
//! with the rectangle rule.

use crate::error::MathResult;
use crate::interpolation::samples::Samples;
use crate::interpolation::Interpolator;

/// Backward-flat (right-continuous from the next knot) interpolation.
///
/// # Example
///
/// ```rust
/// use knotwork_math::interpolation::{BackwardFlat, Interpolator};
///
/// let interp = BackwardFlat::new(vec![0.0, 1.0, 2.0], vec![5.0, 4.0, 3.0]).unwrap();
/// assert_eq!(interp.value(1.5).unwrap(), 3.0);
/// assert_eq!(interp.value(1.0).unwrap(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct BackwardFlat {
    samples: Samples,
    primitive_const: Vec<f64>,
}

impl BackwardFlat {
    /// Creates a backward-flat interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, lengths differ, or
    /// x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let samples = Samples::new(xs, ys, 2)?;
        let primitive_const = running_sum(&samples, 1);
        Ok(Self {
            samples,
            primitive_const,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.samples.set_extrapolation(true);
        self
    }
}

impl Interpolator for BackwardFlat {
    fn value(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        let (xs, ys) = (self.samples.xs(), self.samples.ys());
        if x <= xs[0] {
            return Ok(ys[0]);
        }
        let i = self.samples.locate(x);
        if x == xs[i] {
            Ok(ys[i])
        } else {
            Ok(ys[i + 1])
        }
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(0.0)
    }

    fn second_derivative(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(0.0)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(step_primitive(&self.samples, &self.primitive_const, x, 1))
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

/// Forward-flat (left-continuous from the previous knot) interpolation.
///
/// # Example
///
/// ```rust
/// use knotwork_math::interpolation::{ForwardFlat, Interpolator};
///
/// let interp = ForwardFlat::new(vec![0.0, 1.0, 2.0], vec![5.0, 4.0, 3.0]).unwrap();
/// assert_eq!(interp.value(1.5).unwrap(), 4.0);
/// assert_eq!(interp.value(2.0).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct ForwardFlat {
    samples: Samples,
    primitive_const: Vec<f64>,
}

impl ForwardFlat {
    /// Creates a forward-flat interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, lengths differ, or
    /// x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let samples = Samples::new(xs, ys, 2)?;
        let primitive_const = running_sum(&samples, 0);
        Ok(Self {
            samples,
            primitive_const,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.samples.set_extrapolation(true);
        self
    }
}

impl Interpolator for ForwardFlat {
    fn value(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        let ys = self.samples.ys();
        if x >= self.samples.max_x() {
            return Ok(ys[ys.len() - 1]);
        }
        Ok(ys[self.samples.locate(x)])
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(0.0)
    }

    fn second_derivative(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(0.0)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(step_primitive(&self.samples, &self.primitive_const, x, 0))
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

/// Integral from x[0] to each knot, with interval `i` taking the height
/// `y[i + offset]`.
fn running_sum(samples: &Samples, offset: usize) -> Vec<f64> {
    let (xs, ys) = (samples.xs(), samples.ys());
    let mut sums = Vec::with_capacity(xs.len());
    sums.push(0.0);
    for i in 1..xs.len() {
        sums.push(sums[i - 1] + (xs[i] - xs[i - 1]) * ys[i - 1 + offset]);
    }
    sums
}

/// Integral from x[0] to `x` of the step function built by [`running_sum`].
///
/// Outside the knots the integrand is the held boundary value, matching
/// what `value` returns there.
fn step_primitive(samples: &Samples, sums: &[f64], x: f64, offset: usize) -> f64 {
    let (xs, ys) = (samples.xs(), samples.ys());
    let last = xs.len() - 1;
    if x < xs[0] {
        (x - xs[0]) * ys[0]
    } else if x > xs[last] {
        sums[last] + (x - xs[last]) * ys[last]
    } else {
        let i = samples.locate(x);
        sums[i] + (x - xs[i]) * ys[i + offset]
    }
}
