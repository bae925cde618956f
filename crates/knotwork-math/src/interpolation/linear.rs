//! Linear interpolation.

use crate::error::MathResult;
use crate::interpolation::samples::Samples;
use crate::interpolation::Interpolator;

/// Linear interpolation between data points.
///
/// The simplest form of interpolation, connecting consecutive points
/// with straight lines. Extrapolation continues the boundary segment.
///
/// # Example
///
/// ```rust
/// use knotwork_math::interpolation::{LinearInterpolator, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// let y = interp.value(1.5).unwrap();
/// // y = 2.5 (linear interpolation between (1, 1) and (2, 4))
/// assert!((y - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    samples: Samples,
    slopes: Vec<f64>,
    primitive_const: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be sorted in ascending order)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points or if lengths differ.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let samples = Samples::new(xs, ys, 2)?;
        let (xs, ys) = (samples.xs(), samples.ys());

        let n = xs.len();
        let mut slopes = Vec::with_capacity(n - 1);
        let mut primitive_const = Vec::with_capacity(n - 1);
        primitive_const.push(0.0);
        for i in 0..n - 1 {
            let dx = xs[i + 1] - xs[i];
            slopes.push((ys[i + 1] - ys[i]) / dx);
            if i + 1 < n - 1 {
                // Trapezoid rule, exact for a straight segment
                primitive_const.push(primitive_const[i] + 0.5 * dx * (ys[i] + ys[i + 1]));
            }
        }

        Ok(Self {
            samples,
            slopes,
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

impl Interpolator for LinearInterpolator {
    fn value(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        let i = self.samples.locate(x);
        Ok(self.samples.ys()[i] + (x - self.samples.xs()[i]) * self.slopes[i])
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(self.slopes[self.samples.locate(x)])
    }

    fn second_derivative(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        Ok(0.0)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        self.samples.check_range(x)?;
        let i = self.samples.locate(x);
        let dx = x - self.samples.xs()[i];
        Ok(self.primitive_const[i] + dx * (self.samples.ys()[i] + 0.5 * dx * self.slopes[i]))
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
