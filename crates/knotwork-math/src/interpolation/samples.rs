//! Validated sample storage shared by the one-dimensional interpolators.

use crate::comparison::within;
use crate::error::{MathError, MathResult};

/// An ordered set of `(x, y)` samples.
///
/// Invariants established at construction:
/// - `xs` and `ys` have the same length, at least the interpolator's minimum
/// - `xs` is strictly increasing and finite
#[derive(Debug, Clone)]
pub(crate) struct Samples {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl Samples {
    /// Validates and stores the samples.
    ///
    /// `required` is the minimum number of points the caller can fit.
    pub(crate) fn new(xs: Vec<f64>, ys: Vec<f64>, required: usize) -> MathResult<Self> {
        let required = required.max(2);
        if xs.len() < required {
            return Err(MathError::insufficient_data(required, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().any(|x| !x.is_finite()) {
            return Err(MathError::invalid_input("x values must be finite"));
        }

        // Check that xs are sorted
        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(MathError::invalid_input(format!(
                    "x values must be strictly increasing: x[{}] = {} follows x[{}] = {}",
                    i,
                    xs[i],
                    i - 1,
                    xs[i - 1]
                )));
            }
        }

        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    pub(crate) fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub(crate) fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub(crate) fn ys_mut(&mut self) -> &mut [f64] {
        &mut self.ys
    }

    pub(crate) fn replace_ys(&mut self, ys: Vec<f64>) -> MathResult<()> {
        if ys.len() != self.xs.len() {
            return Err(MathError::invalid_input(format!(
                "expected {} y values, got {}",
                self.xs.len(),
                ys.len()
            )));
        }
        self.ys = ys;
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.xs.len()
    }

    pub(crate) fn min_x(&self) -> f64 {
        self.xs[0]
    }

    pub(crate) fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    pub(crate) fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    pub(crate) fn set_extrapolation(&mut self, allow: bool) {
        self.allow_extrapolation = allow;
    }

    /// Fails with [`MathError::ExtrapolationNotAllowed`] for out-of-range queries
    /// unless extrapolation has been enabled.
    pub(crate) fn check_range(&self, x: f64) -> MathResult<()> {
        if self.allow_extrapolation || within(x, self.min_x(), self.max_x()) {
            Ok(())
        } else {
            Err(MathError::extrapolation(x, self.min_x(), self.max_x()))
        }
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    ///
    /// Points left of the domain map to the first interval, points right of
    /// it (and the last knot itself) to the last one.
    pub(crate) fn locate(&self, x: f64) -> usize {
        let n = self.xs.len();
        if x < self.xs[0] {
            0
        } else if x > self.xs[n - 1] {
            n - 2
        } else {
            self.xs[..n - 1]
                .partition_point(|&xi| xi <= x)
                .saturating_sub(1)
        }
    }
}
