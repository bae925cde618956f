//! Interpolation settings for curves, loadable from JSON.

use serde::{Deserialize, Serialize};

use knotwork_math::interpolation::{
    BackwardFlat, BoundaryCondition, CubicInterpolation, DerivativeApprox, ForwardFlat,
    Interpolator, LinearInterpolator,
};
use knotwork_math::MathResult;

use crate::error::{ConfigResult, Validate, ValidationError};

/// Settings of a cubic fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CubicConfig {
    /// Slope estimation scheme.
    pub derivative_approx: DerivativeApprox,
    /// Apply the Hyman monotonicity filter.
    pub monotonic: bool,
    /// Left end condition (global spline only).
    pub left: BoundaryCondition,
    /// Right end condition (global spline only).
    pub right: BoundaryCondition,
}

impl CubicConfig {
    /// Natural spline, optionally monotone-filtered.
    #[must_use]
    pub fn natural(monotonic: bool) -> Self {
        Self {
            derivative_approx: DerivativeApprox::Spline,
            monotonic,
            left: BoundaryCondition::NATURAL,
            right: BoundaryCondition::NATURAL,
        }
    }

    /// Local scheme with its own end formulas.
    #[must_use]
    pub fn local(derivative_approx: DerivativeApprox, monotonic: bool) -> Self {
        Self {
            derivative_approx,
            monotonic,
            ..Self::default()
        }
    }
}

/// Interpolation methods for curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Linear between pillars.
    #[default]
    Linear,

    /// Each interval takes the value at its right pillar.
    BackwardFlat,

    /// Each interval takes the value at its left pillar.
    ForwardFlat,

    /// Piecewise cubic.
    Cubic(CubicConfig),
}

impl InterpolationMethod {
    /// Returns true if this method produces smooth curves.
    #[must_use]
    pub fn is_smooth(&self) -> bool {
        matches!(self, Self::Cubic(_))
    }

    /// Minimum number of pillars the method accepts.
    #[must_use]
    pub fn required_points(&self) -> usize {
        match self {
            Self::Linear | Self::BackwardFlat | Self::ForwardFlat => 2,
            Self::Cubic(cubic) => {
                CubicInterpolation::min_points(cubic.derivative_approx, cubic.left, cubic.right)
            }
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::BackwardFlat => write!(f, "Backward Flat"),
            Self::ForwardFlat => write!(f, "Forward Flat"),
            Self::Cubic(cubic) if cubic.monotonic => {
                write!(f, "Cubic ({}, monotonic)", cubic.derivative_approx)
            }
            Self::Cubic(cubic) => write!(f, "Cubic ({})", cubic.derivative_approx),
        }
    }
}

/// How a curve interpolates between its pillars.
///
/// # Example
///
/// ```rust
/// use knotwork_curves::config::{InterpolationConfig, InterpolationMethod};
///
/// let json = r#"{ "method": "cubic", "monotonic": true, "allow_extrapolation": true }"#;
/// let config = InterpolationConfig::from_json(json).unwrap();
/// assert!(config.allow_extrapolation);
/// assert!(matches!(config.method, InterpolationMethod::Cubic(c) if c.monotonic));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InterpolationConfig {
    /// Interpolation method.
    #[serde(flatten)]
    pub method: InterpolationMethod,
    /// Permit queries outside the pillar range.
    #[serde(default)]
    pub allow_extrapolation: bool,
}

impl InterpolationConfig {
    /// Creates a config for the method with extrapolation disabled.
    #[must_use]
    pub fn new(method: InterpolationMethod) -> Self {
        Self {
            method,
            allow_extrapolation: false,
        }
    }

    /// Cubic config.
    #[must_use]
    pub fn cubic(cubic: CubicConfig) -> Self {
        Self::new(InterpolationMethod::Cubic(cubic))
    }

    /// Enables extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Minimum number of pillars.
    #[must_use]
    pub fn required_points(&self) -> usize {
        self.method.required_points()
    }

    /// Parses a config from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error for malformed JSON, or the validation
    /// errors of the parsed config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Serializes the config to JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Fits an interpolator of the configured kind to the samples.
    ///
    /// # Errors
    ///
    /// Returns the interpolator's construction error.
    pub fn build(&self, xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Box<dyn Interpolator>> {
        let mut interpolator: Box<dyn Interpolator> = match self.method {
            InterpolationMethod::Linear => Box::new(LinearInterpolator::new(xs, ys)?),
            InterpolationMethod::BackwardFlat => Box::new(BackwardFlat::new(xs, ys)?),
            InterpolationMethod::ForwardFlat => Box::new(ForwardFlat::new(xs, ys)?),
            InterpolationMethod::Cubic(cubic) => Box::new(CubicInterpolation::new(
                xs,
                ys,
                cubic.derivative_approx,
                cubic.monotonic,
                cubic.left,
                cubic.right,
            )?),
        };
        interpolator.set_extrapolation(self.allow_extrapolation);
        Ok(interpolator)
    }
}

fn boundary_value(condition: BoundaryCondition) -> Option<f64> {
    match condition {
        BoundaryCondition::FirstDerivative(v) | BoundaryCondition::SecondDerivative(v) => Some(v),
        BoundaryCondition::NotAKnot | BoundaryCondition::Lagrange => None,
    }
}

impl Validate for InterpolationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let InterpolationMethod::Cubic(cubic) = self.method {
            for (field, condition) in [("left", cubic.left), ("right", cubic.right)] {
                if cubic.derivative_approx.is_local() && condition != BoundaryCondition::default()
                {
                    errors.push(ValidationError::with_rule(
                        field,
                        format!(
                            "{} slopes do not take boundary conditions",
                            cubic.derivative_approx
                        ),
                        "local_scheme_boundary",
                    ));
                }
                if boundary_value(condition).is_some_and(|v| !v.is_finite()) {
                    errors.push(ValidationError::with_rule(
                        field,
                        "boundary value must be finite",
                        "finite_value",
                    ));
                }
            }
        }

        errors
    }
}
