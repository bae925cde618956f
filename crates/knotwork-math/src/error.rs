//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Matrix is singular (a zero pivot was met during elimination).
    #[error("Singular matrix: cannot invert")]
    SingularMatrix,

    /// Interpolation point is outside the valid range.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// Minimum valid value.
        min: f64,
        /// Maximum valid value.
        max: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an extrapolation error for a query outside `[min, max]`.
    #[must_use]
    pub fn extrapolation(x: f64, min: f64, max: f64) -> Self {
        Self::ExtrapolationNotAllowed { x, min, max }
    }

    /// Returns true if the error was raised by a query outside the fitted domain.
    #[must_use]
    pub fn is_extrapolation(&self) -> bool {
        matches!(self, Self::ExtrapolationNotAllowed { .. })
    }

    /// Returns true for malformed construction arguments (bad ordering,
    /// mismatched lengths, too few points).
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InsufficientData { .. })
    }
}
