//! Error types for curve construction and configuration.

use knotwork_core::{CoreError, Date};
use knotwork_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Fitting or evaluating the interpolant failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// A quote or handle could not be read.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The interpolation settings are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pillar times and quotes differ in number.
    #[error("Mismatched pillars: {times} times but {quotes} quotes")]
    MismatchedPillars {
        /// Number of pillar times.
        times: usize,
        /// Number of quotes.
        quotes: usize,
    },

    /// A pillar date falls before the curve's reference date.
    #[error("Pillar {date} is before the reference date {reference}")]
    PillarBeforeReference {
        /// The offending pillar.
        date: Date,
        /// The curve's reference date.
        reference: Date,
    },

    /// A date query was made on a curve built from times only.
    #[error("Curve has no reference date")]
    NoReferenceDate,

    /// The curve has not been fitted yet.
    #[error("Curve has no fitted interpolant")]
    NotFitted,
}

impl CurveError {
    /// True if the query fell outside the curve and extrapolation is off.
    #[must_use]
    pub fn is_extrapolation(&self) -> bool {
        matches!(self, Self::Math(err) if err.is_extrapolation())
    }
}

/// Configuration error types.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "{}: {} (rule: {})", self.field, self.message, rule),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::Deserialization(err.to_string())
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}
