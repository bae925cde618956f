//! Error types for the Knotwork core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, market-data cells and instrument descriptions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A quote was read before any value was set.
    #[error("Empty quote: no value has been set")]
    EmptyQuote,

    /// A handle was dereferenced while not linked to anything.
    #[error("Empty handle: not linked to any object")]
    EmptyHandle,

    /// Invalid payoff specification.
    #[error("Invalid payoff: {reason}")]
    InvalidPayoff {
        /// Description of what's invalid.
        reason: String,
    },

    /// Invalid exercise schedule.
    #[error("Invalid exercise: {reason}")]
    InvalidExercise {
        /// Description of what's invalid.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid payoff error.
    #[must_use]
    pub fn invalid_payoff(reason: impl Into<String>) -> Self {
        Self::InvalidPayoff {
            reason: reason.into(),
        }
    }

    /// Creates an invalid exercise error.
    #[must_use]
    pub fn invalid_exercise(reason: impl Into<String>) -> Self {
        Self::InvalidExercise {
            reason: reason.into(),
        }
    }
}
