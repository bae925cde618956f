//! # Knotwork Curves
//!
//! Curves interpolated over observable market quotes.
//!
//! This crate provides:
//!
//! - **Interpolated Curve**: [`InterpolatedCurve`] over pillar quote handles,
//!   refitted lazily when a quote changes
//! - **Configuration**: Serde-backed [`InterpolationConfig`] with validation
//!
//! ## Quick Start
//!
//! ```rust
//! use knotwork_curves::prelude::*;
//!
//! let config = InterpolationConfig::cubic(CubicConfig::natural(true));
//! let curve = InterpolatedCurve::from_values(
//!     vec![1.0, 2.0, 5.0, 10.0],
//!     &[0.030, 0.032, 0.035, 0.036],
//!     config,
//! )
//! .unwrap();
//!
//! let rate = curve.value(3.0).unwrap();
//! assert!(rate > 0.032 && rate < 0.035);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod curve;
pub mod error;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{CubicConfig, InterpolationConfig, InterpolationMethod};
    pub use crate::curve::InterpolatedCurve;
    pub use crate::error::{
        ConfigError, ConfigResult, CurveError, CurveResult, Validate, ValidationError,
    };
}

pub use config::{CubicConfig, InterpolationConfig, InterpolationMethod};
pub use curve::InterpolatedCurve;
pub use error::{ConfigError, CurveError, CurveResult, Validate};
