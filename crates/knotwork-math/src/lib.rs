//! # Knotwork Math
//!
//! Numerical building blocks for the Knotwork curve library.
//!
//! This crate provides:
//!
//! - **Interpolation**: Linear, backward/forward flat and cubic interpolants
//!   sharing the [`Interpolator`](interpolation::Interpolator) trait
//! - **Linear Algebra**: Tridiagonal solver used by the spline fit
//! - **Comparison**: Ulp-tolerant floating-point equality
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Careful handling of boundary knots and degenerate data
//! - **Explicit Errors**: Out-of-range queries fail unless extrapolation is enabled

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::single_match_else)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::derivable_impls)]

pub mod comparison;
pub mod error;
pub mod interpolation;
pub mod linear_algebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        BackwardFlat, BoundaryCondition, CubicInterpolation, DerivativeApprox, ForwardFlat,
        Interpolator, LinearInterpolator,
    };
    pub use crate::linear_algebra::solve_tridiagonal;
}

pub use error::{MathError, MathResult};
