//! # Knotwork
//!
//! Curve interpolation for quantitative finance.
//!
//! This crate re-exports the public API of the workspace:
//!
//! - [`knotwork_core`]: evaluation settings, observable quotes and handles, payoffs
//! - [`knotwork_math`]: cubic, linear and flat interpolants
//! - [`knotwork_curves`]: curves interpolated over live quotes
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use knotwork::prelude::*;
//!
//! let quote = Arc::new(SimpleQuote::new(0.030));
//! let handles: Vec<Handle<dyn Quote>> = vec![
//!     Handle::<dyn Quote>::new(Arc::new(SimpleQuote::new(0.020))),
//!     Handle::<dyn Quote>::new(quote.clone()),
//! ];
//! let curve = InterpolatedCurve::new(
//!     vec![1.0, 2.0],
//!     handles,
//!     InterpolationConfig::new(InterpolationMethod::ForwardFlat),
//! )
//! .unwrap();
//! assert_eq!(curve.value(1.5).unwrap(), 0.020);
//!
//! quote.set_value(0.035);
//! assert_eq!(curve.value(2.0).unwrap(), 0.035);
//! ```

#![warn(missing_docs)]

pub use knotwork_core;
pub use knotwork_curves;
pub use knotwork_math;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use knotwork_core::prelude::*;
    pub use knotwork_curves::prelude::*;
    pub use knotwork_math::prelude::*;
}
