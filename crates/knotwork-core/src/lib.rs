//! # Knotwork Core
//!
//! Core types and market-data plumbing for the Knotwork curve library.
//!
//! This crate provides the foundational building blocks used throughout Knotwork:
//!
//! - **Types**: `Date` with Act/365F year fractions
//! - **Settings**: An explicit evaluation context with a scoped save/restore guard
//! - **Observable**: Quotes, handles and the observer wiring that lets curves
//!   react to market data changes
//! - **Payoffs**: Option payoffs and exercise schedules as sum types
//!
//! ## Example
//!
//! ```rust
//! use knotwork_core::prelude::*;
//!
//! let settings = Settings::with_evaluation_date(Date::from_ymd(2025, 6, 15).unwrap());
//! let payoff = Payoff::vanilla(OptionType::Call, 100.0).unwrap();
//!
//! assert_eq!(settings.evaluation_date().year(), 2025);
//! assert_eq!(payoff.value(105.0), 5.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod error;
pub mod observable;
pub mod payoff;
pub mod settings;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::observable::{
        Handle, Observable, Observed, Observer, Quote, RelinkableHandle, SimpleQuote,
    };
    pub use crate::payoff::{Exercise, OptionType, Payoff};
    pub use crate::settings::{SavedSettings, Settings};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use settings::{SavedSettings, Settings};
pub use types::Date;
