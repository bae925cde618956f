//! Domain types.
//!
//! - [`Date`]: Calendar date with Act/365F year fractions

mod date;

pub use date::Date;
