//! Evaluation context.
//!
//! [`Settings`] holds the evaluation date. It is an ordinary value passed by
//! reference to whatever needs it; there is no process-wide instance.
//!
//! [`SavedSettings`] is a scoped guard: it snapshots a `Settings` on
//! creation, gives mutable access through `Deref`, and puts the snapshot
//! back when dropped.
//!
//! ```rust
//! use knotwork_core::settings::{SavedSettings, Settings};
//! use knotwork_core::types::Date;
//!
//! let mut settings = Settings::default();
//! {
//!     let mut scoped = SavedSettings::new(&mut settings);
//!     scoped.set_evaluation_date(Date::from_ymd(2025, 6, 15).unwrap());
//!     assert!(scoped.has_fixed_evaluation_date());
//! }
//! assert!(!settings.has_fixed_evaluation_date());
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Valuation settings shared by curves and pricers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Fixed evaluation date; `None` means "today".
    #[serde(default)]
    evaluation_date: Option<Date>,
}

impl Settings {
    /// Creates settings pinned to the given evaluation date.
    #[must_use]
    pub fn with_evaluation_date(date: Date) -> Self {
        Self {
            evaluation_date: Some(date),
            ..Self::default()
        }
    }

    /// The evaluation date, falling back to today when none is fixed.
    #[must_use]
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date.unwrap_or_else(Date::today)
    }

    /// Pins the evaluation date.
    pub fn set_evaluation_date(&mut self, date: Date) {
        log::debug!("evaluation date set to {}", date);
        self.evaluation_date = Some(date);
    }

    /// Returns to tracking today's date.
    pub fn reset_evaluation_date(&mut self) {
        self.evaluation_date = None;
    }

    /// True if an explicit evaluation date is set.
    #[must_use]
    pub fn has_fixed_evaluation_date(&self) -> bool {
        self.evaluation_date.is_some()
    }
}

/// Restores a [`Settings`] to its state at construction when dropped.
#[derive(Debug)]
pub struct SavedSettings<'a> {
    settings: &'a mut Settings,
    saved: Settings,
}

impl<'a> SavedSettings<'a> {
    /// Snapshots `settings`; the snapshot is restored on drop.
    pub fn new(settings: &'a mut Settings) -> Self {
        let saved = settings.clone();
        Self { settings, saved }
    }
}

impl Deref for SavedSettings<'_> {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        self.settings
    }
}

impl DerefMut for SavedSettings<'_> {
    fn deref_mut(&mut self) -> &mut Settings {
        self.settings
    }
}

impl Drop for SavedSettings<'_> {
    fn drop(&mut self) {
        *self.settings = std::mem::take(&mut self.saved);
    }
}
