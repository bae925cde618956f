//! Curves interpolated over observable quotes.
//!
//! An [`InterpolatedCurve`] holds one quote handle per pillar. It registers
//! itself as an observer of every handle; a notification only marks the curve
//! dirty, and the next query reads the quotes and refits the interpolator.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use knotwork_core::observable::{Handle, Quote, SimpleQuote};
//! use knotwork_curves::{InterpolatedCurve, InterpolationConfig};
//!
//! let quotes: Vec<Arc<SimpleQuote>> =
//!     [0.02, 0.025, 0.03].iter().map(|&r| Arc::new(SimpleQuote::new(r))).collect();
//! let handles: Vec<Handle<dyn Quote>> = quotes
//!     .iter()
//!     .map(|q| Handle::<dyn Quote>::new(q.clone()))
//!     .collect();
//!
//! let curve =
//!     InterpolatedCurve::new(vec![1.0, 2.0, 3.0], handles, InterpolationConfig::default())
//!         .unwrap();
//! assert!((curve.value(1.5).unwrap() - 0.0225).abs() < 1e-12);
//!
//! // Moving a quote refits on the next query.
//! quotes[0].set_value(0.01);
//! assert!(curve.is_dirty());
//! assert!((curve.value(1.5).unwrap() - 0.0175).abs() < 1e-12);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use knotwork_core::observable::{Handle, Observable, Observed, Observer, Quote, SimpleQuote};
use knotwork_core::{CoreResult, Date, Settings};
use knotwork_math::interpolation::Interpolator;
use knotwork_math::{MathError, MathResult};

use crate::config::InterpolationConfig;
use crate::error::{CurveError, CurveResult, Validate};

// =============================================================================
// SHARED STATE
// =============================================================================

/// State shared between a curve, its clones and the quotes it observes.
struct CurveState {
    reference_date: Option<Date>,
    times: Vec<f64>,
    quotes: Vec<Handle<dyn Quote>>,
    config: InterpolationConfig,
    /// Set by quote notifications; cleared by a successful refit.
    dirty: AtomicBool,
    interpolator: RwLock<Option<Box<dyn Interpolator>>>,
    fits: AtomicU64,
    observable: Observable,
}

impl CurveState {
    fn quote_values(&self) -> CoreResult<Vec<f64>> {
        self.quotes
            .iter()
            .map(|handle| handle.current_link()?.value())
            .collect()
    }

    fn fit(&self) -> CurveResult<Box<dyn Interpolator>> {
        let values = self.quote_values()?;
        let interpolator = self.config.build(self.times.clone(), values)?;
        log::debug!(
            "Fitted {} curve over {} pillars",
            self.config.method,
            self.times.len()
        );
        Ok(interpolator)
    }

    fn refresh(&self) -> CurveResult<()> {
        if !self.dirty.load(Ordering::SeqCst) {
            return Ok(());
        }

        let mut slot = self.interpolator.write();
        // Another reader may have refitted while we waited for the lock.
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        match self.fit() {
            Ok(interpolator) => {
                *slot = Some(interpolator);
                self.fits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Err(err) => {
                self.dirty.store(true, Ordering::SeqCst);
                log::warn!("Curve refit failed: {err}");
                Err(err)
            }
        }
    }
}

impl Observer for CurveState {
    fn update(&self) {
        let was_dirty = self.dirty.swap(true, Ordering::SeqCst);
        if !was_dirty {
            log::debug!("Curve marked dirty by quote notification");
        }
        self.observable.notify_observers();
    }
}

// =============================================================================
// INTERPOLATED CURVE
// =============================================================================

/// A curve through observable pillar quotes.
///
/// Clones share the fitted state.
#[derive(Clone)]
pub struct InterpolatedCurve {
    state: Arc<CurveState>,
}

impl InterpolatedCurve {
    /// Creates a curve over pillar times and their quotes.
    ///
    /// The quotes are not read here; the first query fits the curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the lengths differ, the
    /// times are not finite and strictly increasing, or there are fewer
    /// pillars than the method needs.
    pub fn new(
        times: Vec<f64>,
        quotes: Vec<Handle<dyn Quote>>,
        config: InterpolationConfig,
    ) -> CurveResult<Self> {
        Self::build(None, times, quotes, config)
    }

    /// Creates a curve over pillar dates.
    ///
    /// Pillar times are Actual/365 Fixed year fractions from the evaluation
    /// date of `settings`, which becomes the curve's reference date.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::PillarBeforeReference`] for a pillar before the
    /// evaluation date, and otherwise the errors of [`InterpolatedCurve::new`].
    pub fn from_dates(
        settings: &Settings,
        dates: &[Date],
        quotes: Vec<Handle<dyn Quote>>,
        config: InterpolationConfig,
    ) -> CurveResult<Self> {
        let reference = settings.evaluation_date();
        let times = dates
            .iter()
            .map(|&date| {
                if date < reference {
                    Err(CurveError::PillarBeforeReference { date, reference })
                } else {
                    Ok(reference.year_fraction(&date))
                }
            })
            .collect::<CurveResult<Vec<f64>>>()?;
        Self::build(Some(reference), times, quotes, config)
    }

    /// Creates a curve over fixed values.
    ///
    /// Each value is wrapped in its own [`SimpleQuote`].
    ///
    /// # Errors
    ///
    /// Same as [`InterpolatedCurve::new`].
    pub fn from_values(
        times: Vec<f64>,
        values: &[f64],
        config: InterpolationConfig,
    ) -> CurveResult<Self> {
        let quotes = values
            .iter()
            .map(|&v| Handle::<dyn Quote>::new(Arc::new(SimpleQuote::new(v))))
            .collect();
        Self::new(times, quotes, config)
    }

    fn build(
        reference_date: Option<Date>,
        times: Vec<f64>,
        quotes: Vec<Handle<dyn Quote>>,
        config: InterpolationConfig,
    ) -> CurveResult<Self> {
        config.validate_or_error()?;

        if times.len() != quotes.len() {
            return Err(CurveError::MismatchedPillars {
                times: times.len(),
                quotes: quotes.len(),
            });
        }
        check_times(&times, config.required_points())?;

        let state = Arc::new(CurveState {
            reference_date,
            times,
            quotes,
            config,
            dirty: AtomicBool::new(true),
            interpolator: RwLock::new(None),
            fits: AtomicU64::new(0),
            observable: Observable::new(),
        });

        let observer: Arc<dyn Observer> = state.clone();
        for handle in &state.quotes {
            handle.observable().register(&observer);
        }

        Ok(Self { state })
    }

    fn with_interpolator<R>(
        &self,
        query: impl FnOnce(&dyn Interpolator) -> MathResult<R>,
    ) -> CurveResult<R> {
        self.state.refresh()?;
        let slot = self.state.interpolator.read();
        let interpolator = slot.as_deref().ok_or(CurveError::NotFitted)?;
        Ok(query(interpolator)?)
    }

    /// Curve value at time `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if a quote cannot be read, the refit fails, or `t` is
    /// outside the pillars and extrapolation is off.
    pub fn value(&self, t: f64) -> CurveResult<f64> {
        self.with_interpolator(|i| i.value(t))
    }

    /// First derivative at time `t`.
    ///
    /// # Errors
    ///
    /// Same as [`InterpolatedCurve::value`].
    pub fn derivative(&self, t: f64) -> CurveResult<f64> {
        self.with_interpolator(|i| i.derivative(t))
    }

    /// Second derivative at time `t`.
    ///
    /// # Errors
    ///
    /// Same as [`InterpolatedCurve::value`].
    pub fn second_derivative(&self, t: f64) -> CurveResult<f64> {
        self.with_interpolator(|i| i.second_derivative(t))
    }

    /// Integral of the curve from the first pillar to `t`.
    ///
    /// # Errors
    ///
    /// Same as [`InterpolatedCurve::value`].
    pub fn primitive(&self, t: f64) -> CurveResult<f64> {
        self.with_interpolator(|i| i.primitive(t))
    }

    /// Curve value at a date.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NoReferenceDate`] for a curve built from times,
    /// and otherwise the errors of [`InterpolatedCurve::value`].
    pub fn value_at(&self, date: Date) -> CurveResult<f64> {
        let reference = self.state.reference_date.ok_or(CurveError::NoReferenceDate)?;
        self.value(reference.year_fraction(&date))
    }

    /// Pillar times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.state.times
    }

    /// Date that time zero corresponds to, if built from dates.
    #[must_use]
    pub fn reference_date(&self) -> Option<Date> {
        self.state.reference_date
    }

    /// Interpolation settings.
    #[must_use]
    pub fn config(&self) -> &InterpolationConfig {
        &self.state.config
    }

    /// Pillar quote handles.
    #[must_use]
    pub fn quote_handles(&self) -> &[Handle<dyn Quote>] {
        &self.state.quotes
    }

    /// True if the next query will refit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.dirty.load(Ordering::SeqCst)
    }

    /// Number of successful fits so far.
    #[must_use]
    pub fn fit_count(&self) -> u64 {
        self.state.fits.load(Ordering::SeqCst)
    }
}

impl Observed for InterpolatedCurve {
    fn observable(&self) -> &Observable {
        &self.state.observable
    }
}

impl fmt::Debug for InterpolatedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolatedCurve")
            .field("reference_date", &self.state.reference_date)
            .field("times", &self.state.times)
            .field("config", &self.state.config)
            .field("dirty", &self.is_dirty())
            .field("fits", &self.fit_count())
            .finish_non_exhaustive()
    }
}

fn check_times(times: &[f64], required: usize) -> MathResult<()> {
    if times.len() < required {
        return Err(MathError::insufficient_data(required, times.len()));
    }
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "pillar times must be finite, got {t}"
        )));
    }
    if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(format!(
            "pillar times must be strictly increasing: {} at {} follows {}",
            times[i + 1],
            i + 1,
            times[i]
        )));
    }
    Ok(())
}
