//! Observable market data.
//!
//! Curves and pricers depend on market quotes that change while they are
//! alive. The pieces here wire that dependency:
//!
//! - [`Observable`]: a list of weakly held [`Observer`]s notified on change
//! - [`SimpleQuote`]: a settable value cell
//! - [`Handle`]: a shared, read-only view of an object that may be relinked
//! - [`RelinkableHandle`]: the owner side of a handle, able to swap the target
//!
//! Every handle cloned from the same relinkable handle sees a relink, and
//! observers registered with the handle hear about both relinks and changes
//! in the current target.
//!
//! ```rust
//! use std::sync::Arc;
//! use knotwork_core::observable::{Quote, RelinkableHandle, SimpleQuote};
//!
//! let quote = Arc::new(SimpleQuote::new(0.03));
//! let relinkable = RelinkableHandle::<dyn Quote>::new(quote.clone());
//! let handle = relinkable.handle();
//!
//! assert_eq!(handle.current_link().unwrap().value().unwrap(), 0.03);
//!
//! relinkable.link_to(Arc::new(SimpleQuote::new(0.04)));
//! assert_eq!(handle.current_link().unwrap().value().unwrap(), 0.04);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::error::{CoreError, CoreResult};

/// Receives change notifications from an [`Observable`].
pub trait Observer: Send + Sync {
    /// Called after an observed object changed.
    fn update(&self);
}

/// Anything that exposes an [`Observable`] others can register with.
pub trait Observed {
    /// The notification list of this object.
    fn observable(&self) -> &Observable;
}

/// Registry of observers to notify on change.
///
/// Observers are held weakly: dropping the last strong reference to an
/// observer unregisters it.
#[derive(Default)]
pub struct Observable {
    observers: Mutex<Vec<Weak<dyn Observer>>>,
}

impl Observable {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Registering the same observer twice is a no-op.
    pub fn register(&self, observer: &Arc<dyn Observer>) {
        let weak = Arc::downgrade(observer);
        let mut observers = self.observers.lock();
        if !observers.iter().any(|o| o.ptr_eq(&weak)) {
            observers.push(weak);
        }
    }

    /// Removes an observer; returns false if it was not registered.
    pub fn unregister(&self, observer: &Arc<dyn Observer>) -> bool {
        let weak = Arc::downgrade(observer);
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|o| !o.ptr_eq(&weak));
        observers.len() != before
    }

    /// Calls [`Observer::update`] on every live observer.
    ///
    /// Dead observers are pruned. The registry lock is released before any
    /// observer runs, so observers may register or notify in turn.
    pub fn notify_observers(&self) {
        let live: Vec<Arc<dyn Observer>> = {
            let mut observers = self.observers.lock();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        log::trace!("notifying {} observers", live.len());
        for observer in live {
            observer.update();
        }
    }

    /// Number of live observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observer_count())
            .finish()
    }
}

// =============================================================================
// QUOTES
// =============================================================================

/// A market quote.
pub trait Quote: Observed + Send + Sync + fmt::Debug {
    /// The current value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyQuote` if no value is available.
    fn value(&self) -> CoreResult<f64>;

    /// True if [`Quote::value`] would succeed.
    fn is_valid(&self) -> bool {
        self.value().is_ok()
    }
}

/// A quote whose value is set by hand.
#[derive(Debug, Default)]
pub struct SimpleQuote {
    value: RwLock<Option<f64>>,
    observable: Observable,
}

impl SimpleQuote {
    /// Creates a quote holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: RwLock::new(Some(value)),
            observable: Observable::new(),
        }
    }

    /// Creates a quote with no value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the value and notifies observers if it changed.
    ///
    /// Returns the difference from the previous value (zero if there was none).
    pub fn set_value(&self, value: f64) -> f64 {
        let previous = self.value.write().replace(value);
        if previous != Some(value) {
            self.observable.notify_observers();
        }
        previous.map_or(0.0, |p| value - p)
    }

    /// Clears the value, notifying observers if there was one.
    pub fn reset(&self) {
        if self.value.write().take().is_some() {
            self.observable.notify_observers();
        }
    }
}

impl Observed for SimpleQuote {
    fn observable(&self) -> &Observable {
        &self.observable
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> CoreResult<f64> {
        (*self.value.read()).ok_or(CoreError::EmptyQuote)
    }
}

// =============================================================================
// HANDLES
// =============================================================================

/// Shared cell behind a handle: the current target plus the handle's own
/// observer list.
///
/// The link observes its target and forwards the target's notifications.
struct Link<T: ?Sized> {
    target: RwLock<Option<Arc<T>>>,
    observable: Observable,
}

impl<T> Link<T>
where
    T: Observed + Send + Sync + ?Sized + 'static,
{
    fn new(target: Option<Arc<T>>) -> Arc<Self> {
        let link = Arc::new(Self {
            target: RwLock::new(None),
            observable: Observable::new(),
        });
        if let Some(target) = target {
            link.relink(target, false);
        }
        link
    }

    fn relink(self: &Arc<Self>, target: Arc<T>, notify: bool) {
        let me: Arc<dyn Observer> = self.clone();
        {
            let mut current = self.target.write();
            if let Some(old) = current.as_ref() {
                if Arc::ptr_eq(old, &target) {
                    return;
                }
                old.observable().unregister(&me);
            }
            target.observable().register(&me);
            *current = Some(target);
        }
        if notify {
            self.observable.notify_observers();
        }
    }
}

impl<T> Observer for Link<T>
where
    T: Observed + Send + Sync + ?Sized,
{
    fn update(&self) {
        self.observable.notify_observers();
    }
}

/// A shared, read-only reference to an object that may be relinked.
///
/// Clones share the same link: a relink through the owning
/// [`RelinkableHandle`] is seen by all of them.
pub struct Handle<T: ?Sized> {
    link: Arc<Link<T>>,
}

impl<T> Handle<T>
where
    T: Observed + Send + Sync + ?Sized + 'static,
{
    /// Creates a handle fixed to `target`.
    #[must_use]
    pub fn new(target: Arc<T>) -> Self {
        Self {
            link: Link::new(Some(target)),
        }
    }

    /// Creates a handle linked to nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            link: Link::new(None),
        }
    }

    /// The current target.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyHandle` if the handle is not linked.
    pub fn current_link(&self) -> CoreResult<Arc<T>> {
        self.link.target.read().clone().ok_or(CoreError::EmptyHandle)
    }

    /// True if the handle is not linked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link.target.read().is_none()
    }

    /// True if both handles share the same link.
    #[must_use]
    pub fn same_link(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.link, &other.link)
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            link: Arc::clone(&self.link),
        }
    }
}

impl<T: ?Sized> Observed for Handle<T> {
    fn observable(&self) -> &Observable {
        &self.link.observable
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("target", &*self.link.target.read())
            .finish()
    }
}

/// The owning side of a [`Handle`]: can relink every handle sharing it.
pub struct RelinkableHandle<T: ?Sized> {
    handle: Handle<T>,
}

impl<T> RelinkableHandle<T>
where
    T: Observed + Send + Sync + ?Sized + 'static,
{
    /// Creates a relinkable handle pointing at `target`.
    #[must_use]
    pub fn new(target: Arc<T>) -> Self {
        Self {
            handle: Handle::new(target),
        }
    }

    /// Creates a relinkable handle linked to nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handle: Handle::empty(),
        }
    }

    /// Points every handle sharing this link at `target` and notifies their
    /// observers. Relinking to the current target does nothing.
    pub fn link_to(&self, target: Arc<T>) {
        self.handle.link.relink(target, true);
    }

    /// A read-only handle sharing this link.
    #[must_use]
    pub fn handle(&self) -> Handle<T> {
        self.handle.clone()
    }

    /// The current target.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyHandle` if the handle is not linked.
    pub fn current_link(&self) -> CoreResult<Arc<T>> {
        self.handle.current_link()
    }

    /// True if the handle is not linked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }
}

impl<T: ?Sized> Observed for RelinkableHandle<T> {
    fn observable(&self) -> &Observable {
        self.handle.observable()
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for RelinkableHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RelinkableHandle").field(&self.handle).finish()
    }
}
