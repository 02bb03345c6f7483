#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! An [`Observable<T>`] is a cheap-to-clone handle onto a single value. Every
//! clone sees the same value and the same subscriber list. Writing a value
//! that compares equal to the current one is a no-op, which is what lets two
//! observables mirror each other without looping forever.
//!
//! # Invariants
//!
//! 1. `version()` increments exactly once per `set` that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. No `RefCell` borrow is held while callbacks run, so callbacks may read
//!    or write the observable that notified them.
//! 4. A dropped [`Subscription`] never fires again, even if it was dropped
//!    from inside a notification of the same observable.
//!
//! # Failure Modes
//!
//! - Subscriber panic: propagates to the caller of `set`. Remaining
//!   subscribers of that notification are skipped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::batch;

static OBSERVABLE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

type Callback<T> = dyn Fn(&T);

struct ObservableInner<T> {
    /// Process-unique; keys deferred notifications.
    id: u64,
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value with change notification.
///
/// Cloning an `Observable` clones the handle, not the value.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                id: OBSERVABLE_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not call `set` on this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers.
    ///
    /// Returns `false` (and notifies nobody) when `value` equals the current
    /// value.
    pub fn set(&self, value: T) -> bool {
        let id = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
            inner.id
        };
        if batch::is_batching() {
            let weak = Rc::downgrade(&self.inner);
            batch::defer(id, move || {
                if let Some(inner) = weak.upgrade() {
                    Self { inner }.notify();
                }
            });
        } else {
            self.notify();
        }
        true
    }

    /// Mutate the value in place, then notify if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Register `callback`, invoked with the new value after every change.
    ///
    /// The callback stays registered while the returned [`Subscription`] is
    /// alive.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of changes since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let (value, live) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let live: Vec<Weak<Callback<T>>> = inner.subscribers.clone();
            (inner.value.clone(), live)
        };
        for weak in live {
            // Upgrade per call: an earlier callback may have dropped this one.
            if let Some(callback) = weak.upgrade() {
                callback(&value);
            }
        }
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

/// RAII guard for an [`Observable`] subscription.
///
/// Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
