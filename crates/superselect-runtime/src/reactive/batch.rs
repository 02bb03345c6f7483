#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! While a [`BatchScope`] is alive on the current thread, [`Observable::set`]
//! stores the new value immediately but queues its notification. When the
//! outermost scope drops, queued notifications run in the order their
//! observables were first written. An observable written several times in
//! one batch is notified once, with its final value.
//!
//! This is the SuperSelect equivalent of one reactivity pass: a handler can
//! write several observables and every listener sees the settled state.
//!
//! [`Observable::set`]: super::Observable::set

use std::cell::RefCell;

type Deferred = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchContext {
    depth: u32,
    pending: Vec<(u64, Deferred)>,
}

thread_local! {
    static BATCH: RefCell<BatchContext> = RefCell::new(BatchContext::default());
}

/// Whether a batch is open on this thread.
pub(crate) fn is_batching() -> bool {
    BATCH.with(|b| b.borrow().depth > 0)
}

/// Queue `notify` under `key`, unless a notification for `key` is queued.
pub(crate) fn defer(key: u64, notify: impl FnOnce() + 'static) {
    BATCH.with(|b| {
        let mut ctx = b.borrow_mut();
        if ctx.pending.iter().any(|(k, _)| *k == key) {
            return;
        }
        ctx.pending.push((key, Box::new(notify)));
    });
}

/// RAII guard that defers observable notifications until it drops.
///
/// Scopes nest; only the outermost one flushes.
///
/// ```ignore
/// let a = Observable::new(0);
/// let b = Observable::new(0);
/// {
///     let _batch = BatchScope::new();
///     a.set(1);
///     b.set(2);
///     // no subscriber has run yet
/// }
/// // both notified here
/// ```
#[must_use = "the batch flushes as soon as the scope is dropped"]
pub struct BatchScope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl BatchScope {
    /// Open a batch on the current thread.
    pub fn new() -> Self {
        BATCH.with(|b| b.borrow_mut().depth += 1);
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    /// Number of notifications waiting for the outermost scope to close.
    #[must_use]
    pub fn pending() -> usize {
        BATCH.with(|b| b.borrow().pending.len())
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let outermost = BATCH.with(|b| {
            let mut ctx = b.borrow_mut();
            ctx.depth = ctx.depth.saturating_sub(1);
            ctx.depth == 0
        });
        if !outermost {
            return;
        }
        // Notifications may write more observables; those run unbatched
        // because depth is already zero.
        let pending = BATCH.with(|b| std::mem::take(&mut b.borrow_mut().pending));
        tracing::trace!(count = pending.len(), "flushing batched notifications");
        for (_, notify) in pending {
            notify();
        }
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("pending", &Self::pending())
            .finish()
    }
}
