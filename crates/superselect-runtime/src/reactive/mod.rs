#![forbid(unsafe_code)]

//! Reactive primitives backing SuperSelect widget state.
//!
//! - [`Observable`]: shared, version-tracked value with subscriber callbacks.
//! - [`Subscription`]: RAII guard; dropping it unsubscribes.
//! - [`Binding`]: lazily evaluated read view over observables.
//! - [`BindingScope`]: owns a widget's subscriptions and releases them together.
//! - [`BatchScope`]: defers notifications so several writes settle in one pass.
//!
//! # Architecture
//!
//! Everything is single-threaded: `Rc<RefCell<..>>` for shared state and
//! `Weak` subscriber lists cleaned up lazily during notification. Writes that
//! do not change the value are dropped before any subscriber sees them, so
//! two observables that copy each other's value converge instead of looping.

pub mod batch;
pub mod binding;
pub mod observable;

pub use batch::BatchScope;
pub use binding::{Binding, BindingScope, bind_mapped, bind_observable};
pub use observable::{Observable, Subscription};
