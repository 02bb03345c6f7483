#![forbid(unsafe_code)]

//! Single-threaded reactive runtime for SuperSelect.
//!
//! Widgets in `superselect-widgets` keep their view state in [`Observable`]s
//! and wire synchronization through [`Subscription`]s collected in a
//! [`BindingScope`]. A [`BatchScope`] groups several writes into one
//! notification pass.

pub mod reactive;

pub use reactive::{
    BatchScope, Binding, BindingScope, Observable, Subscription, bind_mapped, bind_observable,
};
