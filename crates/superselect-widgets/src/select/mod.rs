#![forbid(unsafe_code)]

//! Filterable select widget.
//!
//! A [`SuperSelect`] replaces a native dropdown: a label showing the current
//! choice, a panel of options toggled by clicking the label, an optional
//! filter input, and an optional validity indicator. It binds to a host-owned
//! [`Observable`](superselect_runtime::Observable) value and keeps it in sync
//! with its own selection.
//!
//! # Submodules
//!
//! - [`options`]: options bag parsing and flag coercion
//! - [`config`]: normalized configuration and validators
//! - [`accessor`]: how items are displayed, valued and filtered
//! - [`group`]: close-on-click coordination between widgets
//! - [`view`]: declarative view and text rendering

pub mod accessor;
pub mod config;
pub mod group;
mod model;
pub mod options;
pub mod view;
mod widget;

pub use accessor::{FnAccessor, FullItemAccessor, ItemAccessor, JsonAccessor};
pub use config::{RequiredValue, SelectConfig, Validator, default_validator};
pub use group::{GroupAnchor, GroupMembership, GroupOrigin, SelectGroups, SelectId};
pub use model::{SelectModel, SelectedItem};
pub use options::{OptionsError, OptionsInput, SelectOptions, ValueSelector};
pub use view::{Caret, FilterInputView, OptionView, PanelView, SelectView, ValidityIcon};
pub use widget::{SelectEvent, SelectOutcome, SuperSelect, SuperSelectBuilder};
