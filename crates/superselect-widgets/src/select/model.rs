#![forbid(unsafe_code)]

//! Plain-data snapshots of a select widget's state.

/// The current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem<T, V> {
    /// The chosen source item, if the bound value resolves to one.
    pub full_item: Option<T>,
    /// Display text of the chosen item; empty when nothing resolves.
    pub title: String,
    /// The bound value, kept equal to the host's external value.
    pub val: V,
}

/// Snapshot of one widget's view state, as returned by
/// [`SuperSelect::model`](super::SuperSelect::model).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectModel<T, V> {
    /// Current filter text.
    pub filter: String,
    /// Whether the panel of choices is shown.
    pub is_open: bool,
    /// Last validation result. Always `false` for widgets that are not required.
    pub is_valid: bool,
    /// Current selection.
    pub selected_item: SelectedItem<T, V>,
    /// Whether the whole item is bound rather than one field of it.
    pub use_full_object: bool,
}
