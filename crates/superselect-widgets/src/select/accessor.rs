#![forbid(unsafe_code)]

//! How the widget reads source items.
//!
//! An [`ItemAccessor`] tells the widget three things about an item: the text
//! to display, the value to bind when it is chosen, and whether it matches a
//! filter query. Three implementations cover the usual cases:
//!
//! - [`FnAccessor`]: closures over typed items.
//! - [`FullItemAccessor`]: the bound value is the item itself.
//! - [`JsonAccessor`]: dynamic JSON records addressed by key, where a missing
//!   key reads as `null` and renders as an empty title.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use serde_json::Value;

use super::options::ValueSelector;

/// Read contract between the widget and its source items.
pub trait ItemAccessor {
    /// Source list element.
    type Item: Clone + PartialEq + 'static;
    /// Bound value type.
    type Value: Clone + PartialEq + Default + 'static;

    /// Text shown for `item` in the label and the option list.
    fn display_of(&self, item: &Self::Item) -> String;

    /// Value bound when `item` is chosen.
    fn value_of(&self, item: &Self::Item, selector: &ValueSelector) -> Self::Value;

    /// Whether `item` passes the filter `query`.
    ///
    /// `query` is already lowercased and non-empty. The default matches a
    /// substring of the lowercased display text.
    fn matches(&self, item: &Self::Item, query: &str) -> bool {
        self.display_of(item).to_lowercase().contains(query)
    }
}

/// Accessor built from two closures.
pub struct FnAccessor<T, V> {
    display: Rc<dyn Fn(&T) -> String>,
    value: Rc<dyn Fn(&T) -> V>,
}

impl<T, V> FnAccessor<T, V> {
    /// Create an accessor from a display function and a value function.
    pub fn new(
        display: impl Fn(&T) -> String + 'static,
        value: impl Fn(&T) -> V + 'static,
    ) -> Self {
        Self {
            display: Rc::new(display),
            value: Rc::new(value),
        }
    }
}

impl<T, V> Clone for FnAccessor<T, V> {
    fn clone(&self) -> Self {
        Self {
            display: Rc::clone(&self.display),
            value: Rc::clone(&self.value),
        }
    }
}

impl<T, V> fmt::Debug for FnAccessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAccessor").finish_non_exhaustive()
    }
}

/// The value closure decides the bound value; the selector is ignored.
impl<T, V> ItemAccessor for FnAccessor<T, V>
where
    T: Clone + PartialEq + 'static,
    V: Clone + PartialEq + Default + 'static,
{
    type Item = T;
    type Value = V;

    fn display_of(&self, item: &T) -> String {
        (self.display)(item)
    }

    fn value_of(&self, item: &T, _selector: &ValueSelector) -> V {
        (self.value)(item)
    }
}

/// Binds the chosen item itself. The bound value is `Option<T>` so that
/// "nothing selected" is representable.
pub struct FullItemAccessor<T> {
    display: Rc<dyn Fn(&T) -> String>,
    _item: PhantomData<T>,
}

impl<T> FullItemAccessor<T> {
    /// Create an accessor that displays items with `display`.
    pub fn new(display: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            display: Rc::new(display),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FullItemAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullItemAccessor").finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + 'static> ItemAccessor for FullItemAccessor<T> {
    type Item = T;
    type Value = Option<T>;

    fn display_of(&self, item: &T) -> String {
        (self.display)(item)
    }

    fn value_of(&self, item: &T, _selector: &ValueSelector) -> Option<T> {
        Some(item.clone())
    }
}

/// Accessor for JSON records, addressed by key.
///
/// Honors [`ValueSelector`]: `FullItem` binds the whole record, `Field(k)`
/// binds `record[k]`. Filtering matches any scalar anywhere in the record,
/// not only the display field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonAccessor {
    display_key: String,
}

impl JsonAccessor {
    /// Display `record[display_key]`.
    pub fn new(display_key: impl Into<String>) -> Self {
        Self {
            display_key: display_key.into(),
        }
    }

    /// The key read for display.
    #[must_use]
    pub fn display_key(&self) -> &str {
        &self.display_key
    }
}

/// Text form of a scalar JSON value; `null` and containers render empty.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn any_leaf_matches(value: &Value, query: &str) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => items.iter().any(|v| any_leaf_matches(v, query)),
        Value::Object(map) => map.values().any(|v| any_leaf_matches(v, query)),
        scalar => scalar_text(scalar).to_lowercase().contains(query),
    }
}

impl ItemAccessor for JsonAccessor {
    type Item = Value;
    type Value = Value;

    fn display_of(&self, item: &Value) -> String {
        item.get(&self.display_key)
            .map(scalar_text)
            .unwrap_or_default()
    }

    fn value_of(&self, item: &Value, selector: &ValueSelector) -> Value {
        match selector {
            ValueSelector::FullItem => item.clone(),
            ValueSelector::Field(key) => item.get(key).cloned().unwrap_or(Value::Null),
        }
    }

    fn matches(&self, item: &Value, query: &str) -> bool {
        any_leaf_matches(item, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Fruit {
        id: u32,
        name: &'static str,
    }

    #[test]
    fn fn_accessor_reads_through_closures() {
        let acc = FnAccessor::new(|f: &Fruit| f.name.to_string(), |f: &Fruit| f.id);
        let apple = Fruit { id: 1, name: "Apple" };
        assert_eq!(acc.display_of(&apple), "Apple");
        assert_eq!(acc.value_of(&apple, &ValueSelector::FullItem), 1);
        assert!(acc.matches(&apple, "app"));
        assert!(!acc.matches(&apple, "pear"));
    }

    #[test]
    fn full_item_accessor_binds_item() {
        let acc = FullItemAccessor::new(|f: &Fruit| f.name.to_string());
        let pear = Fruit { id: 2, name: "Pear" };
        assert_eq!(
            acc.value_of(&pear, &ValueSelector::FullItem),
            Some(pear.clone())
        );
    }

    #[test]
    fn json_display_and_missing_key() {
        let acc = JsonAccessor::new("title");
        assert_eq!(acc.display_of(&json!({"title": "Kiwi"})), "Kiwi");
        assert_eq!(acc.display_of(&json!({"title": 12})), "12");
        assert_eq!(acc.display_of(&json!({"name": "Kiwi"})), "");
    }

    #[test]
    fn json_value_selector() {
        let acc = JsonAccessor::new("title");
        let rec = json!({"title": "Kiwi", "id": "k"});
        assert_eq!(acc.value_of(&rec, &ValueSelector::FullItem), rec);
        assert_eq!(
            acc.value_of(&rec, &ValueSelector::Field("id".into())),
            json!("k")
        );
        assert_eq!(
            acc.value_of(&rec, &ValueSelector::Field("nope".into())),
            Value::Null
        );
    }

    #[test]
    fn json_filter_matches_any_field() {
        let acc = JsonAccessor::new("title");
        let rec = json!({"title": "Kiwi", "origin": {"country": "New Zealand"}, "tags": ["green"]});
        assert!(acc.matches(&rec, "zealand"));
        assert!(acc.matches(&rec, "gree"));
        assert!(!acc.matches(&rec, "mango"));
    }
}
