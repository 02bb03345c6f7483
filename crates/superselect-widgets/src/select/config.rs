#![forbid(unsafe_code)]

//! Normalized widget configuration and validation.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::options::{SelectOptions, ValueSelector};

/// Validation callback, run against the current bound value.
pub type Validator<V> = Rc<dyn Fn(&V) -> bool>;

/// Values that can say whether they hold an actual selection.
///
/// Used by the default validator of a required widget.
pub trait RequiredValue {
    /// Whether this value counts as "something selected".
    fn is_present(&self) -> bool;
}

impl RequiredValue for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl RequiredValue for Rc<str> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Only non-empty JSON strings are present.
impl RequiredValue for Value {
    fn is_present(&self) -> bool {
        matches!(self, Value::String(s) if !s.is_empty())
    }
}

impl<T> RequiredValue for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

/// The default validator for required widgets.
#[must_use]
pub fn default_validator<V: RequiredValue + 'static>() -> Validator<V> {
    Rc::new(|val: &V| val.is_present())
}

/// Options plus the validator actually in effect.
pub struct SelectConfig<V> {
    options: SelectOptions,
    validator: Option<Validator<V>>,
}

impl<V: RequiredValue + 'static> SelectConfig<V> {
    /// Combine options with an optional host validator.
    ///
    /// A required widget without a validator gets [`default_validator`].
    #[must_use]
    pub fn new(options: SelectOptions, validator: Option<Validator<V>>) -> Self {
        let validator = match validator {
            Some(v) => Some(v),
            None if options.is_required => Some(default_validator()),
            None => None,
        };
        Self { options, validator }
    }
}

impl<V> SelectConfig<V> {
    /// The normalized options.
    #[must_use]
    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    /// Whether validation runs.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.options.is_required
    }

    /// Whether the filter input is shown.
    #[must_use]
    pub fn is_filterable(&self) -> bool {
        self.options.is_filterable
    }

    /// The group this widget closes with, if any.
    #[must_use]
    pub fn scope_bind(&self) -> Option<&str> {
        self.options.scope_bind.as_deref()
    }

    /// How chosen items map to the bound value.
    #[must_use]
    pub fn value_selector(&self) -> ValueSelector {
        self.options.value_selector()
    }

    /// Whether a validator is installed.
    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Validity of `val`: `None` when the widget is not required.
    pub fn validate(&self, val: &V) -> Option<bool> {
        if !self.options.is_required {
            return None;
        }
        self.validator.as_ref().map(|check| check(val))
    }
}

impl<V> fmt::Debug for SelectConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("options", &self.options)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_without_validator_gets_default() {
        let cfg: SelectConfig<Value> =
            SelectConfig::new(SelectOptions::default().required(true), None);
        assert!(cfg.has_validator());
        assert_eq!(cfg.validate(&json!("")), Some(false));
        assert_eq!(cfg.validate(&json!("a")), Some(true));
    }

    #[test]
    fn optional_widget_has_no_validator() {
        let cfg: SelectConfig<String> = SelectConfig::new(SelectOptions::default(), None);
        assert!(!cfg.has_validator());
        assert_eq!(cfg.validate(&String::new()), None);
    }

    #[test]
    fn host_validator_wins() {
        let only_b: Validator<String> = Rc::new(|v: &String| v == "b");
        let cfg = SelectConfig::new(SelectOptions::default().required(true), Some(only_b));
        assert_eq!(cfg.validate(&"a".to_string()), Some(false));
        assert_eq!(cfg.validate(&"b".to_string()), Some(true));
    }

    #[test]
    fn json_presence_is_non_empty_string_only() {
        assert!(json!("x").is_present());
        assert!(!json!("").is_present());
        assert!(!json!(0).is_present());
        assert!(!json!(null).is_present());
        assert!(!json!({"id": 1}).is_present());
        assert!(!json!(false).is_present());
    }

    #[test]
    fn option_presence() {
        assert!(Some(3).is_present());
        assert!(!None::<u8>.is_present());
    }
}
