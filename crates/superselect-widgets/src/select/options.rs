#![forbid(unsafe_code)]

//! Options bag for [`SuperSelect`](super::SuperSelect).
//!
//! Hosts may hand options over as typed [`SelectOptions`], as a
//! `serde_json::Value`, or as a JSON string (the form used by markup
//! attributes). Whatever the form, flags are coerced to `bool` here, once, and
//! the rest of the widget only sees typed values.
//!
//! # Coercion
//!
//! | JSON            | flag value      |
//! |-----------------|-----------------|
//! | missing, `null` | `false`         |
//! | `true`/`false`  | itself          |
//! | `"true"`        | `true`          |
//! | any other text  | `false`         |
//! | number          | `n != 0`        |
//!
//! `scopeBind` and `selectValue` accept strings or numbers.
//!
//! # Failure Modes
//!
//! [`SelectOptions::from_json_str`] reports malformed input as
//! [`OptionsError`]. [`OptionsInput::normalize`] never fails. Text that is not
//! a JSON object falls back to [`SelectOptions::default`]. Inside an object,
//! each key is read on its own: a badly shaped key is logged and takes its
//! default, and the other keys are kept.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tracing target for option parsing diagnostics.
pub const OPTIONS_LOG_TARGET: &str = "superselect::options";

/// Normalized widget options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptions {
    /// Field of the chosen item to bind as the value. `None` binds the whole item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_value: Option<String>,
    /// Group key for close-on-click coordination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_bind: Option<String>,
    /// Show the validity icon and run the validator.
    pub is_required: bool,
    /// Show the filter input.
    pub is_filterable: bool,
}

/// Errors from parsing an options bag.
#[derive(Debug)]
pub enum OptionsError {
    /// The string was not valid JSON.
    Json(serde_json::Error),
    /// The JSON was valid but not an object.
    NotAnObject,
    /// A flag had a shape that cannot be read as a boolean.
    InvalidFlag {
        /// JSON key of the flag.
        key: &'static str,
    },
    /// A key field was neither a string nor a number.
    InvalidField {
        /// JSON key of the field.
        key: &'static str,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "options are not valid JSON: {err}"),
            Self::NotAnObject => write!(f, "options must be a JSON object"),
            Self::InvalidFlag { key } => write!(f, "option `{key}` is not a boolean"),
            Self::InvalidField { key } => write!(f, "option `{key}` is not a string or number"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OptionsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Accepted JSON shapes for a boolean flag.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Text(String),
    Number(f64),
}

impl FlagRepr {
    fn coerce(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Text(s) => s == "true",
            Self::Number(n) => n != 0.0,
        }
    }
}

/// Accepted JSON shapes for a key-like field.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

impl KeyRepr {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

fn read_flag(map: &Map<String, Value>, key: &'static str) -> Result<bool, OptionsError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(v) => FlagRepr::deserialize(v)
            .map(FlagRepr::coerce)
            .map_err(|_| OptionsError::InvalidFlag { key }),
    }
}

fn read_key(map: &Map<String, Value>, key: &'static str) -> Result<Option<String>, OptionsError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => KeyRepr::deserialize(v)
            .map(|k| Some(k.into_string()))
            .map_err(|_| OptionsError::InvalidField { key }),
    }
}

fn or_default<T: Default>(read: Result<T, OptionsError>, problems: &mut Vec<OptionsError>) -> T {
    read.unwrap_or_else(|err| {
        problems.push(err);
        T::default()
    })
}

impl SelectOptions {
    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Read options from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, OptionsError> {
        let Value::Object(map) = value else {
            return Err(OptionsError::NotAnObject);
        };
        Ok(Self {
            select_value: read_key(map, "selectValue")?,
            scope_bind: read_key(map, "scopeBind")?,
            is_required: read_flag(map, "isRequired")?,
            is_filterable: read_flag(map, "isFilterable")?,
        })
    }

    /// Read options key by key, keeping every key that reads cleanly.
    ///
    /// Fails only when `value` is not an object. Badly shaped keys take their
    /// defaults and are returned alongside the options.
    pub fn from_value_lossy(value: &Value) -> Result<(Self, Vec<OptionsError>), OptionsError> {
        let Value::Object(map) = value else {
            return Err(OptionsError::NotAnObject);
        };
        let mut problems = Vec::new();
        let options = Self {
            select_value: or_default(read_key(map, "selectValue"), &mut problems),
            scope_bind: or_default(read_key(map, "scopeBind"), &mut problems),
            is_required: or_default(read_flag(map, "isRequired"), &mut problems),
            is_filterable: or_default(read_flag(map, "isFilterable"), &mut problems),
        };
        Ok((options, problems))
    }

    /// Set the bound value field.
    #[must_use]
    pub fn select_value(mut self, field: impl Into<String>) -> Self {
        self.select_value = Some(field.into());
        self
    }

    /// Join the close-on-click group `key`.
    #[must_use]
    pub fn scope_bind(mut self, key: impl Into<String>) -> Self {
        self.scope_bind = Some(key.into());
        self
    }

    /// Mark the widget as required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.is_required = required;
        self
    }

    /// Enable the filter input.
    #[must_use]
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.is_filterable = filterable;
        self
    }

    /// How a chosen item maps to the bound value.
    #[must_use]
    pub fn value_selector(&self) -> ValueSelector {
        match &self.select_value {
            Some(field) => ValueSelector::Field(field.clone()),
            None => ValueSelector::FullItem,
        }
    }

    /// Whether the whole item is bound (no `selectValue`).
    #[must_use]
    pub fn use_full_object(&self) -> bool {
        self.select_value.is_none()
    }
}

/// How a chosen item becomes the bound value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueSelector {
    /// Bind the item itself.
    #[default]
    FullItem,
    /// Bind one field of the item.
    Field(String),
}

/// Options as handed over by the host, before normalization.
#[derive(Debug, Clone, Default)]
pub enum OptionsInput {
    /// No options attribute.
    #[default]
    Absent,
    /// JSON text, e.g. from a markup attribute.
    Json(String),
    /// Already parsed JSON.
    Value(Value),
    /// Typed options.
    Typed(SelectOptions),
}

impl OptionsInput {
    /// Resolve to typed options, falling back to defaults on malformed input.
    ///
    /// Parse failures are logged at `error` level under
    /// [`OPTIONS_LOG_TARGET`] and never returned. A badly shaped key only
    /// resets that key.
    #[must_use]
    pub fn normalize(self) -> SelectOptions {
        let parsed = match self {
            Self::Absent => return SelectOptions::default(),
            Self::Typed(options) => return options,
            Self::Json(text) => serde_json::from_str::<Value>(&text)
                .map_err(OptionsError::from)
                .and_then(|value| SelectOptions::from_value_lossy(&value)),
            Self::Value(value) => SelectOptions::from_value_lossy(&value),
        };
        match parsed {
            Ok((options, problems)) => {
                for error in problems {
                    tracing::error!(
                        target: OPTIONS_LOG_TARGET,
                        %error,
                        "malformed select option, using its default"
                    );
                }
                options
            }
            Err(error) => {
                tracing::error!(
                    target: OPTIONS_LOG_TARGET,
                    %error,
                    "malformed select options, using defaults"
                );
                SelectOptions::default()
            }
        }
    }
}

impl From<&str> for OptionsInput {
    fn from(json: &str) -> Self {
        Self::Json(json.to_owned())
    }
}

impl From<String> for OptionsInput {
    fn from(json: String) -> Self {
        Self::Json(json)
    }
}

impl From<Value> for OptionsInput {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<SelectOptions> for OptionsInput {
    fn from(options: SelectOptions) -> Self {
        Self::Typed(options)
    }
}
