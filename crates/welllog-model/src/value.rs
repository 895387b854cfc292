//! JSON-safe leaf values.
//!
//! Every cell that leaves the engine is a [`Value`]: a float, a string, a
//! boolean, null, or a nested list of those. Native source objects never
//! reach the output.

use serde::{Deserialize, Serialize};

/// A normalized, JSON-serializable value.
///
/// Serializes untagged, so `Value::Number(7.0)` is written as `7.0` and
/// `Value::Null` as `null`. Non-finite numbers are written as `null` by
/// `serde_json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Coerces free text the way source strings are typed.
    ///
    /// `"true"`/`"false"` (any case) become booleans, numeric-looking text
    /// becomes a float, everything else is returned trimmed.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if let Some(number) = parse_numeric(trimmed) {
            return Value::Number(number);
        }
        Value::Text(trimmed.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Parses numeric-looking text as `f64`.
///
/// Requires at least one ASCII digit so that `inf`, `NaN` and friends stay
/// text.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !trimmed.bytes().any(|byte| byte.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Formats a float without a trailing `.0` or trailing zeros.
pub fn format_numeric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{value}");
    if text.contains('.') && !text.contains('e') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
