//! Canonical flat section header.

use serde::{Deserialize, Serialize};

use crate::record::{NAME_COLUMN, OrderedMap};
use crate::value::Value;

/// Flat `field -> value` header of a logical section, in field order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header {
    fields: OrderedMap<Value>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, keeping its original position when it already exists.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The section identifier stored under `name`.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_COLUMN).and_then(Value::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
