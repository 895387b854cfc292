//! Native attribute values as exposed by format parsers.

use serde::{Deserialize, Serialize};

/// A reference from one native entity to another, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "$ref")]
    pub name: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A raw attribute cell read from a native entity.
///
/// Snapshots encode references as `{"$ref": "NAME"}`; every other variant
/// maps onto the matching JSON shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Reference(EntityRef),
    List(Vec<NativeValue>),
}

impl NativeValue {
    pub fn reference(name: impl Into<String>) -> Self {
        NativeValue::Reference(EntityRef::new(name))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    pub fn as_list(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, for log messages.
    pub fn shape(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Int(_) => "int",
            NativeValue::Float(_) => "float",
            NativeValue::Text(_) => "text",
            NativeValue::Reference(_) => "reference",
            NativeValue::List(_) => "list",
        }
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        NativeValue::Bool(value)
    }
}

impl From<i64> for NativeValue {
    fn from(value: i64) -> Self {
        NativeValue::Int(value)
    }
}

impl From<f64> for NativeValue {
    fn from(value: f64) -> Self {
        NativeValue::Float(value)
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        NativeValue::Text(value.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        NativeValue::Text(value)
    }
}

impl From<EntityRef> for NativeValue {
    fn from(value: EntityRef) -> Self {
        NativeValue::Reference(value)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(NativeValue::Null, Into::into)
    }
}

impl<T: Into<NativeValue>> From<Vec<T>> for NativeValue {
    fn from(values: Vec<T>) -> Self {
        NativeValue::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_snapshot_cells() {
        let cells: Vec<NativeValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "m", {"$ref": "GR"}, [1, {"$ref": "X"}]]"#)
                .expect("decode cells");
        assert_eq!(
            cells,
            vec![
                NativeValue::Null,
                NativeValue::Bool(true),
                NativeValue::Int(3),
                NativeValue::Float(2.5),
                NativeValue::Text("m".to_string()),
                NativeValue::reference("GR"),
                NativeValue::List(vec![NativeValue::Int(1), NativeValue::reference("X")]),
            ]
        );
    }

    #[test]
    fn shapes() {
        assert_eq!(NativeValue::from(vec![1_i64]).shape(), "list");
        assert_eq!(NativeValue::from(Some("a")).shape(), "text");
        assert_eq!(NativeValue::from(None::<f64>).shape(), "null");
    }
}
