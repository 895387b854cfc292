//! Curve definitions and the aligned data matrix.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Declared type of a curve's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Float,
    String,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::String => "string",
        }
    }
}

/// Canonical metadata describing one channel of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveDefinition {
    pub name: String,
    pub description: Value,
    pub unit: Value,
    pub value_type: ValueType,
    pub dimensions: usize,
    pub axis: Vec<String>,
    /// Element limit; only meaningful for string curves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,
}

/// Row-major sample matrix of one frame.
///
/// One column per surviving channel, one row per sample index. A cell is a
/// scalar for 1-D channels and a fixed-width list for vector channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataMatrix {
    rows: Vec<Vec<Value>>,
}

impl DataMatrix {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_definition_uses_camel_case_and_omits_max_size() {
        let curve = CurveDefinition {
            name: "GR".to_string(),
            description: Value::Text("Gamma ray".to_string()),
            unit: Value::Text("gAPI".to_string()),
            value_type: ValueType::Float,
            dimensions: 1,
            axis: Vec::new(),
            max_size: None,
        };
        let json = serde_json::to_string(&curve).expect("serialize curve");
        assert_eq!(
            json,
            r#"{"name":"GR","description":"Gamma ray","unit":"gAPI","valueType":"float","dimensions":1,"axis":[]}"#
        );
    }

    #[test]
    fn matrix_columns() {
        let matrix = DataMatrix::new(vec![
            vec![Value::Number(1.0), Value::Number(10.0)],
            vec![Value::Number(2.0), Value::Number(20.0)],
        ]);
        assert_eq!(matrix.row_count(), 2);
        assert_eq!(matrix.column_count(), 2);
        let second: Vec<&Value> = matrix.column(1).collect();
        assert_eq!(second, vec![&Value::Number(10.0), &Value::Number(20.0)]);
        assert_eq!(matrix.cell(5, 0), None);
    }
}
