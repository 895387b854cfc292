//! Typing of native cells into output values.

use welllog_model::Value;
use welllog_source::NativeValue;

/// Converts a native cell into its JSON-safe output value.
///
/// Booleans pass through, integers and floats become floats, text is
/// coerced with [`Value::from_text`], references are typed through the
/// referenced name and lists are typed element-wise.
pub fn parse_value(cell: &NativeValue) -> Value {
    match cell {
        NativeValue::Null => Value::Null,
        NativeValue::Bool(flag) => Value::Bool(*flag),
        NativeValue::Int(number) => Value::Number(*number as f64),
        NativeValue::Float(number) => Value::Number(*number),
        NativeValue::Text(text) => Value::from_text(text),
        NativeValue::Reference(target) => Value::from_text(&target.name),
        NativeValue::List(items) => Value::List(items.iter().map(parse_value).collect()),
    }
}
