//! Curve definitions from channel record sets.

use tracing::warn;
use welllog_model::{CurveDefinition, ExtractionOptions, RecordSet, Value, ValueType, format_numeric};

/// Describes each named channel of `channels` as a curve, in record order.
///
/// Channels without a name are skipped. Curves are always typed `float`, so
/// `maxSize` (kept only for string curves) never survives.
pub fn describe(channels: &RecordSet, options: &ExtractionOptions) -> Vec<CurveDefinition> {
    let mut curves = Vec::with_capacity(channels.len());
    for (name, values) in channels.objects.iter() {
        if name.trim().is_empty() {
            warn!("channel without a name; skipping curve");
            continue;
        }
        let field = |attribute: &str| -> Value {
            channels
                .attribute_index(attribute)
                .and_then(|index| values.get(index))
                .cloned()
                .unwrap_or_default()
        };

        let axis = axis_names(&field("axis"));
        let value_type = ValueType::Float;
        let max_size = element_limit(&field("element_limit")).unwrap_or(options.default_max_size);
        curves.push(CurveDefinition {
            name: name.to_string(),
            description: field("description"),
            unit: field("units"),
            value_type,
            dimensions: axis.len().max(1),
            axis,
            max_size: (value_type == ValueType::String).then_some(max_size),
        });
    }
    curves
}

fn axis_names(value: &Value) -> Vec<String> {
    match value {
        Value::List(items) => items.iter().filter_map(axis_name).collect(),
        other => axis_name(other).into_iter().collect(),
    }
}

fn axis_name(value: &Value) -> Option<String> {
    match value {
        Value::Text(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(format_numeric(*number)),
        _ => None,
    }
}

fn element_limit(value: &Value) -> Option<usize> {
    match value {
        Value::Number(limit) if limit.is_finite() && *limit >= 0.0 => Some(*limit as usize),
        Value::List(items) if items.len() == 1 => element_limit(&items[0]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> RecordSet {
        let mut set = RecordSet::new(
            ["description", "units", "axis", "element_limit"]
                .iter()
                .map(|attribute| (*attribute).to_string())
                .collect(),
        );
        set.objects.insert(
            "DEPT",
            vec![
                Value::Text("Depth".to_string()),
                Value::Text("m".to_string()),
                Value::List(Vec::new()),
                Value::Null,
            ],
        );
        set.objects.insert(
            "WAVE",
            vec![
                Value::Null,
                Value::Text("us".to_string()),
                Value::List(vec![
                    Value::Text("TIME".to_string()),
                    Value::Text("RECV".to_string()),
                ]),
                Value::List(vec![Value::Number(64.0)]),
            ],
        );
        set.objects.insert("", vec![Value::Null; 4]);
        set
    }

    #[test]
    fn describes_named_channels_in_order() {
        let curves = describe(&channels(), &ExtractionOptions::default());
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].name, "DEPT");
        assert_eq!(curves[0].dimensions, 1);
        assert!(curves[0].axis.is_empty());
        assert_eq!(curves[0].unit, Value::Text("m".to_string()));
        assert_eq!(curves[1].dimensions, 2);
        assert_eq!(curves[1].axis, vec!["TIME", "RECV"]);
        assert_eq!(curves[1].description, Value::Null);
    }

    #[test]
    fn max_size_is_dropped_for_float_curves() {
        let curves = describe(&channels(), &ExtractionOptions::default());
        assert!(curves.iter().all(|curve| curve.value_type == ValueType::Float));
        assert!(curves.iter().all(|curve| curve.max_size.is_none()));
        assert_eq!(element_limit(&Value::List(vec![Value::Number(64.0)])), Some(64));
        assert_eq!(element_limit(&Value::Text("x".to_string())), None);
    }
}
