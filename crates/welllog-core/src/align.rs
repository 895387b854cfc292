//! Alignment of channel samples into one data matrix.

use welllog_model::{DataMatrix, Value};
use welllog_source::Samples;

/// Aligns the sample series of the surviving channels, one column each.
///
/// The matrix has as many rows as the longest series. Shorter series are
/// padded with `null_value`: a scalar for 1-D channels, a list as wide as
/// the channel for vector channels.
pub fn align(channels: &[Samples], null_value: f64) -> DataMatrix {
    let row_count = channels.iter().map(Samples::row_count).max().unwrap_or(0);
    let pads: Vec<Value> = channels
        .iter()
        .map(|samples| padding(samples, null_value))
        .collect();

    let mut rows = Vec::with_capacity(row_count);
    for row in 0..row_count {
        let cells = channels
            .iter()
            .zip(&pads)
            .map(|(samples, pad)| cell(samples, row, null_value).unwrap_or_else(|| pad.clone()))
            .collect();
        rows.push(cells);
    }
    DataMatrix::new(rows)
}

fn padding(samples: &Samples, null_value: f64) -> Value {
    match samples {
        Samples::Scalar(_) => Value::Number(null_value),
        Samples::Vector(_) => Value::List(vec![Value::Number(null_value); samples.width()]),
    }
}

fn cell(samples: &Samples, row: usize, null_value: f64) -> Option<Value> {
    match samples {
        Samples::Scalar(values) => values.get(row).map(|value| Value::Number(*value)),
        Samples::Vector(rows) => rows.get(row).map(|values| {
            let mut cells: Vec<Value> = values.iter().map(|value| Value::Number(*value)).collect();
            cells.resize(samples.width(), Value::Number(null_value));
            Value::List(cells)
        }),
    }
}
