//! Polars staging of extracted rows.
//!
//! Native cells cannot live in a DataFrame directly (lists and references
//! have no stable hash), so each cell is reduced to a canonical key string.
//! Null-row filtering and name deduplication run on those keys; the rows
//! that survive are then restored from the original cells by row index.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray, PolarsResult};
use tracing::debug;
use welllog_model::{ExtractionOptions, NAME_COLUMN, NullRowMatch, format_numeric, is_identity_column};
use welllog_source::NativeValue;

use crate::error::ExtractError;

const ROW_COLUMN: &str = "__row";

/// Canonical key string of a cell; `None` for null.
///
/// Lists are joined with `"; "`, so `[1, 2, 3]` keys as `"1; 2; 3"`.
pub fn cell_key(cell: &NativeValue) -> Option<String> {
    match cell {
        NativeValue::Null => None,
        NativeValue::Bool(flag) => Some(flag.to_string()),
        NativeValue::Int(number) => Some(number.to_string()),
        NativeValue::Float(number) => Some(format_numeric(*number)),
        NativeValue::Text(text) => Some(text.trim().to_string()),
        NativeValue::Reference(target) => Some(target.name.clone()),
        NativeValue::List(items) => Some(
            items
                .iter()
                .map(|item| cell_key(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("; "),
        ),
    }
}

/// Drops null rows and duplicate names, keeping first occurrences in order.
///
/// `columns` names the cells of every row. Identity columns are ignored by
/// the null-row check; rows are deduplicated on the `name` column when
/// there is one.
///
/// # Errors
///
/// Returns [`ExtractError::DuplicateColumn`] when `columns` repeats a name,
/// [`ExtractError::RowShape`] when a row does not match `columns`,
/// or a staging error when the polars frame cannot be built or filtered.
pub fn stage_rows(
    columns: &[String],
    rows: Vec<Vec<NativeValue>>,
    options: &ExtractionOptions,
) -> Result<Vec<Vec<NativeValue>>, ExtractError> {
    let mut declared = BTreeSet::new();
    if let Some(column) = columns.iter().find(|column| !declared.insert(column.as_str())) {
        return Err(ExtractError::DuplicateColumn {
            column: column.clone(),
        });
    }
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != columns.len() {
            return Err(ExtractError::RowShape {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
    }
    if rows.is_empty() {
        return Ok(rows);
    }

    let frame = staging_frame(columns, &rows)?;
    let staged = frame.height();
    let frame = drop_null_rows(frame, columns, options)?;
    let non_null = frame.height();
    let frame = dedupe_by_name(frame, columns)?;
    debug!(
        rows = staged,
        null_rows = staged - non_null,
        duplicates = non_null - frame.height(),
        "staged rows"
    );
    restore_rows(&frame, rows)
}

fn key_column(index: usize) -> String {
    format!("c{index}")
}

fn staging_frame(columns: &[String], rows: &[Vec<NativeValue>]) -> PolarsResult<DataFrame> {
    let mut frame_columns = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(Column::new(
        ROW_COLUMN.into(),
        (0..rows.len() as u64).collect::<Vec<u64>>(),
    ));
    for index in 0..columns.len() {
        let keys: Vec<Option<String>> = rows.iter().map(|row| cell_key(&row[index])).collect();
        frame_columns.push(Column::new(key_column(index).into(), keys));
    }
    DataFrame::new(frame_columns)
}

/// Reads one key cell. Goes through `AnyValue` per cell, which is fine for
/// metadata tables of a few hundred rows.
fn key_at(frame: &DataFrame, column: &str, idx: usize) -> PolarsResult<Option<String>> {
    Ok(match frame.column(column)?.get(idx)? {
        AnyValue::Null => None,
        AnyValue::String(value) => Some(value.to_string()),
        AnyValue::StringOwned(value) => Some(value.to_string()),
        value => Some(value.to_string()),
    })
}

fn drop_null_rows(
    frame: DataFrame,
    columns: &[String],
    options: &ExtractionOptions,
) -> Result<DataFrame, ExtractError> {
    if options.null_values.is_empty() {
        return Ok(frame);
    }
    let checked: Vec<String> = columns
        .iter()
        .enumerate()
        .filter(|(_, column)| !is_identity_column(column))
        .map(|(index, _)| key_column(index))
        .collect();
    if checked.is_empty() {
        return Ok(frame);
    }
    let nulls: BTreeSet<&str> = options.null_values.iter().map(String::as_str).collect();

    let mut keep = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let mut matched = Vec::with_capacity(checked.len());
        for column in &checked {
            let key = key_at(&frame, column, idx)?;
            matched.push(key.is_some_and(|key| nulls.contains(key.as_str())));
        }
        let null_row = match options.null_row_match {
            NullRowMatch::AllCells => matched.iter().all(|hit| *hit),
            NullRowMatch::AnyCell => matched.iter().any(|hit| *hit),
        };
        keep.push(!null_row);
    }
    let mask = BooleanChunked::from_slice("null_rows".into(), &keep);
    Ok(frame.filter(&mask)?)
}

fn dedupe_by_name(frame: DataFrame, columns: &[String]) -> Result<DataFrame, ExtractError> {
    let Some(name_index) = columns.iter().position(|column| column == NAME_COLUMN) else {
        return Ok(frame);
    };
    let name_column = key_column(name_index);
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let name = key_at(&frame, &name_column, idx)?.unwrap_or_default();
        keep.push(seen.insert(name));
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(frame.filter(&mask)?)
}

fn restore_rows(
    frame: &DataFrame,
    rows: Vec<Vec<NativeValue>>,
) -> Result<Vec<Vec<NativeValue>>, ExtractError> {
    let positions = frame.column(ROW_COLUMN)?;
    let mut slots: Vec<Option<Vec<NativeValue>>> = rows.into_iter().map(Some).collect();
    let mut survivors = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let index = positions
            .get(idx)?
            .extract::<usize>()
            .ok_or(ExtractError::RowIndex { index: idx })?;
        let row = slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(ExtractError::RowIndex { index })?;
        survivors.push(row);
    }
    Ok(survivors)
}
