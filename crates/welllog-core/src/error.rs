//! Error types for the normalization engine.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// A failure that escapes the per-row guards of an entity extraction.
///
/// The extractor never propagates this to its caller: the whole entity kind
/// degrades to an empty record set instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The polars staging frame could not be built or filtered.
    #[error("staging frame failed: {0}")]
    Staging(#[from] PolarsError),

    /// Two columns of one record set share a name.
    #[error("column {column} is declared more than once")]
    DuplicateColumn { column: String },

    /// A staged row does not have one cell per column.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The staging frame returned a row index outside the input.
    #[error("staging frame returned unknown row index {index}")]
    RowIndex { index: usize },
}

/// Errors loading or rendering extraction options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}
