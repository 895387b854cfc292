//! Output model of the well-log normalization engine.
//!
//! Everything here is plain data: values, record sets, headers, curve
//! definitions, data matrices and the per-frame [`Document`]. All types are
//! `Send + Sync` and serialize to JSON whose leaves are floats, strings,
//! booleans, nulls or nested lists.

pub mod curve;
pub mod document;
pub mod format;
pub mod header;
pub mod options;
pub mod record;
pub mod value;

pub use curve::{CurveDefinition, DataMatrix, ValueType};
pub use document::Document;
pub use format::WellLogFormat;
pub use header::Header;
pub use options::{
    DEFAULT_MAX_SIZE, DEFAULT_NULL_VALUE, ExtractionOptions, HeaderField, NullRowMatch,
    default_header_fields,
};
pub use record::{
    LOGICAL_FILE_ID_COLUMN, NAME_COLUMN, OrderedMap, RecordSet, is_identity_column,
};
pub use value::{Value, format_numeric, parse_numeric};
