//! Metadata extraction and normalization for well-log source graphs.
//!
//! [`scan_section`] turns one logical section of a parsed source file into
//! its per-frame [`Document`](welllog_model::Document)s. The building blocks
//! are public for callers that need only part of the flow:
//!
//! - [`EntityExtractor`]: native entities → [`RecordSet`](welllog_model::RecordSet)
//! - [`HeaderMapper`]: origin record set → canonical header
//! - [`describe`]: channel record set → curve definitions
//! - [`align`]: channel samples → data matrix
//! - [`assemble`]: section values + frames → documents

pub mod align;
pub mod assemble;
pub mod config;
pub mod curves;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod header;
pub mod pipeline;
pub mod schema;
pub mod staging;
pub mod typing;

pub use align::align;
pub use assemble::{FrameOutput, SectionRecords, assemble};
pub use config::{load_options, render_options};
pub use curves::describe;
pub use datetime::{SourceDateTime, normalize_datetime, parse_source_datetime};
pub use error::{ConfigError, ExtractError};
pub use extract::{EntityExtractor, VALUE_COLUMN};
pub use header::HeaderMapper;
pub use pipeline::scan_section;
pub use schema::{AttributeMapping, EntitySchema, unit_column};
pub use staging::{cell_key, stage_rows};
pub use typing::parse_value;
