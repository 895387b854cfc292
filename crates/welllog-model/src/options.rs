//! Configuration options for section extraction.

use serde::{Deserialize, Serialize};

/// Default null sentinel written into padded data cells.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

/// Default element limit of a curve when the channel declares none.
pub const DEFAULT_MAX_SIZE: usize = 20;

/// How a row is compared against the configured null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullRowMatch {
    /// Drop the row when every non-identity cell is a null value.
    #[default]
    AllCells,
    /// Drop the row when any non-identity cell is a null value.
    AnyCell,
}

/// A canonical header field and the source fields that may fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderField {
    /// Canonical field name in the output header.
    pub name: String,
    /// Source field names, in priority order.
    pub aliases: Vec<String>,
    /// Normalize the chosen value to ISO 8601.
    #[serde(default)]
    pub date: bool,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
            date: false,
        }
    }

    /// Marks the field as a date field.
    #[must_use]
    pub fn date(mut self) -> Self {
        self.date = true;
        self
    }
}

/// The built-in header mapping for DLIS origins and LAS well sections.
pub fn default_header_fields() -> Vec<HeaderField> {
    vec![
        HeaderField::new("well", &["well_name", "WELL"]),
        HeaderField::new("wellbore", &["well_id", "UWI"]),
        HeaderField::new("field", &["field_name", "FLD"]),
        HeaderField::new("operator", &["company", "COMP"]),
        HeaderField::new("serviceCompany", &["producer_name", "SRVC"]),
        HeaderField::new("runNumber", &["run_number", "RUN"]),
        HeaderField::new("descentNumber", &["descent_number"]),
        HeaderField::new("fileSet", &["file_set_name"]),
        HeaderField::new("fileNumber", &["file_number"]),
        HeaderField::new("fileType", &["file_type"]),
        HeaderField::new("source", &["product", "programs"]),
        HeaderField::new("version", &["version"]),
        HeaderField::new("startTime", &["creation_time", "DATE"]).date(),
    ]
}

fn default_null_value() -> f64 {
    DEFAULT_NULL_VALUE
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

/// Options controlling how a logical section is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Sentinel written into padded data cells.
    #[serde(default = "default_null_value")]
    pub null_value: f64,

    /// Cell values (compared as text) that mark a row as null.
    #[serde(default)]
    pub null_values: Vec<String>,

    /// Whether all or any cells must be null for a row to be dropped.
    #[serde(default)]
    pub null_row_match: NullRowMatch,

    /// Element limit used when a channel declares none.
    #[serde(default = "default_max_size")]
    pub default_max_size: usize,

    /// Canonical header fields, in output order.
    #[serde(default = "default_header_fields")]
    pub header_fields: Vec<HeaderField>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            null_value: DEFAULT_NULL_VALUE,
            null_values: Vec::new(),
            null_row_match: NullRowMatch::default(),
            default_max_size: DEFAULT_MAX_SIZE,
            header_fields: default_header_fields(),
        }
    }
}

impl ExtractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_value(mut self, null_value: f64) -> Self {
        self.null_value = null_value;
        self
    }

    pub fn with_null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_null_row_match(mut self, mode: NullRowMatch) -> Self {
        self.null_row_match = mode;
        self
    }

    pub fn with_header_fields(mut self, fields: Vec<HeaderField>) -> Self {
        self.header_fields = fields;
        self
    }
}
