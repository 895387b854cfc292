//! Loading extraction options from TOML.
//!
//! Every field is optional; missing fields take their defaults.
//!
//! ```toml
//! null_value = -999.25
//! null_values = ["-999.25", "-9999"]
//! null_row_match = "all-cells"
//! default_max_size = 20
//!
//! [[header_fields]]
//! name = "well"
//! aliases = ["well_name", "WELL"]
//! ```

use std::path::Path;

use tracing::debug;
use welllog_model::ExtractionOptions;

use crate::error::ConfigError;

/// Reads extraction options from a TOML file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Toml`] when it does not parse.
pub fn load_options(path: &Path) -> Result<ExtractionOptions, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options: ExtractionOptions = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        null_values = options.null_values.len(),
        header_fields = options.header_fields.len(),
        "loaded extraction options"
    );
    Ok(options)
}

/// Renders options as TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Render`] when serialization fails.
pub fn render_options(options: &ExtractionOptions) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(options)?)
}
