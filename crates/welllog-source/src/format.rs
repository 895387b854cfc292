//! Source format identification.

use std::io::Read;
use std::path::Path;

use welllog_model::WellLogFormat;

use crate::error::{Result, SourceError};

/// Bytes inspected when sniffing a file.
pub const SNIFF_LEN: usize = 256;

/// Identifies the format of a file from its leading bytes.
///
/// LAS files open with a `~V` version section; DLIS files carry binary
/// storage-unit labels, so any NUL byte in the sniffed window marks them.
pub fn identify_format(head: &[u8]) -> WellLogFormat {
    let head = &head[..head.len().min(SNIFF_LEN)];
    if head.contains(&0) {
        return WellLogFormat::Dlis;
    }
    let text = String::from_utf8_lossy(head);
    let first_section = text
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('#'));
    match first_section {
        Some(line) if line.to_ascii_uppercase().starts_with("~V") => WellLogFormat::Las,
        _ => WellLogFormat::Unknown,
    }
}

/// Reads the head of a file and identifies its format.
///
/// # Errors
///
/// Returns [`SourceError::Io`] when the file cannot be opened or read.
pub fn identify_path(path: &Path) -> Result<WellLogFormat> {
    let file = std::fs::File::open(path).map_err(|error| SourceError::io(path, error))?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|error| SourceError::io(path, error))?;
    let format = identify_format(&head);
    tracing::debug!(path = %path.display(), format = %format, "identified source format");
    Ok(format)
}
