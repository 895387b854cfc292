//! Audit trail for conversions.
//!
//! One CSV row per converted section, appended to a caller-chosen file. The
//! header row is written only when the file is new or empty.

use std::fs::{File, Metadata, OpenOptions};
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::types::{ConvertResult, SectionOutcome};

/// One audit row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub status: String,
    pub file_name: String,
    pub input_file_path: String,
    pub input_file_size: u64,
    pub input_file_creation_date: String,
    pub file_checksum: String,
    pub logical_file_id: String,
    pub document_count: usize,
    pub output_file: String,
    pub output_file_size: Option<u64>,
    pub message: String,
}

/// Compute the SHA256 hash of a file as lowercase hex.
pub fn compute_file_sha256(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let bytes = io::copy(&mut reader, &mut hasher)?;
    let digest = hex::encode(hasher.finalize());
    debug!(path = %path.display(), bytes, sha256 = %digest, "file hashed");
    Ok(digest)
}

/// Birth time of a file, or its modification time where the filesystem
/// keeps none, as UTC `YYYY-MM-DDTHH:MM:SSZ`.
fn file_creation_date(meta: &Metadata) -> Option<String> {
    let time = meta.created().or_else(|_| meta.modified()).ok()?;
    Some(
        DateTime::<Utc>::from(time)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string(),
    )
}

/// Builds the audit rows of a conversion, one per section.
pub fn audit_records(result: &ConvertResult) -> Result<Vec<AuditRecord>> {
    let snapshot = &result.snapshot;
    let meta = std::fs::metadata(snapshot)
        .with_context(|| format!("stat {}", snapshot.display()))?;
    let input_file_size = meta.len();
    let input_file_creation_date = file_creation_date(&meta).unwrap_or_default();
    let file_checksum = compute_file_sha256(snapshot)
        .with_context(|| format!("checksum {}", snapshot.display()))?;
    let file_name = snapshot
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let input_file_path = snapshot.display().to_string();

    Ok(result
        .sections
        .iter()
        .map(|section| AuditRecord {
            status: section.status.to_string(),
            file_name: file_name.clone(),
            input_file_path: input_file_path.clone(),
            input_file_size,
            input_file_creation_date: input_file_creation_date.clone(),
            file_checksum: file_checksum.clone(),
            logical_file_id: section.section_id.clone(),
            document_count: section.document_count(),
            output_file: output_file_text(section),
            output_file_size: section.output_file_size,
            message: section.message.clone().unwrap_or_default(),
        })
        .collect())
}

fn output_file_text(section: &SectionOutcome) -> String {
    section
        .output_file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default()
}

/// Appends rows to the audit CSV, writing the header only for a new file.
pub fn append_audit_rows(path: &Path, records: &[AuditRecord]) -> Result<()> {
    let is_new = !matches!(std::fs::metadata(path), Ok(meta) if meta.len() > 0);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open audit log {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(is_new)
        .from_writer(file);
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("write audit row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush audit log {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = records.len(),
        header = is_new,
        "audit rows appended"
    );
    Ok(())
}
