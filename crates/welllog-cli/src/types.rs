use std::fmt;
use std::path::PathBuf;

use welllog_model::WellLogFormat;

#[derive(Debug)]
pub struct ConvertResult {
    pub snapshot: PathBuf,
    pub output_dir: PathBuf,
    pub format: Option<WellLogFormat>,
    pub sections: Vec<SectionOutcome>,
    pub has_errors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    Success,
    Failed,
}

impl SectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionStatus::Success => "success",
            SectionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one logical section of a snapshot.
#[derive(Debug, Clone)]
pub struct SectionOutcome {
    pub section_id: String,
    pub status: SectionStatus,
    pub frames: Vec<String>,
    pub curve_count: usize,
    pub output_file: Option<PathBuf>,
    pub output_file_size: Option<u64>,
    pub message: Option<String>,
}

impl SectionOutcome {
    pub fn failed(section_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            status: SectionStatus::Failed,
            frames: Vec::new(),
            curve_count: 0,
            output_file: None,
            output_file_size: None,
            message: Some(message.into()),
        }
    }

    pub fn document_count(&self) -> usize {
        self.frames.len()
    }
}
