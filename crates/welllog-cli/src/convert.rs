//! Snapshot conversion: scan every section and write one JSON file each.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use welllog_core::scan_section;
use welllog_model::{Document, ExtractionOptions};
use welllog_source::{MemoryGraph, MemorySource};

use crate::types::{ConvertResult, SectionOutcome, SectionStatus};

/// File name suffix of a section with a blank id.
const UNNAMED_SECTION: &str = "-unnamed";

/// Inputs of one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub snapshot: PathBuf,
    pub output_dir: PathBuf,
    pub options: ExtractionOptions,
    /// Convert only this section.
    pub section: Option<String>,
    /// Write single-line JSON instead of pretty JSON.
    pub compact: bool,
}

impl ConvertRequest {
    pub fn new(snapshot: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: snapshot.into(),
            output_dir: output_dir.into(),
            options: ExtractionOptions::default(),
            section: None,
            compact: false,
        }
    }
}

/// Loads a snapshot and converts its sections concurrently.
///
/// A section whose output cannot be written is reported as failed; the
/// remaining sections are still converted.
pub fn convert_snapshot(request: &ConvertRequest) -> Result<ConvertResult> {
    let source = MemorySource::load(&request.snapshot)
        .with_context(|| format!("load snapshot {}", request.snapshot.display()))?;

    let sections: Vec<&MemoryGraph> = match &request.section {
        Some(id) => match source.section(id) {
            Some(graph) => vec![graph],
            None => bail!(
                "section {id} not found in {}",
                request.snapshot.display()
            ),
        },
        None => source.sections().iter().collect(),
    };

    fs::create_dir_all(&request.output_dir)
        .with_context(|| format!("create {}", request.output_dir.display()))?;

    let stem = request
        .snapshot
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let targets = plan_outputs(&sections, request, &stem)?;

    let outcomes: Vec<SectionOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = sections
            .iter()
            .zip(targets)
            .map(|(graph, target)| {
                target.map(|path| scope.spawn(move || convert_section(graph, request, path)))
            })
            .collect();
        handles
            .into_iter()
            .zip(&sections)
            .map(|(handle, graph)| match handle {
                Ok(handle) => handle.join().unwrap_or_else(|_| {
                    error!(section_id = %graph.id, "section worker panicked");
                    SectionOutcome::failed(graph.id.clone(), "section worker panicked")
                }),
                Err(reason) => SectionOutcome::failed(graph.id.clone(), reason),
            })
            .collect()
    });

    let has_errors = outcomes
        .iter()
        .any(|outcome| outcome.status == SectionStatus::Failed);
    info!(
        snapshot = %request.snapshot.display(),
        sections = outcomes.len(),
        has_errors,
        "conversion finished"
    );

    Ok(ConvertResult {
        snapshot: request.snapshot.clone(),
        output_dir: request.output_dir.clone(),
        format: source.format,
        sections: outcomes,
        has_errors,
    })
}

/// Assigns each section its output path, in section order.
///
/// A section is refused (with the reason) when its file would replace the
/// snapshot or a file an earlier section already claimed, as happens with
/// duplicate section ids.
fn plan_outputs(
    sections: &[&MemoryGraph],
    request: &ConvertRequest,
    stem: &str,
) -> Result<Vec<Result<PathBuf, String>>> {
    let snapshot = fs::canonicalize(&request.snapshot)
        .with_context(|| format!("resolve {}", request.snapshot.display()))?;
    let output_dir = fs::canonicalize(&request.output_dir)
        .with_context(|| format!("resolve {}", request.output_dir.display()))?;

    let mut claimed = BTreeSet::new();
    Ok(sections
        .iter()
        .map(|graph| {
            let name = output_file_name(stem, &graph.id);
            if output_dir.join(&name) == snapshot {
                warn!(section_id = %graph.id, file = %name, "output would replace the snapshot; section skipped");
                return Err(format!("output {name} would replace the snapshot"));
            }
            if !claimed.insert(name.clone()) {
                warn!(section_id = %graph.id, file = %name, "output already claimed by an earlier section; section skipped");
                return Err(format!("output {name} already written by an earlier section"));
            }
            Ok(request.output_dir.join(name))
        })
        .collect())
}

fn convert_section(graph: &MemoryGraph, request: &ConvertRequest, path: PathBuf) -> SectionOutcome {
    let documents = scan_section(graph, &request.options);

    match write_documents(&path, &documents, request.compact) {
        Ok(size) => {
            info!(
                section_id = %graph.id,
                path = %path.display(),
                documents = documents.len(),
                bytes = size,
                "section written"
            );
            SectionOutcome {
                section_id: graph.id.clone(),
                status: SectionStatus::Success,
                frames: documents
                    .iter()
                    .map(|document| document.frame_name().unwrap_or_default().to_string())
                    .collect(),
                curve_count: documents.iter().map(|document| document.curves.len()).sum(),
                output_file: Some(path),
                output_file_size: Some(size),
                message: None,
            }
        }
        Err(error) => {
            error!(section_id = %graph.id, path = %path.display(), "{error:#}");
            SectionOutcome::failed(graph.id.clone(), format!("{error:#}"))
        }
    }
}

/// `<snapshot-stem><section-id>.json`, with path separators in the
/// section id replaced and a blank id written as `-unnamed`.
pub fn output_file_name(stem: &str, section_id: &str) -> String {
    if section_id.trim().is_empty() {
        return format!("{stem}{UNNAMED_SECTION}.json");
    }
    let section: String = section_id
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    format!("{stem}{section}.json")
}

fn write_documents(path: &Path, documents: &[Document], compact: bool) -> Result<u64> {
    let bytes = if compact {
        serde_json::to_vec(documents)
    } else {
        serde_json::to_vec_pretty(documents)
    }
    .context("serialize documents")?;
    fs::write(path, &bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_join_stem_and_section() {
        assert_eq!(output_file_name("well", "LF-1"), "wellLF-1.json");
        assert_eq!(output_file_name("well", "a/b"), "wella_b.json");
        assert_eq!(output_file_name("well", ""), "well-unnamed.json");
        assert_eq!(output_file_name("well", "  "), "well-unnamed.json");
    }
}
