use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, warn};

use welllog_cli::audit::{append_audit_rows, audit_records};
use welllog_cli::convert::{ConvertRequest, convert_snapshot};
use welllog_cli::types::ConvertResult;
use welllog_core::{load_options, render_options};
use welllog_model::ExtractionOptions;
use welllog_source::identify_path;

use crate::cli::{ConfigArgs, ConvertArgs, IdentifyArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let options = resolve_options(args.config.as_deref())?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.snapshot));

    let request = ConvertRequest {
        snapshot: args.snapshot.clone(),
        output_dir,
        options,
        section: args.section.clone(),
        compact: args.compact,
    };
    let result = convert_snapshot(&request)?;

    if let Some(path) = &args.audit_csv {
        let records = audit_records(&result)?;
        append_audit_rows(path, &records)?;
        info!(path = %path.display(), rows = records.len(), "audit log updated");
    }
    Ok(result)
}

/// Prints the detected format of each file. Returns false when any file
/// could not be read.
pub fn run_identify(args: &IdentifyArgs) -> bool {
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Format")]);
    apply_table_style(&mut table);
    let mut all_read = true;
    for path in &args.files {
        match identify_path(path) {
            Ok(format) => {
                table.add_row(vec![Cell::new(path.display()), Cell::new(format)]);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "cannot identify file");
                table.add_row(vec![Cell::new(path.display()), dim_cell("unreadable")]);
                all_read = false;
            }
        }
    }
    println!("{table}");
    all_read
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let options = resolve_options(args.config.as_deref())?;
    let rendered = render_options(&options).context("render configuration")?;
    print!("{rendered}");
    Ok(())
}

fn resolve_options(config: Option<&Path>) -> Result<ExtractionOptions> {
    match config {
        Some(path) => Ok(load_options(path)?),
        None => Ok(ExtractionOptions::default()),
    }
}

fn default_output_dir(snapshot: &Path) -> PathBuf {
    snapshot
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
