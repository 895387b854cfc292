use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use welllog_cli::types::{ConvertResult, SectionOutcome, SectionStatus};

pub fn print_summary(result: &ConvertResult) {
    println!("Snapshot: {}", result.snapshot.display());
    if let Some(format) = result.format {
        println!("Format: {format}");
    }
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Status"),
        header_cell("Documents"),
        header_cell("Frames"),
        header_cell("Curves"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let mut total_documents = 0usize;
    let mut total_curves = 0usize;
    for section in &result.sections {
        total_documents += section.document_count();
        total_curves += section.curve_count;
        table.add_row(vec![
            Cell::new(&section.section_id),
            status_cell(section.status),
            count_cell(section.document_count()),
            frames_cell(section),
            count_cell(section.curve_count),
            output_cell(section),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_documents).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_curves).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    let failures: Vec<&SectionOutcome> = result
        .sections
        .iter()
        .filter(|section| section.status == SectionStatus::Failed)
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for section in failures {
            eprintln!(
                "- {}: {}",
                section.section_id,
                section.message.as_deref().unwrap_or("failed")
            );
        }
    }
}

fn status_cell(status: SectionStatus) -> Cell {
    match status {
        SectionStatus::Success => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        SectionStatus::Failed => Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn frames_cell(section: &SectionOutcome) -> Cell {
    if section.frames.is_empty() {
        return dim_cell("-");
    }
    Cell::new(section.frames.join(", "))
}

fn output_cell(section: &SectionOutcome) -> Cell {
    match (&section.output_file, section.output_file_size) {
        (Some(path), Some(size)) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Cell::new(format!("{name} ({size} B)"))
        }
        _ => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
