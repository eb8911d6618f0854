use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use seqsub_core::{MERGED_FILE_NAME, RunSummary};
use seqsub_model::{Destination, FieldRequirements};

pub fn print_summary(summary: &RunSummary) {
    if summary.dry_run {
        println!("Dry run: no files written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Destination"),
        header_cell("Input"),
        header_cell("Kept"),
        header_cell("Excluded"),
        header_cell("Missing mandatory fields"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for entry in &summary.destinations {
        table.add_row(vec![
            Cell::new(entry.destination.label()).add_attribute(Attribute::Bold),
            Cell::new(entry.input_rows),
            Cell::new(entry.kept_rows),
            count_cell(entry.excluded_rows, Color::Yellow),
            missing_cell(&entry.missing_mandatory),
            output_cell(entry.output.as_ref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Merged")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(summary.merged_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell(format!("{} columns", summary.merged_columns)),
        dim_cell(if summary.dry_run { "-" } else { MERGED_FILE_NAME }),
    ]);
    println!("{table}");
    print_exclusions(summary);
}

fn print_exclusions(summary: &RunSummary) {
    let rows: Vec<(Destination, &str, String)> = summary
        .reports
        .iter()
        .flat_map(|report| {
            report.excluded.iter().map(move |sample| {
                (
                    report.destination,
                    sample.entity_id.as_str(),
                    sample.blank_fields.join(", "),
                )
            })
        })
        .collect();
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Destination"),
        header_cell("Sample"),
        header_cell("Blank mandatory fields"),
    ]);
    apply_summary_table_style(&mut table);
    for (destination, sample, fields) in rows {
        table.add_row(vec![
            Cell::new(destination.label()),
            Cell::new(sample),
            Cell::new(fields).fg(Color::Yellow),
        ]);
    }
    println!("Excluded samples:");
    println!("{table}");
}

pub fn print_fields(listings: &[(Destination, FieldRequirements)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Destination"),
        header_cell("Prefix"),
        header_cell("Mandatory"),
        header_cell("Optional"),
    ]);
    apply_summary_table_style(&mut table);
    for (destination, requirements) in listings {
        let prefix = destination.column_prefix();
        table.add_row(vec![
            Cell::new(destination.label()).add_attribute(Attribute::Bold),
            if prefix.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(prefix)
            },
            Cell::new(requirements.mandatory().join("\n")),
            Cell::new(requirements.optional().join("\n")).fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn missing_cell(fields: &[String]) -> Cell {
    if fields.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(fields.join(", ")).fg(Color::Yellow)
    }
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path.and_then(|path| path.file_name()) {
        Some(name) => Cell::new(name.to_string_lossy()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
