use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use obds_core::PipelineError;
use obds_model::ModelError;
use obds_output::ResourceBundle;
use obds_cli::pipeline::ConsolidatedRow;

pub fn print_consolidated(rows: &[ConsolidatedRow], rejected: &[ModelError]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Report"),
        header_cell("Reason"),
        header_cell("Version"),
        header_cell("Patient"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, row) in rows.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&row.report_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&row.reason),
            Cell::new(row.version),
            match &row.patient {
                Some(pseudonym) => Cell::new(short_pseudonym(pseudonym)),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
    if !rejected.is_empty() {
        eprintln!("Rejected:");
        for error in rejected {
            eprintln!("- {error}");
        }
    }
}

pub fn print_batch_summary(bundle: Option<&ResourceBundle>, mapped: usize, failures: &[PipelineError]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Resource"), header_cell("Entries")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if let Some(bundle) = bundle {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for entry in bundle.entries() {
            let kind = entry.resource.resource_type.as_str();
            match counts.iter_mut().find(|(name, _)| *name == kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((kind, 1)),
            }
        }
        for (kind, count) in counts {
            table.add_row(vec![Cell::new(kind), Cell::new(count)]);
        }
    }
    table.add_row(vec![
        Cell::new("Reports mapped")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(mapped).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Failures")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(failures.len(), Color::Red),
    ]);
    eprintln!("{table}");
    if !failures.is_empty() {
        eprintln!("Errors:");
        for failure in failures {
            eprintln!("- {failure}");
        }
    }
}

/// First 12 hex digits; enough to tell pseudonyms apart on screen.
fn short_pseudonym(pseudonym: &str) -> String {
    match pseudonym.get(..12) {
        Some(prefix) => format!("{prefix}…"),
        None => pseudonym.to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
