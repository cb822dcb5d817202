use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ghg_cli::pipeline::{ConvertResult, TableSummary};

/// Per-table summary, written to stderr so stdout stays clean CSV.
pub fn print_summary(result: &ConvertResult) {
    eprintln!("{}", summary_table(&result.summaries));
    eprintln!(
        "Total: {} records from {} tables",
        result.table.len(),
        result.summaries.len()
    );
}

pub fn summary_table(summaries: &[TableSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Records"),
        header_cell("Dropped"),
        header_cell("Override"),
        header_cell("Pattern"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    for idx in 2..9 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(summary.year),
            Cell::new(summary.path.display()),
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            Cell::new(summary.records),
            count_cell(summary.dropped_rows),
            count_cell(summary.unit_override),
            count_cell(summary.unit_pattern),
            count_cell(summary.unit_default),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(count)
    }
}
