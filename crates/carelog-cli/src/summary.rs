//! Terminal tables for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use carelog_ingest::ColumnSummary;
use carelog_model::Selector;

use crate::commands::{ChartOutcome, SummaryReport};

/// Columns with at least this share of nulls are highlighted.
const SPARSE_COLUMN_RATIO: f64 = 0.5;

pub fn print_summary(report: &SummaryReport) {
    println!("File: {}", report.input.display());
    println!("Rows: {}", report.rows);
    println!("{}", summary_table(&report.columns));
}

/// The "Summary of data" table: one row per CSV column.
pub fn summary_table(columns: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Count"),
        header_cell("Nulls"),
        header_cell("Unique"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in columns {
        let (min, max, mean) = match column.numeric {
            Some(stats) => (
                Cell::new(format_stat(stats.min)),
                Cell::new(format_stat(stats.max)),
                Cell::new(format_stat(stats.mean)),
            ),
            None => (dim_cell("-"), dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            dim_cell(&column.dtype),
            Cell::new(column.count),
            null_cell(column),
            Cell::new(column.unique),
            min,
            max,
            mean,
        ]);
    }
    table
}

pub fn print_selectors() {
    println!("{}", selector_table());
}

/// Recognized chart kinds and what they draw.
pub fn selector_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Chart"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for selector in Selector::ALL {
        let chart = if selector.is_categorical() { "bar" } else { "line" };
        table.add_row(vec![
            Cell::new(selector.as_str()).fg(Color::Blue),
            Cell::new(chart),
            Cell::new(selector.description()),
        ]);
    }
    table
}

pub fn print_chart_outcome(outcome: &ChartOutcome) {
    println!(
        "Wrote {} ({} bytes, {} points)",
        outcome.output.display(),
        outcome.bytes,
        outcome.points
    );
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

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn null_cell(column: &ColumnSummary) -> Cell {
    if column.null_count == 0 {
        dim_cell(0)
    } else if column.null_ratio() >= SPARSE_COLUMN_RATIO {
        Cell::new(column.null_count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(column.null_count)
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
