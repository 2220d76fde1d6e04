use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cci_core::DatasetSummary;

use crate::types::TagResult;

pub fn print_summary(result: &TagResult) {
    println!("{}", summary_table(&result.datasets));

    if !result.not_found.is_empty() {
        println!();
        println!("Terms not found in the vocabulary:");
        for line in &result.not_found {
            println!("  {line}");
        }
    }

    println!();
    println!(
        "Identifiers: {} ({} new), files tagged: {}",
        result.identifiers, result.minted, result.tagged_files
    );
    if result.diagnostics.is_empty() {
        println!("No errors recorded");
    } else {
        eprintln!(
            "{} problems recorded in {}",
            result.diagnostics.len(),
            result.outputs.errors.display()
        );
    }
    println!("DRS: {}", result.outputs.drs.display());
    println!("Tags: {}", result.outputs.tags.display());
    println!("Identifier store: {}", result.drs_store.display());
    let elapsed = result.finished - result.started;
    println!(
        "Started {}, finished {} ({:.1}s)",
        result.started.format("%Y-%m-%d %H:%M:%S"),
        result.finished.format("%H:%M:%S"),
        elapsed.num_milliseconds() as f64 / 1000.0
    );
}

fn summary_table(datasets: &[DatasetSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Files"),
        header_cell("Tagged"),
        header_cell("Identifiers"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_files = 0usize;
    let mut total_tagged = 0usize;
    let mut total_identifiers = 0usize;
    for summary in datasets {
        total_files += summary.files;
        total_tagged += summary.tagged_files;
        total_identifiers += summary.identifiers;
        table.add_row(vec![
            dataset_cell(summary),
            Cell::new(summary.files),
            Cell::new(summary.tagged_files),
            count_cell(summary.identifiers),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_files).add_attribute(Attribute::Bold),
        Cell::new(total_tagged).add_attribute(Attribute::Bold),
        Cell::new(total_identifiers).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(13)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Datasets without identifiers are dimmed; they also appear in error.txt.
fn dataset_cell(summary: &DatasetSummary) -> Cell {
    if summary.identifiers == 0 {
        dim_cell(&summary.dataset)
    } else {
        Cell::new(&summary.dataset)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count)
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
