use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use filewrap::CloseOutcome;

use crate::commands::{FilterResult, StatsResult, StatsScope};

pub fn stats_table(result: &StatsResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table.add_row(vec![Cell::new("Scope"), Cell::new(scope_label(result.scope))]);
    table.add_row(vec![Cell::new("Entries"), Cell::new(result.count)]);
    for (name, value) in [
        ("Sum", result.sum),
        ("Mean", result.mean),
        ("Variance", result.variance),
        ("Std dev", result.std_dev),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(format_value(value))]);
    }
    table
}

pub fn print_stats(result: &StatsResult) {
    println!("{}", stats_table(result));
}

pub fn print_filter(result: &FilterResult) {
    println!("Removed: {}", result.removed);
    println!("Kept: {}", result.kept);
}

/// Report a close outcome and return the process exit code for it.
pub fn report_outcome(outcome: &CloseOutcome) -> i32 {
    match outcome {
        CloseOutcome::Discarded => 0,
        CloseOutcome::Written { path, lines, .. } => {
            println!("Wrote {lines} line(s) to {}", path.display());
            0
        }
        CloseOutcome::NoPath { .. } => {
            eprintln!("error: no output path");
            1
        }
        CloseOutcome::Failed { path, reason, .. } => {
            eprintln!("error: could not write {}: {reason}", path.display());
            1
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn scope_label(scope: StatsScope) -> String {
    match scope {
        StatsScope::All => "all rows".to_string(),
        StatsScope::Row(row) => format!("row {row}"),
        StatsScope::Rows(low, high) => {
            let (low, high) = filewrap::range::normalize(low, high);
            format!("rows {low}..={high}")
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value}")
    } else {
        format!("{value:.6}")
    }
}
