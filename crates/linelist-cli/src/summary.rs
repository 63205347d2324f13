use std::collections::HashMap;
use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use linelist_cli::pipeline::CleanResult;
use linelist_common::format_numeric;
use linelist_normalization::ColumnProfile;

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    println!(
        "Rows: {} ({} complete cases)",
        result.rows, result.complete_rows
    );
    match result.impute_value {
        Some(value) => println!(
            "Imputed {}: {}",
            result.impute_column,
            format_numeric(value)
        ),
        None => println!("Imputed {}: no observed values", result.impute_column),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Missing (raw)"),
        header_cell("Missing (clean)"),
        header_cell("Distinct"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let before: HashMap<&str, &ColumnProfile> = result
        .before
        .iter()
        .map(|profile| (profile.name.as_str(), profile))
        .collect();
    for profile in &result.after {
        let raw = before.get(profile.name.as_str());
        let (name_cell, raw_missing) = match raw {
            Some(raw) => (Cell::new(&profile.name), Cell::new(raw.missing)),
            None => (
                Cell::new(&profile.name)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                dim_cell("-"),
            ),
        };
        let grew = raw.is_some_and(|raw| profile.missing > raw.missing);
        table.add_row(vec![
            name_cell,
            Cell::new(profile.dtype),
            raw_missing,
            missing_cell(profile.missing, grew),
            Cell::new(profile.distinct),
        ]);
    }
    println!("{table}");

    match &result.outputs {
        Some(paths) => {
            println!("Output: {}", result.output_dir.display());
            let mut table = Table::new();
            table.set_header(vec![header_cell("Snapshot"), header_cell("Path")]);
            apply_table_style(&mut table);
            for path in paths.iter() {
                table.add_row(vec![Cell::new(snapshot_name(path)), Cell::new(path.display())]);
            }
            println!("{table}");
        }
        None => println!("Dry run: no files written"),
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

/// Missing counts that grew during cleaning are values that failed to parse.
fn missing_cell(count: usize, grew: bool) -> Cell {
    if grew {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn snapshot_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
