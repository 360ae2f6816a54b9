use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_cli::pipeline::PreparedImport;
use roster_commit::{CommitError, CommitOutcome};
use roster_model::{ErrorKind, Field, ValidationError};

use crate::types::ImportResult;

/// Issue rows printed before the rest are summarized.
const MAX_ISSUE_ROWS: usize = 100;

pub fn print_preview(prepared: &PreparedImport) {
    println!("File: {}", prepared.file_name);
    println!(
        "Rows: {} from {} sheet(s)",
        prepared.table.len(),
        prepared.sheets.len()
    );
    print_sheet_table(prepared);
    print_mapping_table(prepared);
    print_group_table(prepared);
    print_clean_stats(prepared);
    print_issue_table(&prepared.report.errors);
    print_duplicate_table(prepared);
}

pub fn print_import_summary(result: &ImportResult) {
    print_preview(&result.prepared);
    println!();
    if let Some(reason) = &result.blocked {
        eprintln!("Import blocked: {reason}");
        return;
    }
    if result.dry_run {
        println!("Dry run: nothing was committed.");
        return;
    }
    if let Some(outcome) = &result.outcome {
        println!("Storage: {}", result.store_dir.display());
        print_outcome(outcome);
    }
}

fn print_sheet_table(prepared: &PreparedImport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Year"),
        header_cell("Section"),
        header_cell("Rows"),
        header_cell("First Row"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for sheet in &prepared.sheets {
        table.add_row(vec![
            Cell::new(&sheet.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            text_or_dash(&sheet.year),
            text_or_dash(&sheet.section),
            Cell::new(sheet.row_count),
            Cell::new(sheet.start_index + 1),
        ]);
    }
    println!("{table}");
}

fn print_mapping_table(prepared: &PreparedImport) {
    let headers = &prepared.table.headers;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Column"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for field in Field::all() {
        let column = prepared
            .mapping
            .mapping
            .get(field)
            .and_then(|idx| headers.get(idx));
        let required = if field.is_required() {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        let column_cell = match column {
            Some(header) => Cell::new(header),
            None if field.is_required() => Cell::new("unmapped")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        };
        let tier = prepared
            .mapping
            .tier_for(field)
            .map_or_else(|| dim_cell("-"), |tier| Cell::new(tier.label()));
        table.add_row(vec![Cell::new(field.label()), required, column_cell, tier]);
    }
    println!();
    println!("Mapping:");
    println!("{table}");

    let unmapped: Vec<&str> = prepared
        .mapping
        .unmapped_headers()
        .map(|m| m.header.as_str())
        .collect();
    if !unmapped.is_empty() {
        println!("Ignored columns: {}", unmapped.join(", "));
    }
}

fn print_group_table(prepared: &PreparedImport) {
    if prepared.groups.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Cohort"), header_cell("Students")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for group in &prepared.groups {
        table.add_row(vec![Cell::new(&group.label), Cell::new(group.rows.len())]);
    }
    println!();
    println!("Cohorts:");
    println!("{table}");
}

fn print_clean_stats(prepared: &PreparedImport) {
    let stats = &prepared.clean_stats;
    println!(
        "Cleaned: {} phone(s), {} date(s); cleared {} year(s), {} gender(s), {} unreadable date(s)",
        stats.phones_normalized,
        stats.dates_normalized,
        stats.years_cleared,
        stats.genders_cleared,
        stats.dates_cleared
    );
}

fn print_issue_table(errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Message"),
        header_cell("Value"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for error in errors.iter().take(MAX_ISSUE_ROWS) {
        table.add_row(vec![
            kind_cell(error.kind),
            error
                .row
                .map_or_else(|| dim_cell("-"), |row| Cell::new(row + 1)),
            Cell::new(error.field.label()),
            Cell::new(&error.message),
            error
                .value
                .as_ref()
                .map_or_else(|| dim_cell("-"), |value| Cell::new(value.to_string())),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    if errors.len() > MAX_ISSUE_ROWS {
        println!("... and {} more", errors.len() - MAX_ISSUE_ROWS);
    }
}

fn print_duplicate_table(prepared: &PreparedImport) {
    if prepared.duplicates.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Admission Number"),
        header_cell("First Seen"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for duplicate in &prepared.duplicates {
        table.add_row(vec![
            Cell::new(duplicate.row + 1),
            Cell::new(&duplicate.value).fg(Color::Yellow),
            Cell::new(duplicate.first_row + 1),
        ]);
    }
    println!();
    println!("Duplicate admission numbers:");
    println!("{table}");
}

fn print_outcome(outcome: &CommitOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Committed"),
        header_cell("Failed"),
        header_cell("Skipped"),
        header_cell("Batches"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 0..4 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table.add_row(vec![
        count_cell(outcome.success_count, Color::Green),
        count_cell(outcome.error_count, Color::Red),
        count_cell(outcome.skipped_count, Color::Yellow),
        Cell::new(outcome.batches.len()),
    ]);
    println!("{table}");

    let failures: Vec<_> = outcome
        .errors
        .iter()
        .filter(|e| !matches!(e.error, CommitError::Aborted))
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for failure in failures {
            eprintln!("- {failure}");
        }
    }
    if let Some(error) = &outcome.aborted {
        eprintln!("{}", error.user_message());
        if let Some(suggestion) = error.suggestion() {
            eprintln!("hint: {suggestion}");
        }
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(kind: ErrorKind) -> Cell {
    match kind {
        ErrorKind::Mapping => Cell::new("MAPPING")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        ErrorKind::Validation => Cell::new("ROW").fg(Color::Red),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
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
