//! Cell cleanup for mapped columns.
//!
//! Cleaning is a fixed point: running it on already-cleaned rows changes
//! nothing. Rows keep their length.

use std::time::Instant;

use roster_model::{CellValue, Field, FieldMapping, FieldType, ImportTable, year_rank};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::datetime::normalize_date_text;

/// Phone numbers keep at most this many digits.
pub const MAX_PHONE_DIGITS: usize = 11;
/// Phone numbers with fewer digits are left for the validator to report.
pub const MIN_PHONE_DIGITS: usize = 9;

/// Counts of what cleaning changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub phones_normalized: usize,
    pub phones_too_short: usize,
    pub years_cleared: usize,
    pub genders_cleared: usize,
    pub dates_normalized: usize,
    pub dates_cleared: usize,
}

/// True when a mapped column holds dates: the field is a date field, or a
/// text field whose header has `date` or `dob` as a whole word.
pub fn is_date_column(field: Field, header: &str) -> bool {
    match field.kind() {
        FieldType::Date => true,
        FieldType::Text => header
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word.eq_ignore_ascii_case("date") || word.eq_ignore_ascii_case("dob")),
        _ => false,
    }
}

/// Reduces a phone value to its digits.
///
/// More than eleven digits are cut to the first eleven. Values with fewer
/// than nine digits are returned unchanged.
pub fn clean_phone(value: &CellValue) -> CellValue {
    let digits: String = value
        .to_trimmed_string()
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect();
    if digits.len() < MIN_PHONE_DIGITS {
        return value.clone();
    }
    CellValue::Text(digits)
}

/// Cleans one mapped cell.
pub fn clean_value(field: Field, header: &str, value: &CellValue) -> CellValue {
    if value.is_empty() {
        return value.clone();
    }
    if is_date_column(field, header) {
        return normalize_date_text(value).map_or(CellValue::Empty, CellValue::Text);
    }
    match field {
        Field::Year if is_misplaced_section(&value.to_trimmed_string()) => CellValue::Empty,
        Field::Gender if value.to_trimmed_string().eq_ignore_ascii_case("gender") => {
            CellValue::Empty
        }
        _ if field.kind() == FieldType::Tel => clean_phone(value),
        _ => value.clone(),
    }
}

/// Cleans every mapped cell of `table` in place.
pub fn clean_rows(table: &mut ImportTable, mapping: &FieldMapping) -> CleanStats {
    let span = info_span!("clean", rows = table.len());
    let _guard = span.enter();
    let start = Instant::now();

    let columns: Vec<(Field, usize, String)> = mapping
        .iter()
        .filter_map(|(field, col)| table.headers.get(col).map(|h| (field, col, h.clone())))
        .collect();

    let mut stats = CleanStats::default();
    for row in &mut table.rows {
        for (field, col, header) in &columns {
            let Some(cell) = row.get_mut(*col) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            let cleaned = clean_value(*field, header, cell);
            record_change(&mut stats, *field, header, cell, &cleaned);
            *cell = cleaned;
        }
    }

    if stats.dates_cleared > 0 {
        warn!(count = stats.dates_cleared, "unparseable dates cleared");
    }
    info!(
        phones = stats.phones_normalized,
        short_phones = stats.phones_too_short,
        dates = stats.dates_normalized,
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    stats
}

fn record_change(
    stats: &mut CleanStats,
    field: Field,
    header: &str,
    before: &CellValue,
    after: &CellValue,
) {
    if is_date_column(field, header) {
        if after.is_empty() {
            stats.dates_cleared += 1;
        } else if before != after {
            stats.dates_normalized += 1;
        }
        return;
    }
    match field {
        Field::Year if after.is_empty() => stats.years_cleared += 1,
        Field::Gender if after.is_empty() => stats.genders_cleared += 1,
        _ if field.kind() == FieldType::Tel => {
            if !matches!(after, CellValue::Text(t) if is_digits(t)) {
                stats.phones_too_short += 1;
            } else if before != after {
                stats.phones_normalized += 1;
            }
        }
        _ => {}
    }
}

fn is_digits(value: &str) -> bool {
    value.len() >= MIN_PHONE_DIGITS && value.chars().all(|c| c.is_ascii_digit())
}

/// A lone uppercase letter in the Year column is a section, unless it is
/// one of the Roman years `I`, `V` or `X`.
fn is_misplaced_section(value: &str) -> bool {
    let mut chars = value.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
        && year_rank(value) == 0
}
