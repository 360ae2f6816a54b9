//! Sheet ingestion: per-sheet cohort tokens and the unified import table.
//!
//! Every sheet contributes its data rows to one table. Sheet names such as
//! `II-A` or `3rd Year B` carry a cohort token; when a sheet has no Year or
//! Section column of its own, a synthetic one is appended and filled with
//! the token. Sheets are then concatenated in workbook order with columns
//! aligned by header name, so sheets whose layouts differ still land in the
//! right columns.

use std::collections::HashMap;
use std::time::Instant;

use roster_model::{CellValue, ImportOptions, ImportTable, Row, SheetInfo, parse_cohort, pad_row};
use tracing::{debug, info, info_span};

use crate::decode::{RawSheet, decode};
use crate::error::{IngestError, Result};
use crate::source::Upload;

const YEAR_HEADER: &str = "Year";
const SECTION_HEADER: &str = "Section";

/// Result of ingesting an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedWorkbook {
    pub table: ImportTable,
    /// Sheets that contributed rows, in workbook order.
    pub sheets: Vec<SheetInfo>,
}

/// Decodes and ingests an upload.
pub fn ingest_upload(upload: &Upload, options: &ImportOptions) -> Result<IngestedWorkbook> {
    let span = info_span!("ingest", file = %upload.name);
    let _guard = span.enter();
    let start = Instant::now();

    let raw = decode(upload, options.strict_rows)?;
    let ingested = ingest_sheets(raw, options.max_rows)?;

    info!(
        sheets = ingested.sheets.len(),
        rows = ingested.table.len(),
        columns = ingested.table.width(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(ingested)
}

/// True when some header, reduced to lowercase alphanumerics, equals `name`.
pub fn has_column(headers: &[String], name: &str) -> bool {
    headers.iter().any(|h| alnum_lower(h) == name)
}

fn alnum_lower(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A sheet with its header row resolved and empty rows dropped.
struct PreparedSheet {
    info: SheetInfo,
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Ingests decoded sheets into one table.
///
/// Sheets without any non-empty data row are skipped. Fails with
/// [`IngestError::NoData`] when nothing is left and with
/// [`IngestError::TooManyRows`] when the combined row count exceeds
/// `max_rows`; no partial table is returned in either case.
pub fn ingest_sheets(raw: Vec<RawSheet>, max_rows: usize) -> Result<IngestedWorkbook> {
    let prepared: Vec<PreparedSheet> = raw.into_iter().filter_map(prepare_sheet).collect();
    if prepared.is_empty() {
        return Err(IngestError::NoData);
    }

    let total: usize = prepared.iter().map(|s| s.rows.len()).sum();
    if total > max_rows {
        return Err(IngestError::TooManyRows {
            count: total,
            max: max_rows,
        });
    }

    let mut headers = base_headers(&prepared);
    let placements: Vec<Vec<usize>> = prepared
        .iter()
        .map(|sheet| align_headers(&mut headers, &sheet.headers))
        .collect();

    let width = headers.len();
    let mut rows = Vec::with_capacity(total);
    let mut sheets = Vec::with_capacity(prepared.len());
    for (sheet, placement) in prepared.into_iter().zip(placements) {
        let mut info = sheet.info;
        info.start_index = rows.len();
        for row in sheet.rows {
            let mut unified = vec![CellValue::Empty; width];
            for (value, &target) in row.into_iter().zip(&placement) {
                unified[target] = value;
            }
            rows.push(unified);
        }
        sheets.push(info);
    }

    Ok(IngestedWorkbook {
        table: ImportTable::new(headers, rows),
        sheets,
    })
}

fn prepare_sheet(raw: RawSheet) -> Option<PreparedSheet> {
    let mut headers = raw.headers();
    for (idx, header) in headers.iter_mut().enumerate() {
        if header.is_empty() {
            *header = format!("Column {}", idx + 1);
        }
    }

    let mut rows: Vec<Row> = raw
        .data_rows()
        .iter()
        .filter(|row| !row.iter().all(CellValue::is_empty))
        .cloned()
        .collect();
    if rows.is_empty() {
        debug!(sheet = %raw.name, "skipping sheet without data rows");
        return None;
    }

    // Rows wider than the header row keep their cells under placeholder names.
    let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
    while headers.len() < widest {
        headers.push(format!("Column {}", headers.len() + 1));
    }
    let width = headers.len();
    for row in &mut rows {
        pad_row(row, width);
    }

    let token = parse_cohort(&raw.name);
    if !token.year.is_empty() && !has_column(&headers, "year") {
        append_column(&mut headers, &mut rows, YEAR_HEADER, &token.year);
    }
    if !token.section.is_empty() && !has_column(&headers, "section") {
        append_column(&mut headers, &mut rows, SECTION_HEADER, &token.section);
    }

    debug!(
        sheet = %raw.name,
        rows = rows.len(),
        year = %token.year,
        section = %token.section,
        "prepared sheet"
    );

    Some(PreparedSheet {
        info: SheetInfo {
            name: raw.name,
            year: token.year,
            section: token.section,
            row_count: rows.len(),
            start_index: 0,
        },
        headers,
        rows,
    })
}

fn append_column(headers: &mut Vec<String>, rows: &mut [Row], header: &str, value: &str) {
    headers.push(header.to_string());
    for row in rows {
        row.push(CellValue::text(value));
    }
}

/// Headers of the widest sheet (first one on ties).
fn base_headers(sheets: &[PreparedSheet]) -> Vec<String> {
    let mut widest: Option<&PreparedSheet> = None;
    for sheet in sheets {
        if widest.is_none_or(|w| sheet.headers.len() > w.headers.len()) {
            widest = Some(sheet);
        }
    }
    widest.map(|s| s.headers.clone()).unwrap_or_default()
}

/// Maps each of a sheet's columns to a unified column, appending headers the
/// unified list lacks.
///
/// Headers compare case-insensitively after trimming. A repeated header maps
/// its n-th occurrence to the n-th occurrence in the unified list.
fn align_headers(unified: &mut Vec<String>, sheet_headers: &[String]) -> Vec<usize> {
    let mut occurrences: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, header) in unified.iter().enumerate() {
        occurrences.entry(header_key(header)).or_default().push(idx);
    }

    let mut used: HashMap<String, usize> = HashMap::new();
    sheet_headers
        .iter()
        .map(|header| {
            let key = header_key(header);
            let nth = used.entry(key.clone()).or_insert(0);
            let slots = occurrences.entry(key).or_default();
            let target = match slots.get(*nth) {
                Some(&idx) => idx,
                None => {
                    unified.push(header.clone());
                    slots.push(unified.len() - 1);
                    unified.len() - 1
                }
            };
            *nth += 1;
            target
        })
        .collect()
}

fn header_key(header: &str) -> String {
    header.trim().to_lowercase()
}
