//! Workbook decoding via calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use roster_model::{CellValue, Row, serial_to_date};

use super::RawSheet;
use crate::error::Result;

/// Decodes every worksheet of an XLSX/XLS/ODS workbook, in workbook order.
pub fn decode_workbook(bytes: &[u8]) -> Result<Vec<RawSheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let rows: Vec<Row> = range
            .rows()
            .map(|row| row.iter().map(cell_to_value).collect())
            .collect();
        tracing::debug!(sheet = %name, rows = rows.len(), "decoded worksheet");
        sheets.push(RawSheet::new(name, rows));
    }
    Ok(sheets)
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::text(b.to_string()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            serial_to_date(serial).map_or(CellValue::Number(serial), CellValue::Date)
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
    }
}
