//! CSV decoding. A CSV upload is a single sheet.

use roster_model::{CellValue, Row};

use super::RawSheet;
use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes CSV bytes into one raw sheet.
///
/// Records the reader cannot decode (invalid UTF-8, broken quoting) are
/// skipped with a warning, or rejected when `strict_rows` is set.
pub fn decode_csv(name: &str, bytes: &[u8], strict_rows: bool) -> Result<RawSheet> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows: Vec<Row> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(record.iter().map(parse_field).collect()),
            Err(err) => {
                let line = err
                    .position()
                    .map_or(index as u64 + 1, ::csv::Position::line);
                if strict_rows {
                    return Err(IngestError::MalformedRow {
                        sheet: name.to_string(),
                        line,
                        message: err.to_string(),
                    });
                }
                if matches!(err.kind(), ::csv::ErrorKind::Io(_)) {
                    return Err(IngestError::CsvParse {
                        message: err.to_string(),
                    });
                }
                tracing::warn!(sheet = name, line, error = %err, "skipping malformed row");
            }
        }
    }

    Ok(RawSheet::new(name, rows))
}

fn parse_field(value: &str) -> CellValue {
    if value.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(value)
    }
}
