//! Decoding uploads into raw sheets.
//!
//! A raw sheet is the sheet name plus its cells as a list of rows. The first
//! row is the header row; nothing is interpreted yet.

mod csv;
mod workbook;

use roster_model::{CellValue, Row};

use crate::error::Result;
use crate::source::{SourceKind, Upload};

/// One decoded sheet before header handling.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Header row as trimmed text. Missing headers are empty strings.
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(CellValue::to_trimmed_string).collect())
            .unwrap_or_default()
    }

    /// Data rows (everything after the header row).
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// Decodes every sheet of an upload, in workbook order.
///
/// A CSV upload yields one sheet named after the file stem.
pub fn decode(upload: &Upload, strict_rows: bool) -> Result<Vec<RawSheet>> {
    match upload.kind {
        SourceKind::Csv => {
            let sheet = csv::decode_csv(upload.stem(), &upload.bytes, strict_rows)?;
            Ok(vec![sheet])
        }
        SourceKind::Xlsx | SourceKind::Xls | SourceKind::Ods => {
            workbook::decode_workbook(&upload.bytes)
        }
    }
}
