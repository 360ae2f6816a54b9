//! Unified import table and per-sheet bookkeeping.

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, Row, pad_row};

/// One ingested sheet. `start_index` is the offset of the sheet's first row
/// inside the unified row collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    pub name: String,
    pub year: String,
    pub section: String,
    pub row_count: usize,
    pub start_index: usize,
}

/// Headers plus rows, index-aligned.
///
/// Every row is kept at exactly the header length: short rows are padded with
/// empty cells, and adding a column pads every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl ImportTable {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Self { headers, rows };
        table.normalize_rows();
        table
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pads rows to the header length. Rows longer than the headers gain
    /// placeholder headers instead of losing cells.
    pub fn normalize_rows(&mut self) {
        let widest = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        while self.headers.len() < widest {
            let name = format!("Column {}", self.headers.len() + 1);
            self.headers.push(name);
        }
        let width = self.headers.len();
        for row in &mut self.rows {
            pad_row(row, width);
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// True when every row's length equals the header length.
    pub fn is_rectangular(&self) -> bool {
        let width = self.headers.len();
        self.rows.iter().all(|row| row.len() == width)
    }
}
