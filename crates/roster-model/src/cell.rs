//! Cell values as decoded from a spreadsheet.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// Rows carry text, numbers and (for workbooks with typed date cells) native
/// dates. Blank cells and whitespace-only strings are both treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

/// A row of cells, index-aligned to the import headers.
pub type Row = Vec<CellValue>;

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for blank cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Trimmed string form of the cell; empty cells yield an empty string.
    pub fn to_trimmed_string(&self) -> String {
        match self {
            Self::Text(value) => value.trim().to_string(),
            other => other.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Number(number) => write!(f, "{}", format_number(*number)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats whole numbers without a fractional part (`9876543210`, not `9876543210.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Days between the spreadsheet serial-date epoch and the Unix epoch.
pub const SERIAL_EPOCH_OFFSET: f64 = 25569.0;

/// Converts a spreadsheet serial date (days since the 1899-12-30 epoch) to a
/// calendar date. The fractional time-of-day part is discarded.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let unix_days = (serial - SERIAL_EPOCH_OFFSET).floor();
    if unix_days.abs() > 3_000_000.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(unix_days as i64))
}

/// Pads a row with empty cells up to `len`. Rows are never truncated.
pub fn pad_row(row: &mut Row, len: usize) {
    if row.len() < len {
        row.resize(len, CellValue::Empty);
    }
}
