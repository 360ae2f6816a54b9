//! Date coercion.
//!
//! Accepts native dates, spreadsheet serial numbers (as numbers or digit
//! strings), ISO 8601 strings and a set of common written formats. Day-first
//! formats are tried before month-first ones, so `05/06/2024` is 5 June.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use roster_model::{CellValue, serial_to_date};

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 16] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d/%m/%y",
    "%d-%b-%y",
];

/// Coerces a cell to a calendar date. Unparseable values yield `None`.
pub fn normalize_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Empty => None,
        CellValue::Date(date) => Some(*date),
        CellValue::Number(serial) => serial_to_date(*serial),
        CellValue::Text(text) => parse_date_text(text),
    }
}

/// Coerces a cell to `YYYY-MM-DD`.
pub fn normalize_date_text(value: &CellValue) -> Option<String> {
    normalize_date(value).map(format_date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Best-effort parse of a written date.
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_serial_text(trimmed) {
        return trimmed.parse::<f64>().ok().and_then(serial_to_date);
    }
    if trimmed.len() == 8 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in &DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

/// Digit strings of up to six digits (with an optional fraction) are
/// serial dates; `45292` is 2024-01-01.
fn is_serial_text(value: &str) -> bool {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    !whole.is_empty()
        && whole.len() <= 6
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_strings() {
        assert_eq!(parse_date_text("2024-01-15"), ymd(2024, 1, 15));
        assert_eq!(parse_date_text("2024-01-15T10:30:00"), ymd(2024, 1, 15));
        assert_eq!(parse_date_text("2024-01-15T10:30:00Z"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_serial_numbers() {
        assert_eq!(normalize_date(&CellValue::Number(45292.0)), ymd(2024, 1, 1));
        assert_eq!(parse_date_text("45292"), ymd(2024, 1, 1));
        assert_eq!(parse_date_text("45292.5"), ymd(2024, 1, 1));
    }

    #[test]
    fn test_day_first() {
        assert_eq!(parse_date_text("05/06/2024"), ymd(2024, 6, 5));
        assert_eq!(parse_date_text("15.01.2024"), ymd(2024, 1, 15));
        assert_eq!(parse_date_text("15-01-2024"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_month_first_fallback() {
        assert_eq!(parse_date_text("01/15/2024"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_written_months() {
        assert_eq!(parse_date_text("15 Jan 2024"), ymd(2024, 1, 15));
        assert_eq!(parse_date_text("15-Jan-2024"), ymd(2024, 1, 15));
        assert_eq!(parse_date_text("January 15, 2024"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_compact() {
        assert_eq!(parse_date_text("20240115"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date_text("next tuesday"), None);
        assert_eq!(parse_date_text("31/02/2024"), None);
        assert_eq!(normalize_date(&CellValue::Empty), None);
    }

    #[test]
    fn test_native_date() {
        let date = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
        assert_eq!(
            normalize_date_text(&CellValue::Date(date)),
            Some("2001-02-03".to_string())
        );
    }
}
