//! Date coercion must succeed.

use roster_model::CellValue;
use roster_transform::normalize_date;

pub fn check(value: &CellValue) -> Option<String> {
    match normalize_date(value) {
        Some(_) => None,
        None => Some(format!("'{}' is not a recognizable date", value.to_trimmed_string())),
    }
}
