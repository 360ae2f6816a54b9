//! Non-negative numbers.

use roster_model::CellValue;

pub fn check(value: &CellValue) -> Option<String> {
    let parsed = match value {
        CellValue::Number(n) => Some(*n),
        other => other.to_trimmed_string().parse::<f64>().ok(),
    };
    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 => None,
        Some(_) => Some("must not be negative".to_string()),
        None => Some(format!("'{}' is not a number", value.to_trimmed_string())),
    }
}
