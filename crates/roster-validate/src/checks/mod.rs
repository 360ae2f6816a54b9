//! Per-field checks.
//!
//! Each check looks at one non-empty value and returns a message when the
//! value is invalid.

pub mod date;
pub mod email;
pub mod mapping;
pub mod number;
pub mod phone;
pub mod select;

use roster_model::{CellValue, FieldDef, FieldType};

/// Runs the type check for `def` against a non-empty value.
pub fn check_value(def: &FieldDef, value: &CellValue) -> Option<String> {
    let text = value.to_trimmed_string();
    match def.kind {
        FieldType::Text => None,
        FieldType::Email => email::check(&text),
        FieldType::Tel => phone::check(&text),
        FieldType::Select => select::check(def, &text),
        FieldType::Number => number::check(value),
        FieldType::Date => date::check(value),
    }
}
