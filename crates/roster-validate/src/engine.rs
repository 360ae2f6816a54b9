//! Validation passes.

use std::time::Instant;

use roster_model::{CellValue, ErrorKind, FieldMapping, ImportTable, ValidationError, ValidationReport};
use tracing::{info, info_span};

use crate::checks;

/// Validates every row of a cleaned table.
///
/// Mapping errors come first, then row errors in row order. Collection never
/// stops early.
pub fn validate(table: &ImportTable, mapping: &FieldMapping) -> ValidationReport {
    let span = info_span!("validate", rows = table.len(), mapped = mapping.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut errors = checks::mapping::check(mapping);
    for (idx, row) in table.rows.iter().enumerate() {
        errors.extend(validate_row(idx, row, mapping));
    }

    let report = ValidationReport { errors };
    info!(
        mapping_errors = report.count(ErrorKind::Mapping),
        validation_errors = report.count(ErrorKind::Validation),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    report
}

/// Checks the mapped cells of one row. `index` is zero-based.
pub fn validate_row(index: usize, row: &[CellValue], mapping: &FieldMapping) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (field, col) in mapping.iter() {
        let def = field.def();
        let value = row.get(col).cloned().unwrap_or_default();
        if value.is_empty() {
            if def.required {
                errors.push(ValidationError::validation(
                    index,
                    field,
                    format!("{} is required", def.label),
                    value,
                ));
            }
            continue;
        }
        if let Some(message) = checks::check_value(def, &value) {
            errors.push(ValidationError::validation(index, field, message, value));
        }
    }
    errors
}
