//! Required fields must be mapped.

use roster_model::{CATALOG, FieldMapping, ValidationError};

/// One error per required field without a source column.
pub fn check(mapping: &FieldMapping) -> Vec<ValidationError> {
    CATALOG
        .iter()
        .filter(|def| def.required && !mapping.is_mapped(def.field))
        .map(|def| {
            ValidationError::mapping(
                def.field,
                format!("required field '{}' is not mapped to any column", def.label),
            )
        })
        .collect()
}
