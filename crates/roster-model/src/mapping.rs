//! Canonical field to source column mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::Field;

/// Maps canonical fields to column indices in the import headers.
///
/// Built once per import by the header mapper; afterwards it only changes
/// through explicit operator edits. A field absent from the map is unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    columns: BTreeMap<Field, usize>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn is_mapped(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// Maps `field` to `column`, or unmaps it when `column` is `None`.
    pub fn set(&mut self, field: Field, column: Option<usize>) {
        match column {
            Some(column) => {
                self.columns.insert(field, column);
            }
            None => {
                self.columns.remove(&field);
            }
        }
    }

    /// The field mapped to `column`, if any.
    pub fn field_for_column(&self, column: usize) -> Option<Field> {
        self.columns
            .iter()
            .find(|(_, idx)| **idx == column)
            .map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        self.columns.iter().map(|(field, idx)| (*field, *idx))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Parses an operator edit of the form `field=Header Name`.
///
/// The field is a storage key or label. The header is matched
/// case-insensitively after trimming; an empty header means "unmap".
pub fn parse_edit(edit: &str, headers: &[String]) -> Result<(Field, Option<usize>)> {
    let (field, header) = edit
        .split_once('=')
        .ok_or_else(|| ModelError::InvalidMappingEdit(edit.to_string()))?;
    let field: Field = field.parse()?;
    let header = header.trim();
    if header.is_empty() {
        return Ok((field, None));
    }
    let column = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(header))
        .ok_or_else(|| ModelError::InvalidMappingEdit(edit.to_string()))?;
    Ok((field, Some(column)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["Roll No".to_string(), "Name".to_string()]
    }

    #[test]
    fn set_and_unset() {
        let mut mapping = FieldMapping::new();
        mapping.set(Field::Name, Some(1));
        assert_eq!(mapping.get(Field::Name), Some(1));
        assert_eq!(mapping.field_for_column(1), Some(Field::Name));
        mapping.set(Field::Name, None);
        assert!(!mapping.is_mapped(Field::Name));
    }

    #[test]
    fn parse_edit_finds_header() {
        assert_eq!(
            parse_edit("admissionNumber=roll no", &headers()).unwrap(),
            (Field::AdmissionNumber, Some(0))
        );
        assert_eq!(parse_edit("name=", &headers()).unwrap(), (Field::Name, None));
    }

    #[test]
    fn parse_edit_rejects_unknown_header() {
        let err = parse_edit("name=Surname", &headers()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidMappingEdit(_)));
        assert!(parse_edit("name", &headers()).is_err());
    }
}
