//! Validation error types collected for the review stage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::field::Field;

/// Class of a validation problem. Both block the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// A required field has no source column at all. Reported once.
    Mapping,
    /// A specific row/field fails its type or required-ness rule.
    Validation,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Validation => "validation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    /// Zero-based index into the import rows; `None` for mapping errors.
    pub row: Option<usize>,
    pub field: Field,
    pub message: String,
    pub value: Option<CellValue>,
}

impl ValidationError {
    pub fn mapping(field: Field, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Mapping,
            row: None,
            field,
            message: message.into(),
            value: None,
        }
    }

    pub fn validation(
        row: usize,
        field: Field,
        message: impl Into<String>,
        value: CellValue,
    ) -> Self {
        Self {
            kind: ErrorKind::Validation,
            row: Some(row),
            field,
            message: message.into(),
            value: Some(value),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {}: {}: {}", row + 1, self.field.label(), self.message),
            None => write!(f, "{}: {}", self.field.label(), self.message),
        }
    }
}

/// Every validation error found in one import, fully populated before any
/// commit is attempted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// True when the commit must be blocked.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn mapping_errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(|e| e.kind == ErrorKind::Mapping)
    }

    pub fn validation_errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(|e| e.kind == ErrorKind::Validation)
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }
}
