//! Storage path construction and validation.

use std::fmt;

use crate::error::{Result, StoreError};

pub const STUDENTS_COLLECTION: &str = "students";
pub const LOOKUP_COLLECTION: &str = "studentLookup";

const UNKNOWN_SEGMENT: &str = "Unknown";

/// Strips everything but ASCII letters and digits. Empty results become
/// `Unknown`.
pub fn sanitize_segment(value: &str) -> String {
    let cleaned: String = value.chars().filter(char::is_ascii_alphanumeric).collect();
    if cleaned.is_empty() {
        UNKNOWN_SEGMENT.to_string()
    } else {
        cleaned
    }
}

/// Keeps ASCII letters, digits and `_`, the characters allowed in a
/// document id. May return an empty string.
pub fn sanitize_id_segment(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// A validated `collection/segment/.../documentId` path.
///
/// Segments are non-empty and contain only ASCII letters, digits and `_`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| StoreError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 2 {
            return Err(invalid("a path needs a collection and a document id"));
        }
        for segment in &segments {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("segments may only contain letters, digits and '_'"));
            }
        }
        Ok(Self(path.to_string()))
    }

    /// Joins already-sanitized segments.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        Self::parse(&joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    pub fn collection(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    pub fn document_id(&self) -> &str {
        self.segments().last().unwrap_or_default()
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
