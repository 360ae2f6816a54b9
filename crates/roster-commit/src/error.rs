//! Commit and storage error types.

use std::path::PathBuf;

use roster_model::Field;
use thiserror::Error;

/// Errors raised by a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be reached. Aborts the whole commit.
    #[error("storage unavailable: {message}")]
    Connectivity { message: String },

    /// The backend refused a batch.
    #[error("batch rejected: {message}")]
    Rejected { message: String },

    /// A document path failed validation.
    #[error("invalid document path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to replace {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document serialization error.
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures that mean the backend is unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Connectivity { .. } => {
                "The storage backend could not be reached. Import stopped.".to_string()
            }
            Self::Rejected { message } => format!("The storage backend refused a batch: {message}"),
            Self::InvalidPath { path, .. } => format!("'{path}' is not a valid storage path."),
            Self::Io { path, .. } | Self::AtomicWriteFailed { target_path: path, .. } => {
                format!("Could not write to {}.", path.display())
            }
            Self::Serialization(_) => "A record could not be encoded for storage.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Connectivity { .. } => Some(
                "Check the connection to the storage backend and import the remaining rows again."
                    .into(),
            ),
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("Check that you have permission to write to the storage directory.".into())
            }
            Self::Rejected { .. } | Self::InvalidPath { .. } | Self::Serialization(_) => None,
        }
    }
}

/// Why a single row was not committed.
#[derive(Debug, Error)]
pub enum CommitError {
    /// A required value is empty after all fallbacks.
    #[error("{} is missing", .field.label())]
    MissingRequired { field: Field },

    /// The admission number has no characters usable in a document id.
    #[error("admission number '{value}' has no letters or digits")]
    UnusableAdmissionNumber { value: String },

    /// The batch holding this row failed.
    #[error("batch {batch} failed: {message}")]
    BatchFailed { batch: usize, message: String },

    /// The run stopped before this row's batch was written.
    #[error("not written: import stopped after a storage connectivity failure")]
    Aborted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A failed row with its zero-based index in the import table.
#[derive(Debug)]
pub struct RowError {
    pub row: usize,
    pub error: CommitError,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row + 1, self.error)
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
