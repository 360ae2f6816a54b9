//! Committing import rows to a document store.
//!
//! Each accepted row becomes two documents: the student record at
//! `students/{department}/{year}/{section}/{studentId}` and a lookup entry
//! at `studentLookup/{studentId}`. Rows are written in commit order in
//! batches of at most 50 rows.
//!
//! # Storage
//!
//! The [`DocumentStore`] trait is the bulk-writer seam. Two backends ship
//! with the crate:
//!
//! - [`MemoryStore`]: in-process, with injectable commit failures
//! - [`JsonDirStore`]: one JSON file per document under a root directory,
//!   written atomically
//!
//! # Failures
//!
//! A row that cannot be built (missing admission number or name) is counted
//! and skipped. A batch the store rejects counts all of its rows as failed
//! and the run continues. A connectivity failure stops the run.

mod committer;
mod error;
mod path;
mod record;
mod store;

pub use committer::{BatchCommitter, CommitOutcome, CommitProgress};
pub use error::{CommitError, Result, RowError, StoreError};
pub use path::{
    DocumentPath, LOOKUP_COLLECTION, STUDENTS_COLLECTION, sanitize_id_segment, sanitize_segment,
};
pub use record::{RecordBuilder, StudentWrite};
pub use store::{
    DocumentStore, FailureKind, JsonDirStore, MemoryStore, WriteBatch, resolve_document,
};
