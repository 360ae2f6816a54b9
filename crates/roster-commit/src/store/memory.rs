//! In-process store.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;

use super::{DocumentStore, WriteBatch, resolve_document};
use crate::error::{Result, StoreError};
use crate::path::DocumentPath;

/// Failure injected into a [`MemoryStore`] commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connectivity,
    Rejected,
}

/// Keeps documents in a map. Commits are all-or-nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: BTreeMap<DocumentPath, Value>,
    committed_batches: Vec<usize>,
    attempts: usize,
    failures: BTreeMap<usize, FailureKind>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `attempt`-th commit (1-based) fail with `kind`.
    pub fn fail_commit(mut self, attempt: usize, kind: FailureKind) -> Self {
        self.failures.insert(attempt, kind);
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|(p, _)| p.as_str() == path)
            .map(|(_, doc)| doc)
    }

    pub fn documents(&self) -> &BTreeMap<DocumentPath, Value> {
        &self.documents
    }

    /// Operation counts of the batches that committed, in order.
    pub fn committed_batches(&self) -> &[usize] {
        &self.committed_batches
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl DocumentStore for MemoryStore {
    fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        self.attempts += 1;
        match self.failures.get(&self.attempts) {
            Some(FailureKind::Connectivity) => {
                return Err(StoreError::Connectivity {
                    message: "connection reset".to_string(),
                });
            }
            Some(FailureKind::Rejected) => {
                return Err(StoreError::Rejected {
                    message: "write quota exceeded".to_string(),
                });
            }
            None => {}
        }

        let now = Utc::now();
        let count = batch.len();
        for (path, record) in batch.into_ops() {
            self.documents.insert(path, resolve_document(&record, now));
        }
        self.committed_batches.push(count);
        Ok(())
    }
}
