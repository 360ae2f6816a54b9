//! The bulk-writer contract and its backends.

mod json_dir;
mod memory;

pub use json_dir::JsonDirStore;
pub use memory::{FailureKind, MemoryStore};

use chrono::{DateTime, SecondsFormat, Utc};
use roster_model::{FieldValue, Record};
use serde_json::{Map, Number, Value};

use crate::error::Result;
use crate::path::DocumentPath;

/// Pending `set` operations, written together by [`DocumentStore::commit`].
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<(DocumentPath, Record)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a full-document write, replacing whatever is stored at `path`.
    pub fn set(&mut self, path: DocumentPath, document: Record) {
        self.ops.push((path, document));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[(DocumentPath, Record)] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<(DocumentPath, Record)> {
        self.ops
    }
}

/// A document store that accepts batched writes.
pub trait DocumentStore {
    fn begin_batch(&self) -> WriteBatch {
        WriteBatch::new()
    }

    /// Writes every operation of `batch`. Server timestamps are resolved to
    /// the commit time.
    fn commit(&mut self, batch: WriteBatch) -> Result<()>;
}

/// Converts a record to JSON, resolving [`FieldValue::ServerTimestamp`] to
/// `now` in RFC 3339 form.
pub fn resolve_document(record: &Record, now: DateTime<Utc>) -> Value {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let fields: Map<String, Value> = record
        .fields
        .iter()
        .map(|(key, value)| {
            let value = match value {
                FieldValue::Text(text) => Value::String(text.clone()),
                FieldValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
                FieldValue::ServerTimestamp => Value::String(timestamp.clone()),
            };
            (key.clone(), value)
        })
        .collect();
    Value::Object(fields)
}
