//! Batched commit loop.

use std::time::Instant;

use roster_model::{FieldMapping, ImportOptions, ImportTable};
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};

use crate::error::{CommitError, RowError, StoreError};
use crate::record::{RecordBuilder, StudentWrite};
use crate::store::DocumentStore;

/// Progress reported after each row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommitProgress {
    /// Rows handled so far, committed or not.
    pub processed: usize,
    pub total: usize,
    /// `processed / total * 100`.
    pub percent: f64,
}

impl CommitProgress {
    #[must_use]
    pub fn new(processed: usize, total: usize) -> Self {
        let percent = if total > 0 {
            processed as f64 / total as f64 * 100.0
        } else {
            100.0
        };
        Self {
            processed,
            total,
            percent,
        }
    }
}

/// Result of one commit run.
#[derive(Debug, Default)]
pub struct CommitOutcome {
    pub success_count: usize,
    /// Rows that were rejected or whose batch failed.
    pub error_count: usize,
    /// Rows never attempted because the run stopped.
    pub skipped_count: usize,
    /// Per-row failures in commit order, including skipped rows.
    pub errors: Vec<RowError>,
    /// Rows written by each successful batch.
    pub batches: Vec<usize>,
    /// Ids of committed students in commit order.
    pub student_ids: Vec<String>,
    /// The connectivity failure that stopped the run, if any.
    pub aborted: Option<StoreError>,
}

impl CommitOutcome {
    pub fn is_success(&self) -> bool {
        self.error_count == 0 && self.skipped_count == 0 && self.aborted.is_none()
    }

    fn fail(&mut self, row: usize, error: CommitError) {
        self.error_count += 1;
        self.errors.push(RowError { row, error });
    }
}

/// Commits rows to a [`DocumentStore`] in bounded batches.
pub struct BatchCommitter<S> {
    store: S,
    options: ImportOptions,
}

impl<S: DocumentStore> BatchCommitter<S> {
    pub fn new(store: S, options: ImportOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Commits the rows of `table` listed in `order`.
    ///
    /// Rows that cannot be built are counted and skipped. A connectivity
    /// failure stops the run; batches already written stay written.
    pub fn commit(
        &mut self,
        table: &ImportTable,
        mapping: &FieldMapping,
        order: &[usize],
        mut on_progress: impl FnMut(CommitProgress),
    ) -> CommitOutcome {
        let batch_size = self.options.effective_batch_size();
        let span = info_span!("commit", rows = order.len(), batch_size);
        let _guard = span.enter();
        let start = Instant::now();

        let options = self.options.clone();
        let mut builder = RecordBuilder::new(mapping, &options);
        let mut outcome = CommitOutcome::default();
        let mut pending: Vec<StudentWrite> = Vec::with_capacity(batch_size);
        let total = order.len();

        for (position, &row) in order.iter().enumerate() {
            let cells = table.rows.get(row).map(Vec::as_slice).unwrap_or_default();
            match builder.build(row, cells) {
                Ok(write) => pending.push(write),
                Err(e) => {
                    error!(row = row + 1, error = %e, "row not committed");
                    outcome.fail(row, e);
                }
            }

            if pending.len() >= batch_size
                && let Err(e) = self.flush(&mut pending, &mut outcome)
            {
                Self::abort(&mut outcome, &order[position + 1..], e);
                break;
            }
            on_progress(CommitProgress::new(position + 1, total));
        }

        if outcome.aborted.is_none()
            && !pending.is_empty()
            && let Err(e) = self.flush(&mut pending, &mut outcome)
        {
            Self::abort(&mut outcome, &[], e);
        }

        info!(
            success = outcome.success_count,
            errors = outcome.error_count,
            skipped = outcome.skipped_count,
            batches = outcome.batches.len(),
            duration_ms = start.elapsed().as_millis(),
            "commit complete"
        );
        outcome
    }

    /// Writes the pending rows as one batch. Returns the error only when it
    /// should stop the run.
    fn flush(
        &mut self,
        pending: &mut Vec<StudentWrite>,
        outcome: &mut CommitOutcome,
    ) -> Result<(), StoreError> {
        let writes = std::mem::take(pending);
        let batch_number = outcome.batches.len() + 1;
        let mut batch = self.store.begin_batch();
        for write in &writes {
            batch.set(write.student_path.clone(), write.record.clone());
            batch.set(write.lookup_path.clone(), write.lookup.clone());
        }
        let operations = batch.len();

        match self.store.commit(batch) {
            Ok(()) => {
                debug!(batch = batch_number, rows = writes.len(), operations, "batch committed");
                outcome.success_count += writes.len();
                outcome.batches.push(writes.len());
                outcome
                    .student_ids
                    .extend(writes.into_iter().map(|write| write.student_id));
                Ok(())
            }
            Err(e) => {
                error!(batch = batch_number, rows = writes.len(), error = %e, "batch failed");
                for write in &writes {
                    outcome.fail(
                        write.row,
                        CommitError::BatchFailed {
                            batch: batch_number,
                            message: e.to_string(),
                        },
                    );
                }
                if e.is_connectivity() { Err(e) } else { Ok(()) }
            }
        }
    }

    fn abort(outcome: &mut CommitOutcome, remaining: &[usize], error: StoreError) {
        warn!(
            remaining = remaining.len(),
            "storage unreachable, stopping import"
        );
        for &row in remaining {
            outcome.skipped_count += 1;
            outcome.errors.push(RowError {
                row,
                error: CommitError::Aborted,
            });
        }
        outcome.aborted = Some(error);
    }
}
