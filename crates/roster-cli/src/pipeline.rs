//! Import pipeline with explicit stages.
//!
//! The stages run in this order:
//! 1. **Ingest**: decode the upload and merge its sheets into one table
//! 2. **Map**: infer the field mapping, then apply operator edits
//! 3. **Clean**: normalize phones, dates, years and genders in place
//! 4. **Validate**: mapping errors, then per-row type checks
//! 5. **Deduplicate**: report repeated admission numbers
//! 6. **Order**: commit order and cohort groups
//! 7. **Commit**: batched writes to a document store
//!
//! Stages 1-6 are bundled by [`prepare`]; [`commit`] runs stage 7 on the
//! result.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use roster_commit::{BatchCommitter, CommitOutcome, CommitProgress, DocumentStore};
use roster_ingest::{IngestedWorkbook, Upload, ingest_upload};
use roster_map::{HeaderMapper, MappingResult};
use roster_model::{Field, ImportOptions, ImportTable, SheetInfo, ValidationReport};
use roster_transform::{
    CleanStats, CohortGroup, Duplicate, clean_rows, find_duplicates, group_rows, sort_rows,
};

use crate::logging::redact_value;

/// Everything the review step needs, produced without touching storage.
#[derive(Debug)]
pub struct PreparedImport {
    pub file_name: String,
    pub sheets: Vec<SheetInfo>,
    /// Cleaned table.
    pub table: ImportTable,
    pub mapping: MappingResult,
    pub clean_stats: CleanStats,
    pub report: ValidationReport,
    pub duplicates: Vec<Duplicate>,
    /// Row indices in commit order.
    pub order: Vec<usize>,
    pub groups: Vec<CohortGroup>,
}

impl PreparedImport {
    /// Mapping or validation errors block the commit.
    pub fn is_blocked(&self) -> bool {
        self.report.has_errors()
    }
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Reads and ingests a file from disk.
pub fn ingest(path: &Path, options: &ImportOptions) -> Result<(String, IngestedWorkbook)> {
    let upload = Upload::from_path(path, options)?;
    let ingested = ingest_upload(&upload, options)
        .with_context(|| format!("ingest {}", upload.name))?;
    Ok((upload.name, ingested))
}

// ============================================================================
// Stage 2: Map
// ============================================================================

/// Infers the mapping and applies operator edits (`field=Header`).
pub fn map(table: &ImportTable, edits: &[String]) -> Result<MappingResult> {
    let mut result = HeaderMapper::new().map(table);
    for edit in edits {
        result
            .apply_edit(edit, &table.headers)
            .with_context(|| format!("apply mapping edit '{edit}'"))?;
        debug!(edit = %edit, "mapping edit applied");
    }
    Ok(result)
}

// ============================================================================
// Stages 3-6: Clean, Validate, Deduplicate, Order
// ============================================================================

/// Runs every stage up to, but not including, the commit.
pub fn prepare(path: &Path, options: &ImportOptions, edits: &[String]) -> Result<PreparedImport> {
    let span = info_span!("prepare", file = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let (file_name, ingested) = ingest(path, options)?;
    let IngestedWorkbook { mut table, sheets } = ingested;

    let mapping = map(&table, edits)?;
    let clean_stats = clean_rows(&mut table, &mapping.mapping);
    let report = roster_validate::validate(&table, &mapping.mapping);

    let duplicates = find_duplicates(
        &table,
        mapping.mapping.get(Field::AdmissionNumber),
        options.skip_duplicate_check,
    );
    for duplicate in &duplicates {
        warn!(
            row = duplicate.row + 1,
            first_row = duplicate.first_row + 1,
            value = redact_value(&duplicate.value),
            "duplicate admission number"
        );
    }

    let order = sort_rows(&table, &mapping.mapping, &options.overrides);
    let groups = group_rows(&table, &mapping.mapping, &options.overrides, &order);

    info!(
        rows = table.len(),
        mapped = mapping.mapping.len(),
        errors = report.errors.len(),
        duplicates = duplicates.len(),
        groups = groups.len(),
        duration_ms = start.elapsed().as_millis(),
        "import prepared"
    );

    Ok(PreparedImport {
        file_name,
        sheets,
        table,
        mapping,
        clean_stats,
        report,
        duplicates,
        order,
        groups,
    })
}

// ============================================================================
// Stage 7: Commit
// ============================================================================

/// Commits a prepared import. Returns the outcome and the store.
pub fn commit<S: DocumentStore>(
    prepared: &PreparedImport,
    store: S,
    options: &ImportOptions,
    on_progress: impl FnMut(CommitProgress),
) -> (CommitOutcome, S) {
    let mut committer = BatchCommitter::new(store, options.clone());
    let outcome = committer.commit(
        &prepared.table,
        &prepared.mapping.mapping,
        &prepared.order,
        on_progress,
    );
    (outcome, committer.into_store())
}
