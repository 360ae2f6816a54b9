//! Operator overrides and run limits for one import.

use serde::{Deserialize, Serialize};

/// Upper bound on rows committed per storage batch.
pub const MAX_BATCH_SIZE: usize = 50;

/// Cohort selection made by the operator before commit. When set, a value
/// replaces whatever was parsed from the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOverrides {
    pub department: Option<String>,
    pub year: Option<String>,
    pub section: Option<String>,
}

impl ImportOverrides {
    /// Drops blank values so `Some("")` behaves like no override.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            department: clean(self.department),
            year: clean(self.year),
            section: clean(self.section),
        }
    }
}

/// Immutable configuration passed into the ingester and committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub overrides: ImportOverrides,
    /// Skip the pre-commit duplicate admission number scan.
    pub skip_duplicate_check: bool,
    /// Rows per storage batch, clamped to `1..=MAX_BATCH_SIZE`.
    pub batch_size: usize,
    /// Combined row limit across all sheets.
    pub max_rows: usize,
    /// Upload size limit in bytes.
    pub max_file_size: u64,
    /// Synthesize a timestamp-based admission number for rows without one.
    pub synthesize_missing_admission: bool,
    /// Fail the ingest on malformed rows instead of dropping them.
    pub strict_rows: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            overrides: ImportOverrides::default(),
            skip_duplicate_check: false,
            batch_size: MAX_BATCH_SIZE,
            max_rows: 1000,
            max_file_size: 10 * 1024 * 1024,
            synthesize_missing_admission: true,
            strict_rows: false,
        }
    }
}

impl ImportOptions {
    pub fn with_overrides(mut self, overrides: ImportOverrides) -> Self {
        self.overrides = overrides.normalized();
        self
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }
}
