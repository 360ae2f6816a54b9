//! Duplicate admission numbers.
//!
//! Duplicates are reported before commit for operator confirmation. During
//! commit every repeat gets a numeric suffix so no two records share a key.

use std::collections::{BTreeMap, BTreeSet};

use roster_model::{CellValue, ImportTable};
use serde::Serialize;
use tracing::{info, info_span, warn};

/// A row whose admission number already appeared earlier in the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// Zero-based row index.
    pub row: usize,
    pub value: String,
    /// Row where the value first appeared.
    pub first_row: usize,
}

/// Scans the admission number column once and reports every repeat.
///
/// Returns nothing when the column is unmapped or the check is skipped.
pub fn find_duplicates(table: &ImportTable, column: Option<usize>, skip: bool) -> Vec<Duplicate> {
    let span = info_span!("dedupe", rows = table.len());
    let _guard = span.enter();

    if skip {
        info!("duplicate check skipped by operator");
        return Vec::new();
    }
    let Some(column) = column else {
        return Vec::new();
    };

    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut duplicates = Vec::new();
    for (row, cells) in table.rows.iter().enumerate() {
        let value = cells
            .get(column)
            .map(CellValue::to_trimmed_string)
            .unwrap_or_default();
        if value.is_empty() {
            continue;
        }
        match seen.get(&value) {
            Some(&first_row) => duplicates.push(Duplicate {
                row,
                value,
                first_row,
            }),
            None => {
                seen.insert(value, row);
            }
        }
    }

    if !duplicates.is_empty() {
        warn!(count = duplicates.len(), "duplicate admission numbers found");
    }
    duplicates
}

/// Run-scoped resolver that keeps keys unique by suffixing repeats.
#[derive(Debug, Default)]
pub struct DuplicateResolver {
    seen: BTreeSet<String>,
}

impl DuplicateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `value` on first sight, then `value_1`, `value_2`, … for
    /// repeats, skipping any suffix that is itself already taken.
    pub fn resolve(&mut self, value: &str) -> String {
        if self.seen.insert(value.to_string()) {
            return value.to_string();
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{value}_{n}");
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
