//! Commit ordering and cohort grouping.
//!
//! Sorting decides commit order; grouping is a presentation view. Both work
//! on row indices and leave the table untouched.

use std::cmp::Ordering;

use roster_model::{Field, FieldMapping, ImportOverrides, ImportTable, section_rank, year_rank};
use serde::Serialize;

use crate::cohort::{cell_text, row_cohort};

/// Label of the single group used when no cohort information exists.
pub const ALL_STUDENTS: &str = "All Students";

const UNKNOWN: &str = "Unknown";

/// Rows sharing one cohort, in commit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortGroup {
    pub label: String,
    pub year: String,
    pub section: String,
    pub rows: Vec<usize>,
}

struct SortKey {
    year: u32,
    section: u32,
    identity: String,
}

/// Row indices in commit order.
///
/// Ordered by year rank, then section rank, then admission number
/// (numeric-aware) or the student name when the admission number is empty.
/// The sort is stable.
pub fn sort_rows(table: &ImportTable, mapping: &FieldMapping, overrides: &ImportOverrides) -> Vec<usize> {
    let keys: Vec<SortKey> = table
        .rows
        .iter()
        .map(|row| {
            let cohort = row_cohort(row, mapping, overrides);
            let admission = cell_text(row, mapping, Field::AdmissionNumber);
            SortKey {
                year: year_rank(&cohort.year),
                section: section_rank(&cohort.section),
                identity: if admission.is_empty() {
                    cell_text(row, mapping, Field::Name)
                } else {
                    admission
                },
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| {
        let (ka, kb) = (&keys[a], &keys[b]);
        ka.year
            .cmp(&kb.year)
            .then(ka.section.cmp(&kb.section))
            .then_with(|| natural_cmp(&ka.identity, &kb.identity))
    });
    order
}

/// Buckets rows by cohort, visiting them in `order`.
///
/// When neither Year nor Section is mapped and no override is given, every
/// row lands in one [`ALL_STUDENTS`] group.
pub fn group_rows(
    table: &ImportTable,
    mapping: &FieldMapping,
    overrides: &ImportOverrides,
    order: &[usize],
) -> Vec<CohortGroup> {
    let has_cohort = mapping.is_mapped(Field::Year)
        || mapping.is_mapped(Field::Section)
        || overrides.year.is_some()
        || overrides.section.is_some();
    if !has_cohort {
        return vec![CohortGroup {
            label: ALL_STUDENTS.to_string(),
            year: String::new(),
            section: String::new(),
            rows: order.to_vec(),
        }];
    }

    let mut groups: Vec<CohortGroup> = Vec::new();
    for &idx in order {
        let Some(row) = table.rows.get(idx) else {
            continue;
        };
        let cohort = row_cohort(row, mapping, overrides);
        let year = or_unknown(cohort.year);
        let section = or_unknown(cohort.section);
        let label = format!("{year} - Section {section}");
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.rows.push(idx),
            None => groups.push(CohortGroup {
                label,
                year,
                section,
                rows: vec![idx],
            }),
        }
    }
    groups
}

/// Compares strings with embedded numbers by value: `A2` < `A10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(value: &'a str) -> Self {
        Self { rest: value }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}
