//! Mapping engine implementation.

use std::time::Instant;

use roster_model::{CellValue, Field, FieldMapping, ImportTable};
use tracing::{debug, info, info_span};

use crate::synonyms::{SYNONYMS, lookup};
use crate::types::{HeaderMatch, MappingResult, MatchTier};
use crate::utils::HeaderForms;

/// Number of non-empty values sampled by the section heuristic.
const SECTION_SAMPLE_SIZE: usize = 10;
/// Share of sampled values that must be single uppercase letters.
const SECTION_LETTER_RATIO: f64 = 0.5;

/// Maps headers to canonical fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderMapper {
    /// Skip the sampled-values section heuristic.
    pub disable_section_heuristic: bool,
}

impl HeaderMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the synonym hit for one header.
    ///
    /// Exact tiers stop at the first hit. The substring tier scans the whole
    /// table and keeps the last key that matches.
    pub fn match_header(&self, header: &str) -> Option<(Field, MatchTier)> {
        let forms = HeaderForms::new(header);
        if forms.is_blank() {
            return None;
        }
        if let Some(field) = lookup(&forms.alnum) {
            return Some((field, MatchTier::Alphanumeric));
        }
        if let Some(field) = lookup(&forms.compact) {
            return Some((field, MatchTier::Compact));
        }

        let mut hit = None;
        for (key, field) in SYNONYMS {
            let key_alnum: String = key.chars().filter(char::is_ascii_alphanumeric).collect();
            if forms.alnum.contains(key_alnum.as_str())
                || key_alnum.contains(forms.alnum.as_str())
                || forms.spaced.contains(key)
            {
                hit = Some((*field, MatchTier::Substring));
            }
        }
        hit
    }

    /// Maps every header of `table`.
    ///
    /// Exact hits are assigned before substring hits; within a tier the
    /// leftmost column claims a field. Columns that lose a field to an
    /// earlier column keep their candidate in [`MappingResult::matches`].
    pub fn map(&self, table: &ImportTable) -> MappingResult {
        let span = info_span!("map", columns = table.width());
        let _guard = span.enter();
        let start = Instant::now();

        let mut matches: Vec<HeaderMatch> = table
            .headers
            .iter()
            .enumerate()
            .map(|(column, header)| HeaderMatch {
                column,
                header: header.clone(),
                candidate: self.match_header(header),
                assigned: false,
            })
            .collect();

        let mut mapping = FieldMapping::new();
        for exact_pass in [true, false] {
            for m in &mut matches {
                let Some((field, tier)) = m.candidate else {
                    continue;
                };
                if tier.is_exact() != exact_pass {
                    continue;
                }
                if mapping.is_mapped(field) {
                    debug!(header = %m.header, field = %field, "field already mapped by an earlier column");
                    continue;
                }
                mapping.set(field, Some(m.column));
                m.assigned = true;
                debug!(header = %m.header, field = %field, tier = tier.label(), "mapped header");
            }
        }

        if !self.disable_section_heuristic && !mapping.is_mapped(Field::Section) {
            let promoted = matches
                .iter_mut()
                .filter(|m| !m.assigned)
                .find(|m| looks_like_section(table, m.column));
            if let Some(m) = promoted {
                mapping.set(Field::Section, Some(m.column));
                m.candidate = Some((Field::Section, MatchTier::Heuristic));
                m.assigned = true;
                debug!(header = %m.header, "promoted column to section from sampled values");
            }
        }

        info!(
            mapped = mapping.len(),
            unmapped = matches.iter().filter(|m| !m.assigned).count(),
            duration_ms = start.elapsed().as_millis(),
            "mapping complete"
        );
        MappingResult { mapping, matches }
    }
}

/// Maps a table's headers with the default mapper.
pub fn map_headers(table: &ImportTable) -> MappingResult {
    HeaderMapper::new().map(table)
}

/// True when more than half of the column's first sampled non-empty values
/// are single uppercase letters.
pub fn looks_like_section(table: &ImportTable, column: usize) -> bool {
    let sample: Vec<String> = table
        .rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|cell| !cell.is_empty())
        .take(SECTION_SAMPLE_SIZE)
        .map(CellValue::to_trimmed_string)
        .collect();
    if sample.is_empty() {
        return false;
    }
    let letters = sample.iter().filter(|v| is_single_uppercase(v)).count();
    letters as f64 / sample.len() as f64 > SECTION_LETTER_RATIO
}

fn is_single_uppercase(value: &str) -> bool {
    let mut chars = value.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tiers() {
        let mapper = HeaderMapper::new();
        assert_eq!(
            mapper.match_header("Roll No."),
            Some((Field::AdmissionNumber, MatchTier::Alphanumeric))
        );
        assert_eq!(
            mapper.match_header("E - Mail"),
            Some((Field::Email, MatchTier::Alphanumeric))
        );
        assert_eq!(
            mapper.match_header("D.O.B"),
            Some((Field::DateOfBirth, MatchTier::Alphanumeric))
        );
    }

    #[test]
    fn test_blank_header_never_matches() {
        assert_eq!(HeaderMapper::new().match_header("  "), None);
        assert_eq!(HeaderMapper::new().match_header("#"), None);
    }

    #[test]
    fn test_single_uppercase() {
        assert!(is_single_uppercase("B"));
        assert!(!is_single_uppercase("b"));
        assert!(!is_single_uppercase("AB"));
        assert!(!is_single_uppercase(""));
    }
}
