//! Mapping result types.

use serde::{Deserialize, Serialize};

use roster_model::{Field, FieldMapping, parse_edit};

/// How a header was matched to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Exact match on the alphanumeric form.
    Alphanumeric,
    /// Exact match on the space-stripped form.
    Compact,
    /// Substring match in either direction.
    Substring,
    /// Promoted by sampling the column's values.
    Heuristic,
    /// Set by the operator.
    Manual,
}

impl MatchTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alphanumeric => "exact",
            Self::Compact => "exact (spacing)",
            Self::Substring => "partial",
            Self::Heuristic => "sampled values",
            Self::Manual => "manual",
        }
    }

    /// True for the two exact-match tiers.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Alphanumeric | Self::Compact)
    }
}

/// Per-column outcome of the mapping pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMatch {
    pub column: usize,
    pub header: String,
    /// Best synonym hit for this header, if any.
    pub candidate: Option<(Field, MatchTier)>,
    /// True when the candidate was assigned; false when another column
    /// already claimed the field.
    pub assigned: bool,
}

/// Output of the header mapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    pub mapping: FieldMapping,
    pub matches: Vec<HeaderMatch>,
}

impl MappingResult {
    /// Tier that produced the mapping entry for `field`.
    pub fn tier_for(&self, field: Field) -> Option<MatchTier> {
        let column = self.mapping.get(field)?;
        self.matches
            .iter()
            .find(|m| m.column == column && m.assigned)
            .and_then(|m| m.candidate)
            .filter(|(f, _)| *f == field)
            .map(|(_, tier)| tier)
    }

    /// Headers that did not map to any field.
    pub fn unmapped_headers(&self) -> impl Iterator<Item = &HeaderMatch> {
        self.matches.iter().filter(|m| !m.assigned)
    }

    /// Records an operator edit, keeping the per-column view in sync.
    pub fn set_manual(&mut self, field: Field, column: Option<usize>) {
        if let Some(previous) = self.mapping.get(field) {
            if let Some(m) = self.matches.iter_mut().find(|m| m.column == previous) {
                m.assigned = false;
            }
        }
        if let Some(column) = column {
            if let Some(other) = self.mapping.field_for_column(column) {
                self.mapping.set(other, None);
            }
            if let Some(m) = self.matches.iter_mut().find(|m| m.column == column) {
                m.candidate = Some((field, MatchTier::Manual));
                m.assigned = true;
            }
        }
        self.mapping.set(field, column);
    }

    /// Applies an operator edit of the form `field=Header Name`.
    pub fn apply_edit(&mut self, edit: &str, headers: &[String]) -> roster_model::Result<()> {
        let (field, column) = parse_edit(edit, headers)?;
        self.set_manual(field, column);
        Ok(())
    }
}
