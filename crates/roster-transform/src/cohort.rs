//! Effective cohort of a row.

use roster_model::{CellValue, Field, FieldMapping, ImportOverrides, parse_cohort};

/// Year and section a row is filed under. Empty strings mean unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RowCohort {
    pub year: String,
    pub section: String,
}

/// Resolves a row's cohort.
///
/// Operator overrides win. Otherwise the mapped Year and Section cells are
/// parsed as cohort tokens, falling back to their raw text. A combined cell
/// such as `IIIA` in the Year column also supplies the section when the row
/// has none.
pub fn row_cohort(row: &[CellValue], mapping: &FieldMapping, overrides: &ImportOverrides) -> RowCohort {
    let year_cell = cell_text(row, mapping, Field::Year);
    let section_cell = cell_text(row, mapping, Field::Section);
    let year_token = parse_cohort(&year_cell);

    let year = match &overrides.year {
        Some(year) => year.clone(),
        None if !year_token.year.is_empty() => year_token.year.clone(),
        None => year_cell,
    };

    let section = match &overrides.section {
        Some(section) => section.clone(),
        None => {
            let token = parse_cohort(&section_cell);
            if !token.section.is_empty() {
                token.section
            } else if !section_cell.is_empty() {
                section_cell
            } else {
                year_token.section
            }
        }
    };

    RowCohort { year, section }
}

pub(crate) fn cell_text(row: &[CellValue], mapping: &FieldMapping, field: Field) -> String {
    mapping
        .get(field)
        .and_then(|col| row.get(col))
        .map(CellValue::to_trimmed_string)
        .unwrap_or_default()
}
