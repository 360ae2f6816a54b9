//! Option set membership.

use roster_model::{Field, FieldDef, parse_cohort};

/// Header words that show up as cell values when a header row is repeated
/// inside the data.
const HEADER_ECHOES: [&str; 4] = ["gender", "year", "section", "department"];

/// True when the value repeats a header instead of carrying data.
pub fn is_header_echo(def: &FieldDef, value: &str) -> bool {
    value.eq_ignore_ascii_case(def.label)
        || HEADER_ECHOES.iter().any(|w| value.eq_ignore_ascii_case(w))
}

/// True when a Year or Section cell parses to a cohort part the pipeline
/// can file the row under (`5th Year A`, `VI`, `IIIA`, `sec b`).
fn is_cohort_value(field: Field, value: &str) -> bool {
    match field {
        Field::Year => !parse_cohort(value).year.is_empty(),
        Field::Section => !parse_cohort(value).section.is_empty(),
        _ => false,
    }
}

/// Membership is case-insensitive. Header echoes are not errors. Year and
/// Section also accept any value the cohort grammar recognises.
pub fn check(def: &FieldDef, value: &str) -> Option<String> {
    if is_header_echo(def, value)
        || def.options.iter().any(|o| o.eq_ignore_ascii_case(value))
        || is_cohort_value(def.field, value)
    {
        return None;
    }
    Some(format!(
        "'{value}' is not one of the allowed {} values",
        def.label
    ))
}
