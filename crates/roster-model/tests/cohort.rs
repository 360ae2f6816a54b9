//! Round-trip properties for the cohort token grammar.

use proptest::prelude::*;

use roster_model::cohort::{
    CohortToken, GREEK_SECTIONS, format_ordinal_year, parse_cohort, roman_numeral, year_word,
};

fn letter() -> impl Strategy<Value = char> {
    (b'A'..=b'Z').prop_map(char::from)
}

fn year_number() -> impl Strategy<Value = u32> {
    1u32..=12
}

fn ordinal_prefix(n: u32) -> String {
    format_ordinal_year(n).trim_end_matches(" Year").to_string()
}

fn is_roman(text: &str) -> bool {
    (1..=12).any(|n| roman_numeral(n) == Some(text))
}

proptest! {
    #[test]
    fn roman_with_separator(n in year_number(), section in letter(), sep in prop::sample::select(vec![" ", "-", " - ", "_"])) {
        let roman = roman_numeral(n).unwrap();
        let expected = CohortToken::new(roman, section.to_string());
        prop_assert_eq!(parse_cohort(&format!("{roman}{sep}{section}")), expected.clone());
        prop_assert_eq!(parse_cohort(&format!("{roman}{sep}{}", section.to_ascii_lowercase())), expected);
    }

    #[test]
    fn roman_joined_with_letter(n in year_number(), section in letter()) {
        let roman = roman_numeral(n).unwrap();
        let surface = format!("{roman}{section}");
        // `I` + `V` spells the numeral `IV`; those strings are bare years.
        prop_assume!(!is_roman(&surface));
        prop_assert_eq!(parse_cohort(&surface), CohortToken::new(roman, section.to_string()));
    }

    #[test]
    fn ordinal_year_with_letter(n in year_number(), section in letter()) {
        let expected = CohortToken::new(format_ordinal_year(n), section.to_string());
        let prefix = ordinal_prefix(n);
        prop_assert_eq!(parse_cohort(&format!("{prefix} Year {section}")), expected.clone());
        prop_assert_eq!(parse_cohort(&format!("{} year-{}", prefix.to_uppercase(), section.to_ascii_lowercase())), expected.clone());
        prop_assert_eq!(parse_cohort(&format!("{prefix}{section}")), expected);
    }

    #[test]
    fn written_year_with_letter(n in year_number(), section in letter()) {
        let word = year_word(n).unwrap();
        let expected = CohortToken::new(format!("{word} Year"), section.to_string());
        prop_assert_eq!(parse_cohort(&format!("{word} Year {section}")), expected.clone());
        prop_assert_eq!(parse_cohort(&format!("{} YEAR - {section}", word.to_uppercase())), expected);
    }

    #[test]
    fn keyword_roman_with_letter(n in year_number(), section in letter()) {
        let roman = roman_numeral(n).unwrap();
        let expected = CohortToken::new(roman, section.to_string());
        prop_assert_eq!(parse_cohort(&format!("Year {roman} {section}")), expected.clone());
        prop_assert_eq!(parse_cohort(&format!("YEAR-{roman}-{section}")), expected);
    }

    #[test]
    fn bare_years(n in year_number()) {
        let roman = roman_numeral(n).unwrap();
        let word = year_word(n).unwrap();
        prop_assert_eq!(parse_cohort(roman), CohortToken::new(roman, ""));
        prop_assert_eq!(parse_cohort(&format_ordinal_year(n)), CohortToken::new(format_ordinal_year(n), ""));
        prop_assert_eq!(parse_cohort(&ordinal_prefix(n)), CohortToken::new(format_ordinal_year(n), ""));
        prop_assert_eq!(parse_cohort(&format!("{word} Year")), CohortToken::new(format!("{word} Year"), ""));
        prop_assert_eq!(parse_cohort(&word.to_lowercase()), CohortToken::new(format!("{word} Year"), ""));
    }

    #[test]
    fn bare_section_letter(section in letter()) {
        let expected = CohortToken::new("", section.to_string());
        prop_assert_eq!(parse_cohort(&format!("Section {section}")), expected.clone());
        prop_assert_eq!(parse_cohort(&section.to_ascii_lowercase().to_string()), expected.clone());
        if !is_roman(&section.to_string()) {
            prop_assert_eq!(parse_cohort(&section.to_string()), expected);
        }
    }

    #[test]
    fn greek_section(name in prop::sample::select(GREEK_SECTIONS.to_vec())) {
        let expected = CohortToken::new("", name);
        prop_assert_eq!(parse_cohort(name), expected.clone());
        prop_assert_eq!(parse_cohort(&format!("Section {}", name.to_lowercase())), expected);
    }
}

#[test]
fn combined_cohort_cell_scenarios() {
    assert_eq!(parse_cohort("IIIA"), CohortToken::new("III", "A"));
    assert_eq!(parse_cohort("2nd Year B"), CohortToken::new("2nd Year", "B"));
}
