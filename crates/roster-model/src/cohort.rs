//! Cohort token grammar: extracts `{year, section}` from free-form labels.
//!
//! Sheet names and class cells are formatted inconsistently (`III-A`, `IIIA`,
//! `2nd Year B`, `Second Year - C`, `Year II A`, `Sigma`). The parser tries a
//! fixed list of pattern families in priority order and the first match wins:
//!
//! 1. Roman year, separator, section letter (`III A`, `II-b`)
//! 2. Roman year immediately followed by an uppercase letter (`IIIA`)
//! 3. Ordinal-numeric year and letter (`2nd Year B`, `1st-a`)
//! 4. Written-word year and letter (`Second Year C`)
//! 5. `Year` keyword, Roman year, optional letter (`Year II A`)
//! 6. Bare Roman year (`IV`)
//! 7. Bare ordinal-numeric year (`3rd Year`, `3rd`)
//! 8. Bare written-word year (`Third Year`)
//! 9. Single section letter (`A`, `Section b`)
//! 10. Greek-letter section name (`Sigma`, `Section omega`)
//!
//! Roman numerals are matched in uppercase only, so `Xi` is the Greek section
//! rather than year `XI`, and `i` is section `I` rather than year `I`.
//!
//! Output is canonical: Roman years stay as uppercase numerals, ordinal
//! years become `2nd Year`, written years become `Second Year`, section
//! letters are uppercased and Greek names capitalised.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A cohort extracted from text. Either part may be empty, meaning
/// "undetermined".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CohortToken {
    pub year: String,
    pub section: String,
}

impl CohortToken {
    pub fn new(year: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            section: section.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_empty() && self.section.is_empty()
    }
}

/// Roman numerals I-XII, longest alternatives first so the regex engine
/// prefers `XII` over `XI` over `X`.
const ROMAN: &str = "XII|XI|X|IX|VIII|VII|VI|V|IV|III|II|I";

const ROMAN_NUMERALS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

const YEAR_WORDS: [&str; 12] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth", "Tenth",
    "Eleventh", "Twelfth",
];

/// The 24 Greek letter names accepted as section labels.
pub const GREEK_SECTIONS: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

/// Year values an operator can select as an override.
pub const YEAR_OPTIONS: [&str; 12] = [
    "I",
    "II",
    "III",
    "IV",
    "1st Year",
    "2nd Year",
    "3rd Year",
    "4th Year",
    "First Year",
    "Second Year",
    "Third Year",
    "Fourth Year",
];

/// Section values an operator can select as an override: A-Z then the Greek names.
pub const SECTION_OPTIONS: [&str; 50] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta",
    "Eta", "Theta", "Iota", "Kappa", "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma",
    "Tau", "Upsilon", "Phi", "Chi", "Psi", "Omega",
];

const SEP: &str = r"[\s\-_./]";
const ORDINAL: &str = r"(1[0-2]|[1-9])\s*(?i:st|nd|rd|th)";
const WORD: &str = "(?i:(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth))";
const YEAR_SUFFIX: &str = r"(?:\s*(?i:year))?";
const SECTION_PREFIX: &str = r"(?:(?i:section|sec)[\s\-_./]*)?";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("cohort pattern is a valid regex")
}

static ROMAN_SPACED_LETTER: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^({ROMAN}){SEP}+([A-Za-z])$")));
static ROMAN_LETTER: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^({ROMAN})([A-Z])$")));
static ORDINAL_LETTER: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{ORDINAL}{YEAR_SUFFIX}{SEP}*([A-Za-z])$")));
static WORD_LETTER: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{WORD}{YEAR_SUFFIX}{SEP}*([A-Za-z])$")));
static KEYWORD_ROMAN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        "^(?i:year){SEP}*({ROMAN})(?:{SEP}*([A-Za-z]))?$"
    ))
});
static ROMAN_ONLY: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^({ROMAN})$")));
static ORDINAL_ONLY: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{ORDINAL}{YEAR_SUFFIX}$")));
static WORD_ONLY: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^{WORD}{YEAR_SUFFIX}$")));
static LETTER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{SECTION_PREFIX}([A-Za-z])$")));
static GREEK_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    let names = GREEK_SECTIONS.join("|");
    compile(&format!("^{SECTION_PREFIX}(?i:({names}))$"))
});

/// Parses a cohort token from free-form text. Unmatched input yields an
/// empty token.
pub fn parse_cohort(input: &str) -> CohortToken {
    let text = input.trim();
    if text.is_empty() {
        return CohortToken::default();
    }

    if let Some(caps) = ROMAN_SPACED_LETTER.captures(text) {
        return CohortToken::new(&caps[1], caps[2].to_uppercase());
    }
    // A string that is itself a numeral (`IV`, `XI`) is a bare year, not year + section.
    if !ROMAN_ONLY.is_match(text)
        && let Some(caps) = ROMAN_LETTER.captures(text)
    {
        return CohortToken::new(&caps[1], &caps[2]);
    }
    if let Some(caps) = ORDINAL_LETTER.captures(text)
        && let Some(year) = ordinal_year(&caps[1])
    {
        return CohortToken::new(year, caps[2].to_uppercase());
    }
    if let Some(caps) = WORD_LETTER.captures(text)
        && let Some(year) = word_year(&caps[1])
    {
        return CohortToken::new(year, caps[2].to_uppercase());
    }
    if let Some(caps) = KEYWORD_ROMAN.captures(text) {
        let section = caps
            .get(2)
            .map(|m| m.as_str().to_uppercase())
            .unwrap_or_default();
        return CohortToken::new(&caps[1], section);
    }
    if let Some(caps) = ROMAN_ONLY.captures(text) {
        return CohortToken::new(&caps[1], "");
    }
    if let Some(caps) = ORDINAL_ONLY.captures(text)
        && let Some(year) = ordinal_year(&caps[1])
    {
        return CohortToken::new(year, "");
    }
    if let Some(caps) = WORD_ONLY.captures(text)
        && let Some(year) = word_year(&caps[1])
    {
        return CohortToken::new(year, "");
    }
    if let Some(caps) = LETTER_ONLY.captures(text) {
        return CohortToken::new("", caps[1].to_uppercase());
    }
    if let Some(caps) = GREEK_ONLY.captures(text)
        && let Some(name) = greek_name(&caps[1])
    {
        return CohortToken::new("", name);
    }
    CohortToken::default()
}

fn ordinal_year(digits: &str) -> Option<String> {
    let n: u32 = digits.parse().ok()?;
    (1..=12).contains(&n).then(|| format_ordinal_year(n))
}

fn word_year(word: &str) -> Option<String> {
    YEAR_WORDS
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(word))
        .map(|candidate| format!("{candidate} Year"))
}

fn greek_name(name: &str) -> Option<&'static str> {
    GREEK_SECTIONS
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Formats `n` as `1st Year`, `2nd Year`, `11th Year`.
pub fn format_ordinal_year(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix} Year")
}

/// Roman numeral for `1..=12`.
pub fn roman_numeral(n: u32) -> Option<&'static str> {
    let idx = usize::try_from(n).ok()?.checked_sub(1)?;
    ROMAN_NUMERALS.get(idx).copied()
}

/// Written year word (`First`) for `1..=12`.
pub fn year_word(n: u32) -> Option<&'static str> {
    let idx = usize::try_from(n).ok()?.checked_sub(1)?;
    YEAR_WORDS.get(idx).copied()
}

/// Ordinal position of a year label on the shared 1-12 scale.
///
/// Roman, ordinal-numeric and written forms of the same year rank equally.
/// Unrecognised years rank 0 so they sort first.
pub fn year_rank(year: &str) -> u32 {
    let text = year.trim();
    if let Some(pos) = ROMAN_NUMERALS.iter().position(|r| *r == text) {
        return pos as u32 + 1;
    }
    if let Some(caps) = ORDINAL_ONLY.captures(text)
        && let Ok(n) = caps[1].parse::<u32>()
    {
        return n;
    }
    if let Some(caps) = WORD_ONLY.captures(text)
        && let Some(pos) = YEAR_WORDS
            .iter()
            .position(|w| w.eq_ignore_ascii_case(&caps[1]))
    {
        return pos as u32 + 1;
    }
    0
}

/// Rank used for unrecognised sections; they sort after every known section.
pub const UNRANKED_SECTION: u32 = 999;

/// Ordinal position of a section label: A-Z are 1-26, Greek names 27-50.
pub fn section_rank(section: &str) -> u32 {
    let text = section.trim();
    let mut chars = text.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && ch.is_ascii_alphabetic()
    {
        return u32::from(ch.to_ascii_uppercase() as u8 - b'A') + 1;
    }
    GREEK_SECTIONS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(text))
        .map_or(UNRANKED_SECTION, |pos| pos as u32 + 27)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(year: &str, section: &str) -> CohortToken {
        CohortToken::new(year, section)
    }

    #[test]
    fn combined_roman_without_space() {
        assert_eq!(parse_cohort("IIIA"), token("III", "A"));
        assert_eq!(parse_cohort("XIIB"), token("XII", "B"));
    }

    #[test]
    fn combined_roman_with_separator() {
        assert_eq!(parse_cohort("II A"), token("II", "A"));
        assert_eq!(parse_cohort(" IV-c "), token("IV", "C"));
    }

    #[test]
    fn ordinal_year_with_section() {
        assert_eq!(parse_cohort("2nd Year B"), token("2nd Year", "B"));
        assert_eq!(parse_cohort("1ST YEAR-a"), token("1st Year", "A"));
        assert_eq!(parse_cohort("3rdC"), token("3rd Year", "C"));
    }

    #[test]
    fn written_year_with_section() {
        assert_eq!(parse_cohort("Second Year - C"), token("Second Year", "C"));
        assert_eq!(parse_cohort("fourth year d"), token("Fourth Year", "D"));
    }

    #[test]
    fn year_keyword_with_roman() {
        assert_eq!(parse_cohort("Year II A"), token("II", "A"));
        assert_eq!(parse_cohort("year III"), token("III", ""));
    }

    #[test]
    fn bare_years() {
        assert_eq!(parse_cohort("IV"), token("IV", ""));
        assert_eq!(parse_cohort("XI"), token("XI", ""));
        assert_eq!(parse_cohort("3rd"), token("3rd Year", ""));
        assert_eq!(parse_cohort("Third Year"), token("Third Year", ""));
    }

    #[test]
    fn bare_sections() {
        assert_eq!(parse_cohort("b"), token("", "B"));
        assert_eq!(parse_cohort("Section D"), token("", "D"));
        assert_eq!(parse_cohort("sigma"), token("", "Sigma"));
        assert_eq!(parse_cohort("Xi"), token("", "Xi"));
    }

    #[test]
    fn unmatched_input_is_empty() {
        assert!(parse_cohort("").is_empty());
        assert!(parse_cohort("Sheet1").is_empty());
        assert!(parse_cohort("13th Year").is_empty());
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(format_ordinal_year(1), "1st Year");
        assert_eq!(format_ordinal_year(2), "2nd Year");
        assert_eq!(format_ordinal_year(3), "3rd Year");
        assert_eq!(format_ordinal_year(11), "11th Year");
        assert_eq!(format_ordinal_year(12), "12th Year");
    }

    #[test]
    fn year_forms_share_a_rank() {
        assert_eq!(year_rank("II"), 2);
        assert_eq!(year_rank("2nd Year"), 2);
        assert_eq!(year_rank("Second Year"), 2);
        assert_eq!(year_rank("XII"), 12);
        assert_eq!(year_rank("Unknown"), 0);
    }

    #[test]
    fn section_ranks() {
        assert_eq!(section_rank("A"), 1);
        assert_eq!(section_rank("z"), 26);
        assert_eq!(section_rank("Alpha"), 27);
        assert_eq!(section_rank("Omega"), 50);
        assert_eq!(section_rank(""), UNRANKED_SECTION);
        assert_eq!(section_rank("Unknown"), UNRANKED_SECTION);
    }

    #[test]
    fn section_options_cover_letters_then_greek() {
        assert_eq!(&SECTION_OPTIONS[26..], &GREEK_SECTIONS[..]);
        for (idx, option) in SECTION_OPTIONS.iter().enumerate() {
            assert_eq!(section_rank(option), idx as u32 + 1);
        }
    }
}
