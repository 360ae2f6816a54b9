//! Header normalization.

/// The three normalized forms of a header used for synonym lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderForms {
    /// Lowercase, ASCII alphanumerics only: `Roll No.` → `rollno`.
    pub alnum: String,
    /// Lowercase with the original inner spacing: `Roll No.` → `roll no.`.
    pub spaced: String,
    /// Lowercase with all whitespace removed: `Roll No.` → `rollno.`.
    pub compact: String,
}

impl HeaderForms {
    pub fn new(header: &str) -> Self {
        let spaced = header.trim().to_lowercase();
        let compact = spaced.chars().filter(|c| !c.is_whitespace()).collect();
        let alnum = spaced
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        Self {
            alnum,
            spaced,
            compact,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.alnum.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forms() {
        let forms = HeaderForms::new("  Reg. No ");
        assert_eq!(forms.alnum, "regno");
        assert_eq!(forms.spaced, "reg. no");
        assert_eq!(forms.compact, "reg.no");
    }

    #[test]
    fn test_blank() {
        assert!(HeaderForms::new(" - ").is_blank());
        assert!(!HeaderForms::new("DOB").is_blank());
    }
}
