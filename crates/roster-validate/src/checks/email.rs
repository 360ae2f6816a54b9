//! Email address format.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Values without an `@` are not checked.
pub fn check(value: &str) -> Option<String> {
    if !value.contains('@') || EMAIL_REGEX.is_match(value) {
        return None;
    }
    Some(format!("'{value}' is not a valid email address"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        assert_eq!(check("asha@college.edu"), None);
        assert_eq!(check("a.b+c@x.co.in"), None);
    }

    #[test]
    fn test_invalid() {
        assert!(check("asha@college").is_some());
        assert!(check("as ha@college.edu").is_some());
        assert!(check("@college.edu").is_some());
    }

    #[test]
    fn test_without_at_sign_is_skipped() {
        assert_eq!(check("not an email"), None);
    }
}
