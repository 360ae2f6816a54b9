//! Phone number digits.

/// Accepts 9 to 11 digits; exactly 10 digits must start with 6-9.
pub fn check(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if !(9..=11).contains(&digits.len()) {
        return Some(format!(
            "phone number must have 9 to 11 digits, found {}",
            digits.len()
        ));
    }
    if digits.len() == 10 && !digits.starts_with(['6', '7', '8', '9']) {
        return Some("10-digit mobile numbers must start with 6, 7, 8 or 9".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        assert_eq!(check("044123456"), None);
        assert_eq!(check("9876543210"), None);
        assert_eq!(check("04412345678"), None);
        assert!(check("12345").is_some());
        assert!(check("123456789012").is_some());
    }

    #[test]
    fn test_mobile_prefix() {
        assert!(check("5876543210").is_some());
        assert_eq!(check("6876543210"), None);
    }
}
