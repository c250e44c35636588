use regex::Regex;
use std::sync::OnceLock;

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone pattern"))
}

/// Strips the separators people type between digit groups.
pub fn strip_phone_formatting(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')'))
        .collect()
}

/// At least ten characters once separators are gone, an optional leading
/// `+`, no leading zero, and at most sixteen digits.
pub fn is_valid_phone(value: &str) -> bool {
    let cleaned = strip_phone_formatting(value);
    cleaned.len() >= 10 && phone_pattern().is_match(&cleaned)
}

/// `(415) 555-1212` for ten-digit numbers; anything else is returned as typed.
pub fn format_phone_number(value: &str) -> String {
    let digits: String = value.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.len() == 10 {
        return format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..]);
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_phone_number, is_valid_phone, strip_phone_formatting};

    #[test]
    fn strip_removes_separators_only() {
        assert_eq!(strip_phone_formatting("  (415) 555-1212  "), "4155551212");
        assert_eq!(strip_phone_formatting("+1 415.555.1212"), "+1415.555.1212");
    }

    #[test]
    fn valid_phone_accepts_common_formats() {
        assert!(is_valid_phone("(415) 555-1212"));
        assert!(is_valid_phone("+1 415 555 1212"));
        assert!(is_valid_phone("4155551212"));
    }

    #[test]
    fn valid_phone_rejects_short_or_malformed() {
        assert!(!is_valid_phone("555-1212"));
        assert!(!is_valid_phone("0415551212"));
        assert!(!is_valid_phone("415.555.1212"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn format_phone_groups_ten_digits() {
        assert_eq!(format_phone_number("415-555-1212"), "(415) 555-1212");
        assert_eq!(format_phone_number("+44 20 7946 0958"), "+44 20 7946 0958");
    }
}
