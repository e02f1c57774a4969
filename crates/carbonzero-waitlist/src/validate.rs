//! Email address checks.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Strict check used by the local handler: `local@domain.tld`, no whitespace.
pub fn is_valid_email(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && EMAIL.is_match(trimmed)
}

/// Loose check used by the remote handler: non-empty and contains `@`.
pub fn looks_like_email(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && trimmed.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  someone@example.org  "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("   "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b"));
        assert!(looks_like_email(" @ "));
        assert!(!looks_like_email("ab.co"));
        assert!(!looks_like_email("  "));
    }
}
