//! Email address normalization for login identifiers.

/// Maximum stored length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Normalizes an email address for storage and lookup.
///
/// Surrounding whitespace is trimmed and the domain part (everything after the
/// last `@`) is lowercased, then the whole address is lowercased so that two
/// addresses differing only in case map to the same account.
///
/// No syntactic validation is performed; an input without `@` is only trimmed
/// and lowercased.
///
/// # Examples
///
/// ```rust
/// use accounts::domain::email::normalize_email;
///
/// assert_eq!(normalize_email("Foo@Example.COM"), "foo@example.com");
/// assert_eq!(normalize_email("  bar@b.com "), "bar@b.com");
/// ```
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();

    let normalized = match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    };

    normalized.to_lowercase()
}

/// Returns true when the input carries no usable address at all.
#[must_use]
pub fn is_blank(email: &str) -> bool {
    email.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_whole_address() {
        assert_eq!(normalize_email("Foo@Example.COM"), "foo@example.com");
        assert_eq!(normalize_email("MiXeD.Local@domain.org"), "mixed.local@domain.org");
    }

    #[test]
    fn splits_on_last_at_sign() {
        assert_eq!(
            normalize_email("\"Odd@Local\"@EXAMPLE.com"),
            "\"odd@local\"@example.com"
        );
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_email("\t a@b.com \n"), "a@b.com");
    }

    #[test]
    fn address_without_at_is_kept() {
        assert_eq!(normalize_email("NotAnEmail"), "notanemail");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("a@b.com"));
    }
}
