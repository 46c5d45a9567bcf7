//! HTTP security utilities.

/// Maximum body preview size for error messages (8KB).
///
/// Non-2xx bodies are quoted in errors for debugging; this caps how much of
/// the body ends up in the message.
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Headers whose values must never be written to logs.
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "proxy-authorization"];

/// Returns `true` if the header value must be redacted before logging.
#[must_use]
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| sensitive.eq_ignore_ascii_case(name))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn authorization_is_sensitive_in_any_case() {
        assert!(is_sensitive_header("Authorization"));
        assert!(is_sensitive_header("cookie"));
        assert!(!is_sensitive_header("content-type"));
    }
}
