use std::time::Duration;

/// Caller-supplied transport overrides for a single request.
///
/// Options are applied after every default the client or the API layer sets,
/// so a header given here replaces a default header of the same name
/// (`content-type`, `authorization`, `user-agent`, ...). The API layer treats
/// this type as opaque and forwards it untouched.
///
/// # Example
///
/// ```ignore
/// let options = RequestOptions::new()
///     .header("x-request-id", "42")
///     .timeout(Duration::from_secs(2));
/// client.list_help_categories(Some(&options)).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. A later header with the same name replaces an earlier one.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Shorthand for an `Authorization: Bearer <token>` header.
    #[must_use]
    pub fn bearer_token(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    /// Override the client's request timeout for this call only.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn repeated_header_keeps_last_value() {
        let options = RequestOptions::new()
            .header("X-Trace", "one")
            .header("x-trace", "two");

        assert_eq!(
            options.headers(),
            &[("x-trace".to_owned(), "two".to_owned())]
        );
    }

    #[test]
    fn bearer_token_sets_authorization() {
        let options = RequestOptions::new()
            .bearer_token("abc")
            .timeout(Duration::from_millis(250));

        assert_eq!(
            options.headers(),
            &[("authorization".to_owned(), "Bearer abc".to_owned())]
        );
        assert_eq!(options.timeout_override(), Some(Duration::from_millis(250)));
    }
}
