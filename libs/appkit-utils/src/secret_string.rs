use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

const MASK: &str = "[REDACTED]";

/// A credential that never shows up in logs or dumped config.
///
/// Formatting and serialization print a fixed mask; deserialization takes
/// the plain value so tokens can come from YAML or the environment. The
/// buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building an `authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(MASK)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn display_masks_value() {
        assert_eq!(SecretString::new("hunter2").to_string(), MASK);
    }

    #[test]
    fn reads_plain_writes_mask() {
        let token: SecretString = serde_json::from_str(r#""t0k3n""#).unwrap();
        assert_eq!(token.expose(), "t0k3n");
        assert_eq!(serde_json::to_string(&token).unwrap(), r#""[REDACTED]""#);
    }

    #[test]
    fn zeroize_empties_value() {
        let mut token = SecretString::new("t0k3n");
        token.zeroize();
        assert!(token.is_empty());
    }
}
