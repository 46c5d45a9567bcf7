//! Key-value persistence for the profile snapshot.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String values under string keys.
///
/// `get` returns `Ok(None)` for a missing key and `remove` of a missing key
/// succeeds. Writes must be atomic: a reader sees the old value or the new one.
/// Calls are synchronous and made under the store's lock, so they must be cheap.
pub trait ProfileStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns [`StorageError`] on a failed read or an invalid key.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StorageError`] on a failed write or an invalid key.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`.
    ///
    /// # Errors
    /// Returns [`StorageError`] on a failed delete or an invalid key.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn key_validation() {
        assert!(validate_key("user").is_ok());
        assert!(validate_key("user_v2-a").is_ok());
        for bad in ["", "../user", "a/b", "user.json", "us er"] {
            assert!(matches!(
                validate_key(bad),
                Err(StorageError::InvalidKey(k)) if k == bad
            ));
        }
    }
}
