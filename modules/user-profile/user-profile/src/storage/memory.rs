use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::{ProfileStorage, StorageError, validate_key};

/// In-process storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` and `remove` fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Release);
    }

    /// Raw stored value, bypassing key validation.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Acquire) {
            return Err(StorageError::Io(std::io::Error::other(
                "memory storage writes disabled",
            )));
        }
        Ok(())
    }
}

impl ProfileStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.check_writable()?;
        self.values.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.check_writable()?;
        self.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("user").unwrap(), None);

        storage.set("user", "a").unwrap();
        storage.set("user", "b").unwrap();
        assert_eq!(storage.get("user").unwrap().as_deref(), Some("b"));

        storage.remove("user").unwrap();
        storage.remove("user").unwrap();
        assert_eq!(storage.peek("user"), None);
    }

    #[test]
    fn failing_writes_keep_previous_value() {
        let storage = MemoryStorage::new();
        storage.set("user", "a").unwrap();
        storage.set_fail_writes(true);

        assert!(matches!(storage.set("user", "b"), Err(StorageError::Io(_))));
        assert!(storage.remove("user").is_err());
        assert_eq!(storage.get("user").unwrap().as_deref(), Some("a"));
    }
}
