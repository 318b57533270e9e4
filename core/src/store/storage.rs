use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;

/// Durable key-value storage holding text values.
pub trait KeyValueStorage: Send + Sync {
    fn name(&self) -> &str;
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Used by tests and by runs that should not touch disk.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        storage
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Backend(anyhow::anyhow!("memory storage lock poisoned")))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("tasks").unwrap(), None);
        storage.set("tasks", "[]").unwrap();
        assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[]"));
        storage.remove("tasks").unwrap();
        assert_eq!(storage.get("tasks").unwrap(), None);
    }
}
