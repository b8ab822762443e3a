use std::sync::{Mutex, PoisonError};

use super::{SessionStorage, StorageError};

/// Keeps the session record in process memory only.
#[derive(Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the storage with an existing record, as if written by an earlier run.
    pub fn with_record(record: impl Into<String>) -> Self {
        MemoryStorage {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, record: &str) -> Result<(), StorageError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.to_string());
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_starts_empty() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read().unwrap(), None);
        assert!(!storage.is_durable());
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::with_record("first");
        storage.write("second").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("second"));
    }
}
