use std::sync::Arc;

use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::StorageBackend;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The Storage trait abstracts where the serialized session record lives.
///
/// Implementations hold one opaque record. Parsing it is the session store's job,
/// so a corrupt record can be handled in a single place.
pub trait SessionStorage: Send + Sync {
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, record: &str) -> Result<(), StorageError>;
    /// Whether a record written here survives a process restart.
    fn is_durable(&self) -> bool {
        true
    }
}

/// Creates a concrete storage implementation based on the configured backend.
pub fn create_storage(backend: &StorageBackend) -> Arc<dyn SessionStorage> {
    match backend {
        StorageBackend::File { path } => {
            info!("Persisting session to file '{}'.", path);
            Arc::new(FileStorage::new(path))
        }
        StorageBackend::Memory => {
            info!("Session storage is in-memory only; sessions will not survive a restart.");
            Arc::new(MemoryStorage::new())
        }
    }
}
