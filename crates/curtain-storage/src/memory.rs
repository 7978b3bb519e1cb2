//! In-memory document backend.
//!
//! Documents live in a `BTreeMap` behind a `RwLock` and are lost when the
//! process exits. Used by unit and integration tests, and by
//! `CURTAIN_STORAGE=memory` for throwaway instances.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{DocumentBackend, StorageError};

/// An in-memory document backend.
///
/// Clones share the same underlying map.
///
/// # Examples
///
/// ```
/// # use curtain_storage::{DocumentBackend, MemoryBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.put("status.json", br#"{"enabled":false}"#).await.unwrap();
/// assert!(backend.exists("status.json").await.unwrap());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentBackend for MemoryBackend {
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let documents = self.documents.read().await;
        Ok(documents.get(name).cloned())
    }

    async fn put(&self, name: &str, contents: &[u8]) -> Result<(), StorageError> {
        let mut documents = self.documents.write().await;
        documents.insert(name.to_owned(), contents.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_returns_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("status.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_whole_document() {
        let backend = MemoryBackend::new();
        backend.put("whitelist.json", b"[1,2,3]").await.unwrap();
        backend.put("whitelist.json", b"[]").await.unwrap();
        assert_eq!(
            backend.get("whitelist.json").await.unwrap(),
            Some(b"[]".to_vec())
        );
    }

    #[tokio::test]
    async fn exists_tracks_puts() {
        let backend = MemoryBackend::new();
        assert!(!backend.exists("status.json").await.unwrap());
        backend.put("status.json", b"{}").await.unwrap();
        assert!(backend.exists("status.json").await.unwrap());
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        backend.put("status.json", b"{}").await.unwrap();
        assert_eq!(clone.get("status.json").await.unwrap(), Some(b"{}".to_vec()));
    }
}
