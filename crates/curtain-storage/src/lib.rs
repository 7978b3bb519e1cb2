//! Document storage for Curtain.
//!
//! This crate defines the [`DocumentBackend`] trait: a store of small named
//! documents that are always read and written whole. It knows nothing about
//! maintenance status, whitelists, or JSON; the store in `curtain-core`
//! serializes its records before they reach this layer.
//!
//! Two implementations are provided:
//!
//! - [`FileBackend`] — one file per document inside a directory, production default
//! - [`MemoryBackend`] — in-memory, for tests and throwaway instances

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileBackend;
pub use memory::MemoryBackend;

/// A pluggable whole-document storage backend.
///
/// Document names are plain file names such as `status.json`. Values are
/// opaque bytes. A `put` replaces the previous content entirely; readers must
/// never observe a partially written document.
///
/// There is no compare-and-swap: two callers that read, modify and write the
/// same document concurrently will lose one of the updates.
#[async_trait::async_trait]
pub trait DocumentBackend: Send + Sync + 'static {
    /// Read a whole document.
    ///
    /// Returns `Ok(None)` if the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace a document, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn put(&self, name: &str, contents: &[u8]) -> Result<(), StorageError>;

    /// Check whether a document exists.
    ///
    /// The default implementation calls [`get`](DocumentBackend::get) and
    /// checks for `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.get(name).await?.is_some())
    }
}
