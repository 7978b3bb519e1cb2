//! Error types for `curtain-core`.

use curtain_storage::StorageError;

/// Errors from maintenance store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The IP address is already on the whitelist.
    #[error("IP '{ip}' is already whitelisted")]
    Conflict { ip: String },

    /// A persisted document does not match its schema.
    ///
    /// The document is left untouched so an administrator can inspect it.
    #[error("document '{document}' is corrupt: {reason}")]
    Corrupt { document: String, reason: String },

    /// A document that `initialize` should have created is absent.
    #[error("document '{document}' does not exist (store not initialized?)")]
    MissingDocument { document: String },

    /// Serializing a record failed.
    #[error("failed to serialize '{document}': {reason}")]
    Serialization { document: String, reason: String },

    /// The storage backend returned an error.
    #[error("store storage error: {0}")]
    Storage(#[from] StorageError),
}
