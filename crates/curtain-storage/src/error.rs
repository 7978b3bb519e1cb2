//! Storage error types.
//!
//! Every variant names the document or path involved so a failed request can
//! be diagnosed from the log line alone.

/// Errors that can occur during document storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open or create the storage location.
    #[error("failed to open storage at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Failed to read a document.
    #[error("failed to read document '{name}': {reason}")]
    Read { name: String, reason: String },

    /// Failed to write a document.
    #[error("failed to write document '{name}': {reason}")]
    Write { name: String, reason: String },

    /// The document name is not a plain file name.
    #[error("invalid document name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}
