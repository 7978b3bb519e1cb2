//! Directory-backed document storage — the production default.
//!
//! Each document is one file inside the configured directory. Writes go to a
//! uniquely named temporary sibling first and are then renamed over the
//! target, so a reader sees either the old document or the new one, never a
//! truncated mix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{DocumentBackend, StorageError};

/// Suffix counter for temporary files, unique within the process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A document backend storing one file per document in a directory.
///
/// # Examples
///
/// ```no_run
/// # use curtain_storage::FileBackend;
/// let backend = FileBackend::open("/var/lib/curtain").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open a document directory, creating it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the directory cannot be created or
    /// the path exists but is not a directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| StorageError::Open {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        if !dir.is_dir() {
            return Err(StorageError::Open {
                path: dir.display().to_string(),
                reason: "not a directory".to_owned(),
            });
        }

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Return the directory holding the documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let invalid = |reason: &str| StorageError::InvalidName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        if name.is_empty() {
            return Err(invalid("empty name"));
        }
        if name == "." || name == ".." {
            return Err(invalid("reserved name"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("must not contain path separators"));
        }

        Ok(self.dir.join(name))
    }
}

#[async_trait::async_trait]
impl DocumentBackend for FileBackend {
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.document_path(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                name: name.to_owned(),
                reason: e.to_string(),
            }),
        }
    }

    async fn put(&self, name: &str, contents: &[u8]) -> Result<(), StorageError> {
        let path = self.document_path(name)?;
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .dir
            .join(format!(".{name}.{}.{seq}.tmp", std::process::id()));

        let write_err = |e: std::io::Error| StorageError::Write {
            name: name.to_owned(),
            reason: e.to_string(),
        };

        if let Err(e) = tokio::fs::write(&tmp, contents).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }

        tracing::debug!(document = name, bytes = contents.len(), "document written");
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.document_path(name)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::Read {
                name: name.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, FileBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        (dir, backend)
    }

    #[tokio::test]
    async fn open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = FileBackend::open(&nested).unwrap();
        assert!(backend.dir().is_dir());
    }

    #[tokio::test]
    async fn open_rejects_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let result = FileBackend::open(&file);
        assert!(matches!(result, Err(StorageError::Open { .. })));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (_dir, backend) = open_temp();
        assert_eq!(backend.get("status.json").await.unwrap(), None);
        assert!(!backend.exists("status.json").await.unwrap());
    }

    #[tokio::test]
    async fn put_writes_file_in_directory() {
        let (dir, backend) = open_temp();
        backend.put("status.json", br#"{"enabled":true}"#).await.unwrap();

        let on_disk = std::fs::read(dir.path().join("status.json")).unwrap();
        assert_eq!(on_disk, br#"{"enabled":true}"#);
        assert!(backend.exists("status.json").await.unwrap());
    }

    #[tokio::test]
    async fn put_overwrites_and_leaves_no_temp_files() {
        let (dir, backend) = open_temp();
        backend.put("whitelist.json", b"[1]").await.unwrap();
        backend.put("whitelist.json", b"[]").await.unwrap();

        assert_eq!(
            backend.get("whitelist.json").await.unwrap(),
            Some(b"[]".to_vec())
        );

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["whitelist.json".to_owned()]);
    }

    #[tokio::test]
    async fn rejects_names_with_separators() {
        let (_dir, backend) = open_temp();
        for name in ["", "..", "../status.json", "a/b.json", "a\\b.json"] {
            let result = backend.get(name).await;
            assert!(
                matches!(result, Err(StorageError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn reopen_sees_previous_documents() {
        let (dir, backend) = open_temp();
        backend.put("status.json", b"{}").await.unwrap();
        drop(backend);

        let reopened = FileBackend::open(dir.path()).unwrap();
        assert_eq!(reopened.get("status.json").await.unwrap(), Some(b"{}".to_vec()));
    }
}
