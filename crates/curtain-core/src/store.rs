//! The maintenance store.
//!
//! Owns two documents: `status.json` holding a [`StatusRecord`] and
//! `whitelist.json` holding a JSON array of [`WhitelistEntry`]. Every
//! mutation reads the whole document, changes it in memory and writes the
//! whole document back.
//!
//! # Concurrency
//!
//! There is no locking. Two concurrent mutations of the same document can
//! both read the old state, and the later write silently discards the
//! earlier one (lost update). Callers that need serialization must add it
//! above the store.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use curtain_storage::DocumentBackend;

use crate::error::StoreError;
use crate::model::{StatusRecord, WhitelistEntry};

/// Document name of the status record.
pub const STATUS_DOCUMENT: &str = "status.json";

/// Document name of the whitelist.
pub const WHITELIST_DOCUMENT: &str = "whitelist.json";

/// Read/update operations over the status flag and the IP whitelist.
pub struct MaintenanceStore {
    backend: Arc<dyn DocumentBackend>,
}

impl MaintenanceStore {
    /// Create a store over the given backend.
    ///
    /// Call [`initialize`](Self::initialize) before serving requests.
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Create both documents if they are missing.
    ///
    /// The status starts disabled and the whitelist starts empty. Existing
    /// documents are left untouched, even if corrupt.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backend fails.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        if !self.backend.exists(STATUS_DOCUMENT).await? {
            self.save(STATUS_DOCUMENT, &StatusRecord::default()).await?;
            info!(document = STATUS_DOCUMENT, "created default status document");
        }

        if !self.backend.exists(WHITELIST_DOCUMENT).await? {
            self.save(WHITELIST_DOCUMENT, &Vec::<WhitelistEntry>::new())
                .await?;
            info!(document = WHITELIST_DOCUMENT, "created empty whitelist document");
        }

        Ok(())
    }

    /// Read the current status.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Corrupt`] if the document does not parse.
    /// - [`StoreError::MissingDocument`] if the store was never initialized.
    /// - [`StoreError::Storage`] if the backend fails.
    pub async fn get_status(&self) -> Result<StatusRecord, StoreError> {
        self.load(STATUS_DOCUMENT).await
    }

    /// Flip the status and return the new value.
    ///
    /// # Errors
    ///
    /// Same as [`get_status`](Self::get_status), plus write failures.
    pub async fn toggle_status(&self) -> Result<StatusRecord, StoreError> {
        let status = self.get_status().await?.toggled();
        self.save(STATUS_DOCUMENT, &status).await?;

        info!(enabled = status.enabled, "maintenance status toggled");

        Ok(status)
    }

    /// Read the whitelist in insertion order.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Corrupt`] if the document does not parse.
    /// - [`StoreError::MissingDocument`] if the store was never initialized.
    /// - [`StoreError::Storage`] if the backend fails.
    pub async fn list_whitelist(&self) -> Result<Vec<WhitelistEntry>, StoreError> {
        self.load(WHITELIST_DOCUMENT).await
    }

    /// Append an IP to the whitelist.
    ///
    /// Surrounding whitespace is trimmed before validation and storage.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidInput`] if `ip` is empty or only whitespace.
    /// - [`StoreError::Conflict`] if an entry with exactly this `ip` exists.
    /// - Load and write failures as for [`list_whitelist`](Self::list_whitelist).
    pub async fn add_to_whitelist(&self, ip: &str) -> Result<WhitelistEntry, StoreError> {
        let ip = ip.trim();
        if ip.is_empty() {
            return Err(StoreError::InvalidInput {
                reason: "IP address is required".to_owned(),
            });
        }

        let mut whitelist = self.list_whitelist().await?;
        if whitelist.iter().any(|entry| entry.ip == ip) {
            return Err(StoreError::Conflict { ip: ip.to_owned() });
        }

        let entry = WhitelistEntry::now(ip);
        whitelist.push(entry.clone());
        self.save(WHITELIST_DOCUMENT, &whitelist).await?;

        info!(ip = %entry.ip, total = whitelist.len(), "IP added to whitelist");

        Ok(entry)
    }

    /// Remove every entry whose `ip` equals the trimmed argument.
    ///
    /// Removing an address that is not present succeeds and rewrites the
    /// unchanged collection.
    ///
    /// # Errors
    ///
    /// Load and write failures as for [`list_whitelist`](Self::list_whitelist).
    pub async fn remove_from_whitelist(&self, ip: &str) -> Result<(), StoreError> {
        let ip = ip.trim();
        let mut whitelist = self.list_whitelist().await?;
        let before = whitelist.len();
        whitelist.retain(|entry| entry.ip != ip);
        self.save(WHITELIST_DOCUMENT, &whitelist).await?;

        info!(
            ip = %ip,
            removed = before.saturating_sub(whitelist.len()),
            "IP removed from whitelist"
        );

        Ok(())
    }

    /// Whether `ip` is on the whitelist (exact match after trimming).
    ///
    /// # Errors
    ///
    /// Load failures as for [`list_whitelist`](Self::list_whitelist).
    pub async fn is_whitelisted(&self, ip: &str) -> Result<bool, StoreError> {
        let ip = ip.trim();
        Ok(self.list_whitelist().await?.iter().any(|entry| entry.ip == ip))
    }

    /// Whether a visitor with this address should see the overlay.
    ///
    /// True only when maintenance is enabled and the address is known and not
    /// whitelisted. An unresolvable address is never whitelisted.
    ///
    /// # Errors
    ///
    /// Load failures of either document.
    pub async fn should_block(&self, ip: Option<&str>) -> Result<bool, StoreError> {
        if !self.get_status().await?.enabled {
            return Ok(false);
        }

        match ip {
            Some(ip) => Ok(!self.is_whitelisted(ip).await?),
            None => Ok(true),
        }
    }

    async fn load<T: DeserializeOwned>(&self, document: &str) -> Result<T, StoreError> {
        let bytes = self
            .backend
            .get(document)
            .await?
            .ok_or_else(|| StoreError::MissingDocument {
                document: document.to_owned(),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(document, error = %e, "document failed schema validation");
            StoreError::Corrupt {
                document: document.to_owned(),
                reason: e.to_string(),
            }
        })
    }

    async fn save<T: Serialize + ?Sized>(&self, document: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Serialization {
            document: document.to_owned(),
            reason: e.to_string(),
        })?;

        self.backend.put(document, &bytes).await?;
        Ok(())
    }
}

impl std::fmt::Debug for MaintenanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceStore").finish_non_exhaustive()
    }
}
