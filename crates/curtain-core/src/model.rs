//! Persisted records.
//!
//! These types are both the on-disk schema and the JSON wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The singleton maintenance flag. Stored as `{"enabled": bool}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Whether maintenance mode is active.
    pub enabled: bool,
}

impl StatusRecord {
    /// The record after one toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            enabled: !self.enabled,
        }
    }
}

/// An IP address allowed to bypass the maintenance overlay.
///
/// `ip` is compared by exact string equality; no CIDR matching and no
/// address normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    /// The whitelisted address, as entered by the administrator.
    pub ip: String,
    /// When the entry was added (RFC 3339, UTC).
    pub created_at: DateTime<Utc>,
}

impl WhitelistEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn now(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn toggled_inverts_flag() {
        let off = StatusRecord::default();
        assert!(!off.enabled);
        assert!(off.toggled().enabled);
        assert_eq!(off.toggled().toggled(), off);
    }

    #[test]
    fn whitelist_entry_reads_iso_timestamps() {
        let json = r#"[{"ip":"10.0.0.1","created_at":"2024-05-01T12:30:00.000Z"}]"#;
        let entries: Vec<WhitelistEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ip, "10.0.0.1");
        assert_eq!(entries[0].created_at.to_rfc3339(), "2024-05-01T12:30:00+00:00");
    }

    #[test]
    fn status_requires_enabled_field() {
        let result: Result<StatusRecord, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
