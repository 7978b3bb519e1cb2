//! Server configuration for Curtain.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `CURTAIN_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use curtain_core::script::OverlayText;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Whether `X-Forwarded-For` / `X-Real-IP` may override the peer address.
    pub trust_proxy_headers: bool,
    /// Text rendered on the maintenance overlay.
    pub overlay: OverlayText,
}

/// Supported storage backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (data lost on restart).
    Memory,
    /// One JSON file per document in a directory.
    File { dir: PathBuf },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CURTAIN_BIND_ADDR` — full bind address (default: `127.0.0.1:8080`)
    /// - `PORT` — port to bind on `0.0.0.0`, used when `CURTAIN_BIND_ADDR` is unset
    /// - `CURTAIN_STORAGE` — `file` or `memory` (default: `file`)
    /// - `CURTAIN_DATA_DIR` — directory holding `status.json` and `whitelist.json` (default: `./data`)
    /// - `CURTAIN_LOG_LEVEL` — log filter (default: `info`)
    /// - `CURTAIN_TRUST_PROXY_HEADERS` — honour forwarding headers (default: `true`)
    /// - `CURTAIN_OVERLAY_TITLE` / `CURTAIN_OVERLAY_MESSAGE` — overlay text
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 8080));

        // Priority: CURTAIN_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Some(addr) = lookup("CURTAIN_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let data_dir = lookup("CURTAIN_DATA_DIR").unwrap_or_else(|| "./data".to_owned());

        let storage_backend = match lookup("CURTAIN_STORAGE")
            .unwrap_or_else(|| "file".to_owned())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackendType::Memory,
            _ => StorageBackendType::File {
                dir: PathBuf::from(data_dir),
            },
        };

        let log_level = lookup("CURTAIN_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let trust_proxy_headers = lookup("CURTAIN_TRUST_PROXY_HEADERS")
            .is_none_or(|v| v != "false" && v != "0");

        let defaults = OverlayText::default();
        let overlay = OverlayText {
            title: lookup("CURTAIN_OVERLAY_TITLE").unwrap_or(defaults.title),
            message: lookup("CURTAIN_OVERLAY_MESSAGE").unwrap_or(defaults.message),
        };

        Self {
            bind_addr,
            storage_backend,
            log_level,
            trust_proxy_headers,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(
            config.storage_backend,
            StorageBackendType::File {
                dir: PathBuf::from("./data")
            }
        );
        assert_eq!(config.log_level, "info");
        assert!(config.trust_proxy_headers);
        assert_eq!(config.overlay, OverlayText::default());
    }

    #[test]
    fn bind_addr_wins_over_port() {
        let config = config_from(&[("CURTAIN_BIND_ADDR", "127.0.0.1:9000"), ("PORT", "7000")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));

        let config = config_from(&[("PORT", "7000")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 7000)));
    }

    #[test]
    fn memory_storage_and_header_trust_toggle() {
        let config = config_from(&[
            ("CURTAIN_STORAGE", "Memory"),
            ("CURTAIN_TRUST_PROXY_HEADERS", "false"),
        ]);
        assert_eq!(config.storage_backend, StorageBackendType::Memory);
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn overlay_text_overrides() {
        let config = config_from(&[("CURTAIN_OVERLAY_TITLE", "Back soon")]);
        assert_eq!(config.overlay.title, "Back soon");
        assert_eq!(config.overlay.message, OverlayText::default().message);
    }
}
