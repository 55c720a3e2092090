//! Environment-driven server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ADDR_ENV: &str = "INVDASH_BIND_ADDR";
pub const DATA_PATH_ENV: &str = "INVDASH_DATA_PATH";
pub const LOAD_ON_STARTUP_ENV: &str = "INVDASH_LOAD_ON_STARTUP";
pub const MAX_LOAD_BYTES_ENV: &str = "INVDASH_MAX_LOAD_BYTES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_DATA_PATH: &str = "parsed_inventory.json";
/// Inventory exports run to several megabytes, past axum's 2 MB default.
pub const DEFAULT_MAX_LOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Inventory file read at startup and by an empty `POST /api/load-data`.
    pub data_path: PathBuf,
    pub load_on_startup: bool,
    /// Body size limit for `POST /api/load-data`.
    pub max_load_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            load_on_startup: true,
            max_load_bytes: DEFAULT_MAX_LOAD_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; invalid values fall back to the
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BIND_ADDR_ENV) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "invalid {BIND_ADDR_ENV}; using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        if let Some(raw) = lookup(DATA_PATH_ENV) {
            let raw = raw.trim();
            if raw.is_empty() {
                tracing::warn!("empty {DATA_PATH_ENV}; using {DEFAULT_DATA_PATH}");
            } else {
                config.data_path = PathBuf::from(raw);
            }
        }

        if let Some(raw) = lookup(LOAD_ON_STARTUP_ENV) {
            match parse_bool(&raw) {
                Some(v) => config.load_on_startup = v,
                None => tracing::warn!(value = %raw, "invalid {LOAD_ON_STARTUP_ENV}; using true"),
            }
        }

        if let Some(raw) = lookup(MAX_LOAD_BYTES_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.max_load_bytes = limit,
                _ => tracing::warn!(
                    value = %raw,
                    "invalid {MAX_LOAD_BYTES_ENV}; using {DEFAULT_MAX_LOAD_BYTES}"
                ),
            }
        }

        config
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5001))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
