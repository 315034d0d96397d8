//! Runtime configuration from environment variables.
//!
//! `main` loads a `.env` file first (if present), so either source works.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_CATALOG_PATH: &str = "products.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `CATALOG_PATH`: the static product file read once at startup.
    pub catalog_path: PathBuf,
    /// `BIND_ADDR`: listen address.
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let catalog_path = get("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let raw_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        Ok(Self {
            catalog_path,
            bind_addr,
        })
    }
}
