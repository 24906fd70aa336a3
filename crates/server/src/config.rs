//! Server settings read from the environment.

use std::net::SocketAddr;

use precis_core::{PrecisConfig, PrecisError, Result};

/// Bind address variable.
pub const ADDR_VAR: &str = "PRECIS_ADDR";

/// Default bind address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub precis: PrecisConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| PrecisError::ConfigError(format!("{ADDR_VAR}={raw}: {e}")))?;

        Ok(Self { addr, precis: PrecisConfig::from_lookup(lookup)? })
    }
}
