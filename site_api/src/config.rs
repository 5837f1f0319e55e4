//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: `{value}`")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `SITE_API_ADDR`
    pub addr: SocketAddr,

    /// `PEXELS_API_KEY` - enables video search.
    pub pexels_api_key: Option<String>,

    /// `SITE_TOPOLOGY_CONFIG` - TOML file replacing the built-in topology tables.
    pub topology_path: Option<PathBuf>,

    /// `SITE_CORS_ORIGIN` - allowed browser origin; any origin when unset.
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let addr_value = non_empty("SITE_API_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                var: "SITE_API_ADDR",
                value: addr_value.clone(),
                source,
            })?;

        Ok(Self {
            addr,
            pexels_api_key: non_empty("PEXELS_API_KEY"),
            topology_path: non_empty("SITE_TOPOLOGY_CONFIG").map(PathBuf::from),
            cors_origin: non_empty("SITE_CORS_ORIGIN"),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            pexels_api_key: None,
            topology_path: None,
            cors_origin: None,
        }
    }
}
