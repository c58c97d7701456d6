//! Server configuration.

use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use serde::Deserialize;

use crate::parser::ParserLimits;
use crate::server::error::Error;

/// HTTP server configuration.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use microhttp_rs::ServerConfig;
///
/// let config = ServerConfig::from_json_str(r#"{ "document_root": "./public" }"#).unwrap();
/// assert_eq!(config.document_root.to_str(), Some("./public"));
/// assert_eq!(config.max_connections, 1024);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size; requests larger than this are rejected.
    pub read_buffer_size: usize,
    /// Directory static files are served from.
    pub document_root: PathBuf,
    /// Parser capacities.
    pub limits: ParserLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            max_connections: 1024,
            read_buffer_size: 4096,
            document_root: PathBuf::from("./static"),
            limits: ParserLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_connections == 0 {
            return Err(Error::ConfigError("max_connections must be at least 1".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::ConfigError("read_buffer_size must be at least 1".to_string()));
        }
        if self.document_root.as_os_str().is_empty() {
            return Err(Error::ConfigError("document_root must not be empty".to_string()));
        }
        Ok(())
    }
}
