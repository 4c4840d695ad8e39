//! HTTP transport settings.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_bind() -> String {
    String::from("127.0.0.1:8700")
}

const fn default_workers() -> usize {
    4
}

const fn default_max_body_bytes() -> usize {
    8 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Number of request-handling threads.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Largest accepted request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Parse `bind` as a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `bind` is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|e| ConfigError::InvalidValue {
            field: "server.bind".into(),
            reason: format!("'{}': {e}", self.bind),
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.workers".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
