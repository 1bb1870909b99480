//! Client configuration.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub const ENDPOINT_ENV: &str = "MILVUS_ENDPOINT";
pub const DATABASE_ENV: &str = "MILVUS_DATABASE";
pub const CONNECT_TIMEOUT_ENV: &str = "MILVUS_CONNECT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// gRPC endpoint, e.g. `http://127.0.0.1:19530`.
    pub endpoint: String,
    /// Database name sent with every request.
    pub database: String,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Builds a config from `MILVUS_*` environment variables, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config = ClientConfig::default();
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        if let Some(database) = lookup(DATABASE_ENV) {
            config.database = database;
        }
        if let Some(secs) = lookup(CONNECT_TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ClientError::Configuration(format!("{} must be a whole number of seconds, got '{}'", CONNECT_TIMEOUT_ENV, secs))
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "endpoint must start with http:// or https://, got '{}'",
                self.endpoint
            )));
        }
        if self.database.is_empty() {
            return Err(ClientError::Configuration("database name cannot be empty".to_string()));
        }
        if self.connect_timeout.is_zero() {
            return Err(ClientError::Configuration("connect timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: "http://127.0.0.1:19530".to_string(),
            database: "default".to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}
