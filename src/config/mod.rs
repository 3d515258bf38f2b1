mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Loads the configuration named by `CONFIG_PATH` (default `config.yaml`).
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from_path(&config_path).await
}

/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub async fn load_from_path(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    debug!("Loading configuration from: {}", config_path.display());

    let config = match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => serde_yaml::from_str::<Config>(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(
                "No configuration file at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.weather_api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::config(format!(
                "Weather API base URL must be an HTTP or HTTPS URL, got '{base_url}'"
            )));
        }

        if self.rpc_client.connect_retries == 0 {
            return Err(Error::config("rpc_client.connect_retries must be at least 1"));
        }

        if self.rpc_client.connect_timeout_seconds == 0 {
            return Err(Error::config(
                "rpc_client.connect_timeout_seconds must be at least 1",
            ));
        }

        let level = self.logs.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logs.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        self.weather_server.socket_addr()?;
        self.language_server.socket_addr()?;
        self.bridge.socket_addr()?;

        Ok(())
    }
}
