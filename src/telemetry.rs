use crate::{Error, Result, config::LogsConfig};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<LevelFilter> {
    level.parse::<LevelFilter>().map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        ))
    })
}

/// Installs the JSON subscriber. `RUST_LOG` overrides the configured level.
pub fn init(logs: &LogsConfig) -> Result<String> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| logs.level.clone());

    // RUST_LOG may carry directives ("rpc_weather_llm=debug"), which are not
    // plain levels, so only the configured value is checked strictly.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::default().add_directive(validate_log_level(&log_level)?.into()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .map_err(|e| Error::internal(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(log_level)
}
