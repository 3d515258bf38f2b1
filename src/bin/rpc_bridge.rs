use anyhow::Result;
use rpc_weather_llm::{bridge, config, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match telemetry::init(&config.logs) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Starting RPC bridge with log level: {}", log_level);
    info!(
        "Connection reuse is {}",
        if config.bridge.reuse_connections { "on" } else { "off" }
    );

    bridge::run(config).await?;

    Ok(())
}
