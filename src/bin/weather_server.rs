use anyhow::Result;
use rpc_weather_llm::{config, rpc, telemetry, weather::WeatherMonitorHandler};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
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
    info!("Starting weather server with log level: {}", log_level);

    let handler = WeatherMonitorHandler::new(&config.weather_api)?;
    info!("Using weather API at {}", config.weather_api.base_url);

    let server = rpc::spawn_weather_server(config.weather_server.socket_addr()?, handler).await?;
    server.wait().await?;

    Ok(())
}
