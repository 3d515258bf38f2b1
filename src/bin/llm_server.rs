use anyhow::Result;
use rpc_weather_llm::{config, llm::LanguageModelHandler, rpc, telemetry};
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
    info!("Starting language model server with log level: {}", log_level);

    let server = rpc::spawn_language_model_server(
        config.language_server.socket_addr()?,
        LanguageModelHandler::new(),
    )
    .await?;
    server.wait().await?;

    Ok(())
}
