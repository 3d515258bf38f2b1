pub mod handlers;
pub mod pool;
pub mod types;

use crate::{Result, config::Config, rpc::ClientSettings};
use axum::{Router, routing::post};
use handlers::AppState;
use pool::{ConnectionPool, LanguageModelConnector, WeatherConnector};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = ClientSettings::from(&config.rpc_client);
        let reuse = config.bridge.reuse_connections;

        Ok(Self {
            weather: Arc::new(ConnectionPool::with_reuse(
                WeatherConnector::new(config.weather_server.socket_addr()?, settings),
                reuse,
            )),
            language_model: Arc::new(ConnectionPool::with_reuse(
                LanguageModelConnector::new(config.language_server.socket_addr()?, settings),
                reuse,
            )),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/temperature", post(handlers::temperature))
        .route("/api/llm", post(handlers::generate))
        .route("/api/classify", post(handlers::classify))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = config.bridge.socket_addr()?;
    info!("Starting HTTP bridge on {}", addr);
    info!(
        "Forwarding to weather server at {} and language model server at {}",
        config.weather_server.socket_addr()?,
        config.language_server.socket_addr()?
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
