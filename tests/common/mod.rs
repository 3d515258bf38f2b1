#![allow(dead_code)]

use axum_test::TestServer;
use rpc_weather_llm::{
    bridge::{
        self,
        handlers::AppState,
        pool::{ConnectionPool, LanguageModelConnector, WeatherConnector},
    },
    config::WeatherApiConfig,
    llm::LanguageModelHandler,
    rpc::{self, ClientSettings, RunningServer},
    weather::WeatherMonitorHandler,
};
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub fn any_local_addr() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

/// An address with nothing listening on it.
pub fn dead_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Accepts one TCP connection and closes it straight away. The listener is
/// gone once the returned task finishes, freeing the port.
pub async fn hang_up_once() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind(any_local_addr()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    (addr, handle)
}

pub fn fast_settings() -> ClientSettings {
    ClientSettings {
        connect_timeout: Duration::from_secs(2),
        connect_retries: 2,
        retry_backoff: Duration::from_millis(10),
    }
}

pub fn forecast_body(temperature: f64) -> Value {
    json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "current": {
            "time": "2024-06-01T12:00",
            "interval": 900,
            "temperature_2m": temperature
        },
        "error": false
    })
}

pub fn weather_handler(forecast_api: &MockServer) -> WeatherMonitorHandler {
    WeatherMonitorHandler::new(&WeatherApiConfig {
        base_url: forecast_api.uri(),
        timeout_seconds: Some(5),
    })
    .unwrap()
}

/// Forecast API that answers every request with `temperature`.
pub async fn mock_forecast_api(temperature: f64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(temperature)))
        .mount(&server)
        .await;
    server
}

pub async fn start_weather_server(forecast_api: &MockServer) -> RunningServer {
    rpc::spawn_weather_server(any_local_addr(), weather_handler(forecast_api))
        .await
        .unwrap()
}

pub async fn start_language_model_server() -> RunningServer {
    rpc::spawn_language_model_server(any_local_addr(), LanguageModelHandler::new())
        .await
        .unwrap()
}

pub fn bridge_state(weather_addr: SocketAddr, language_model_addr: SocketAddr) -> AppState {
    AppState {
        weather: Arc::new(ConnectionPool::new(WeatherConnector::new(
            weather_addr,
            fast_settings(),
        ))),
        language_model: Arc::new(ConnectionPool::new(LanguageModelConnector::new(
            language_model_addr,
            fast_settings(),
        ))),
    }
}

pub fn test_bridge(state: AppState) -> TestServer {
    TestServer::new(bridge::router(state)).unwrap()
}
