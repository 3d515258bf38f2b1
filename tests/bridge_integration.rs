use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rpc_weather_llm::{
    bridge::{
        pool::{ConnectionPool, WeatherConnector},
        types::{ClassifyResponse, ErrorResponse, GenerateResponse, TemperatureResponse},
    },
    rpc,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

mod common;

use common::{
    bridge_state, dead_addr, fast_settings, forecast_body, mock_forecast_api,
    start_language_model_server, start_weather_server, test_bridge,
};

#[tokio::test]
async fn test_temperature_without_location_is_rejected() {
    let forecast_api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(1.0)))
        .expect(0)
        .mount(&forecast_api)
        .await;
    let weather = start_weather_server(&forecast_api).await;
    let state = bridge_state(weather.local_addr(), dead_addr());
    let server = test_bridge(state.clone());

    let response = server.post("/api/temperature").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Location is required");
    // Rejected before the pool was touched.
    assert!(!state.weather.is_connected().await);
}

#[tokio::test]
async fn test_blank_location_is_rejected() {
    let state = bridge_state(dead_addr(), dead_addr());
    let server = test_bridge(state);

    let response = server
        .post("/api/temperature")
        .json(&json!({"location": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sequential_requests_share_cached_connection() {
    let forecast_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "51.507400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(14.5)))
        .expect(1)
        .mount(&forecast_api)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.856600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(19.0)))
        .expect(1)
        .mount(&forecast_api)
        .await;
    let weather = start_weather_server(&forecast_api).await;
    let state = bridge_state(weather.local_addr(), dead_addr());
    let server = test_bridge(state.clone());

    let london = server
        .post("/api/temperature")
        .json(&json!({"location": "london"}))
        .await;
    assert_eq!(london.status_code(), StatusCode::OK);
    assert!(state.weather.is_connected().await);

    let paris = server
        .post("/api/temperature")
        .json(&json!({"location": "paris"}))
        .await;
    assert_eq!(paris.status_code(), StatusCode::OK);

    let london: TemperatureResponse = london.json();
    let paris: TemperatureResponse = paris.json();
    assert_eq!(london.location, "london");
    assert_eq!(london.temperature, 14.5);
    assert_eq!(london.unit, "celsius");
    assert!(london.timestamp.parse::<i64>().unwrap() > 0);
    assert_eq!(paris.location, "paris");
    assert_eq!(paris.temperature, 19.0);
}

#[tokio::test]
async fn test_upstream_failure_returns_server_error_and_drops_connection() {
    let forecast_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&forecast_api)
        .await;
    let weather = start_weather_server(&forecast_api).await;
    let state = bridge_state(weather.local_addr(), dead_addr());
    let server = test_bridge(state.clone());

    let response = server
        .post("/api/temperature")
        .json(&json!({"location": "tokyo"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Weather API error");
    assert_eq!(body.details.as_deref(), Some("Status code: 500"));
    assert!(!state.weather.is_connected().await);
}

#[tokio::test]
async fn test_unreachable_rpc_server_returns_service_unavailable() {
    let state = bridge_state(dead_addr(), dead_addr());
    let server = test_bridge(state.clone());

    let response = server
        .post("/api/temperature")
        .json(&json!({"location": "london"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "RPC server unavailable");
    assert!(body.details.is_some());
    assert!(!state.weather.is_connected().await);
}

#[tokio::test]
async fn test_dropped_rpc_connection_returns_bad_gateway() {
    let (addr, hangup) = common::hang_up_once().await;
    let state = bridge_state(addr, dead_addr());
    let server = test_bridge(state.clone());

    let response = server
        .post("/api/temperature")
        .json(&json!({"location": "london"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "RPC call failed");
    assert!(body.details.is_some());
    assert!(!state.weather.is_connected().await);

    // Bring a real server up on the same port; the next request reconnects.
    hangup.await.unwrap();
    let forecast_api = mock_forecast_api(12.0).await;
    let weather = rpc::spawn_weather_server(addr, common::weather_handler(&forecast_api))
        .await
        .unwrap();

    let response = server
        .post("/api/temperature")
        .json(&json!({"location": "london"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: TemperatureResponse = response.json();
    assert_eq!(body.temperature, 12.0);
    assert!(state.weather.is_connected().await);

    weather.shutdown();
}

#[tokio::test]
async fn test_bridge_reconnects_after_invalidate() {
    let forecast_api = mock_forecast_api(9.5).await;
    let weather = start_weather_server(&forecast_api).await;
    let addr = weather.local_addr();
    let state = bridge_state(addr, dead_addr());
    let server = test_bridge(state.clone());

    let first = server
        .post("/api/temperature")
        .json(&json!({"location": "london"}))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    // A fresh pool against the same endpoint opens its own connection.
    let fresh = ConnectionPool::new(WeatherConnector::new(addr, fast_settings()));
    assert!(fresh.acquire().await.is_ok());

    state.weather.clear().await;
    let second = server
        .post("/api/temperature")
        .json(&json!({"location": "sydney"}))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);
    let body: TemperatureResponse = second.json();
    assert_eq!(body.location, "sydney");
    assert!(state.weather.is_connected().await);
}

#[tokio::test]
async fn test_generate_with_defaults() {
    let language_model = start_language_model_server().await;
    let state = bridge_state(dead_addr(), language_model.local_addr());
    let server = test_bridge(state);

    let response = server
        .post("/api/llm")
        .json(&json!({"prompt": "Hello, how are you?"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: GenerateResponse = response.json();
    assert!(!body.text.is_empty());
    assert_eq!(body.input_tokens, 4);
    assert!(body.generated_tokens > 0);
    assert!(body.generation_time >= 0.0);
}

#[tokio::test]
async fn test_generate_honours_max_tokens() {
    let language_model = start_language_model_server().await;
    let state = bridge_state(dead_addr(), language_model.local_addr());
    let server = test_bridge(state);

    let response = server
        .post("/api/llm")
        .json(&json!({"prompt": "Tell me a story", "temperature": 0.2, "maxTokens": 3}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: GenerateResponse = response.json();
    assert_eq!(body.generated_tokens, 3);
}

#[tokio::test]
async fn test_generate_without_prompt_is_rejected() {
    let state = bridge_state(dead_addr(), dead_addr());
    let server = test_bridge(state.clone());

    let response = server.post("/api/llm").json(&json!({"maxTokens": 10})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Prompt is required");
    assert!(!state.language_model.is_connected().await);
}

#[tokio::test]
async fn test_rejected_generation_is_a_client_error() {
    let language_model = start_language_model_server().await;
    let state = bridge_state(dead_addr(), language_model.local_addr());
    let server = test_bridge(state.clone());

    let response = server
        .post("/api/llm")
        .json(&json!({"prompt": "hi", "temperature": 9.0}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Invalid request");
    assert!(body.details.unwrap().contains("temperature"));
    // The connection itself is healthy and stays cached.
    assert!(state.language_model.is_connected().await);
}

#[tokio::test]
async fn test_classify_through_bridge() {
    let language_model = start_language_model_server().await;
    let state = bridge_state(dead_addr(), language_model.local_addr());
    let server = test_bridge(state);

    let response = server
        .post("/api/classify")
        .json(&json!({
            "text": "I absolutely loved this movie!",
            "labels": ["positive", "negative", "neutral"]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ClassifyResponse = response.json();
    assert_eq!(body.label, "positive");
    assert!(body.confidence > 0.0 && body.confidence < 1.0);
}

#[tokio::test]
async fn test_classify_without_labels_is_rejected() {
    let state = bridge_state(dead_addr(), dead_addr());
    let server = test_bridge(state);

    let response = server
        .post("/api/classify")
        .json(&json!({"text": "hello", "labels": []}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let state = bridge_state(dead_addr(), dead_addr());
    let server = test_bridge(state);

    let response = server
        .post("/api/temperature")
        .text("invalid json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
