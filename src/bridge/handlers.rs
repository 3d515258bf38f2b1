use super::{
    pool::{ConnectionPool, Connector, LanguageModelConnector, Pooled, WeatherConnector},
    types::{
        ClassifyRequest, ClassifyResponse, ErrorResponse, GenerateRequest, GenerateResponse,
        TemperatureRequest, TemperatureResponse,
    },
};
use crate::{
    Error,
    schema::{
        DEFAULT_MAX_LENGTH, DEFAULT_TEMPERATURE, INVALID_REQUEST, ModelError,
        TextClassificationRequest, TextGenerationRequest, WeatherRequest, WeatherServiceError,
    },
};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tarpc::context;
use tracing::{error, info, warn};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<ConnectionPool<WeatherConnector>>,
    pub language_model: Arc<ConnectionPool<LanguageModelConnector>>,
}

pub async fn temperature(
    State(state): State<AppState>,
    Json(request): Json<TemperatureRequest>,
) -> Result<Json<TemperatureResponse>, ApiError> {
    let location = required(request.location, "Location is required")?;
    info!("Received temperature request for location: {}", location);

    let pooled = acquire(&state.weather).await?;
    let result = pooled
        .client
        .get_temperature(context::current(), WeatherRequest::new(location))
        .await;
    let reading = settle(&state.weather, &pooled, Error::from_call(result)).await?;

    info!(
        "Temperature for {}: {} {}",
        reading.location, reading.temperature, reading.unit
    );
    Ok(Json(reading.into()))
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = required(request.prompt, "Prompt is required")?;
    info!("Received generation request ({} chars)", prompt.len());

    let rpc_request = TextGenerationRequest {
        prompt,
        max_length: request.max_tokens.unwrap_or(DEFAULT_MAX_LENGTH),
        temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        ..TextGenerationRequest::default()
    };

    let pooled = acquire(&state.language_model).await?;
    let result = pooled
        .client
        .generate_text(context::current(), rpc_request)
        .await;
    let response = settle(&state.language_model, &pooled, Error::from_call(result)).await?;

    Ok(Json(response.into()))
}

pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let text = required(request.text, "Text is required")?;
    let labels = match request.labels {
        Some(labels) if !labels.is_empty() => labels,
        _ => return Err(bad_request("Labels are required")),
    };
    info!("Received classification request with {} labels", labels.len());

    let pooled = acquire(&state.language_model).await?;
    let result = pooled
        .client
        .classify_text(context::current(), TextClassificationRequest { text, labels })
        .await;
    let response = settle(&state.language_model, &pooled, Error::from_call(result)).await?;

    Ok(Json(response.into()))
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(bad_request(message)),
    }
}

async fn acquire<C: Connector>(pool: &ConnectionPool<C>) -> Result<Pooled<C::Client>, ApiError> {
    pool.acquire().await.map_err(|e| {
        error!("Failed to connect to RPC server at {}: {}", pool.endpoint(), e);
        api_error(e)
    })
}

/// Turns a call outcome into the handler's result. Anything but a rejected
/// request drops the connection the call went out on.
async fn settle<C: Connector, T>(
    pool: &ConnectionPool<C>,
    pooled: &Pooled<C::Client>,
    outcome: crate::Result<T>,
) -> Result<T, ApiError> {
    let e = match outcome {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if e.is_invalid_request() {
        warn!("Service rejected request: {}", e);
    } else {
        if e.is_transport() {
            error!("RPC call to {} failed: {}", pool.endpoint(), e);
        } else {
            error!("Service at {} returned an error: {}", pool.endpoint(), e);
        }
        pool.invalidate(pooled).await;
    }
    Err(api_error(e))
}

fn api_error(e: Error) -> ApiError {
    match e {
        Error::Connect { .. } => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "RPC server unavailable",
            Some(e.to_string()),
        ),
        Error::Rpc(_) => error_response(
            StatusCode::BAD_GATEWAY,
            "RPC call failed",
            Some(e.to_string()),
        ),
        Error::Weather(WeatherServiceError { message, details })
        | Error::Model(ModelError { message, details }) => {
            let status = if message == INVALID_REQUEST {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, message, Some(details))
        }
        other => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            Some(other.to_string()),
        ),
    }
}

fn bad_request(message: &str) -> ApiError {
    warn!("Rejected request: {}", message);
    error_response(StatusCode::BAD_REQUEST, message, None)
}

fn error_response(status: StatusCode, error: impl Into<String>, details: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            details,
        }),
    )
}
