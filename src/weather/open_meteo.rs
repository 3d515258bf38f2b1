//! Client for the Open-Meteo forecast API.
//!
//! Every failure is reported as a [`WeatherServiceError`] so the handler can
//! hand it straight back to the RPC caller. One attempt per call, no retry.

use super::Coordinates;
use crate::{Result, config::WeatherApiConfig, schema::WeatherServiceError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

const USER_AGENT: &str = concat!("rpc-weather-llm/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(config: &WeatherApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current temperature in celsius at `coordinates`.
    pub async fn current_temperature(
        &self,
        coordinates: Coordinates,
    ) -> std::result::Result<f64, WeatherServiceError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let query = [
            ("latitude", format!("{:.6}", coordinates.latitude)),
            ("longitude", format!("{:.6}", coordinates.longitude)),
            ("current", "temperature_2m".to_string()),
        ];
        debug!("Making request to: {} with {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching weather data: {}", e);
                WeatherServiceError::new("Failed to fetch weather data", e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Error reading response body: {}", e);
            WeatherServiceError::new("Failed to read response", e.to_string())
        })?;
        debug!("Raw API response: {}", body);

        if status != StatusCode::OK {
            error!("API returned non-200 status code: {}", status.as_u16());
            return Err(WeatherServiceError::new(
                "Weather API error",
                format!("Status code: {}", status.as_u16()),
            ));
        }

        parse_forecast(&body)
    }
}

/// Pulls the current temperature out of a forecast payload.
pub fn parse_forecast(body: &str) -> std::result::Result<f64, WeatherServiceError> {
    let forecast: ForecastResponse = serde_json::from_str(body).map_err(|e| {
        error!("Error decoding weather data: {}", e);
        WeatherServiceError::new("Failed to decode weather data", e.to_string())
    })?;

    if forecast.error {
        error!("API returned error: {}", forecast.reason);
        return Err(WeatherServiceError::new("Weather API error", forecast.reason));
    }

    forecast
        .current
        .map(|current| current.temperature)
        .ok_or_else(|| {
            WeatherServiceError::new(
                "Failed to decode weather data",
                "missing current temperature",
            )
        })
}
