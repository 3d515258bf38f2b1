use super::INVALID_REQUEST;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field order is the wire contract; append new fields, never reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub location: String,
}

impl WeatherRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub temperature: f64,
    pub location: String,
    /// Unix seconds
    pub timestamp: i64,
    pub unit: String,
}

impl TemperatureReading {
    pub const DEFAULT_UNIT: &'static str = "celsius";
}

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}: {details}")]
pub struct WeatherServiceError {
    pub message: String,
    pub details: String,
}

impl WeatherServiceError {
    pub fn new(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, details)
    }

    pub fn is_invalid_request(&self) -> bool {
        self.message == INVALID_REQUEST
    }
}

#[tarpc::service]
pub trait WeatherMonitorService {
    /// Current temperature at the named location.
    async fn get_temperature(
        request: WeatherRequest,
    ) -> Result<TemperatureReading, WeatherServiceError>;
}
