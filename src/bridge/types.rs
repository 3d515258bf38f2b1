use crate::schema::{TemperatureReading, TextClassificationResponse, TextGenerationResponse};
use serde::{Deserialize, Serialize};

// Required fields are optional here so a missing one is answered with our
// own 400 body instead of axum's rejection.

#[derive(Debug, Deserialize)]
pub struct TemperatureRequest {
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TemperatureResponse {
    pub temperature: f64,
    pub location: String,
    pub timestamp: String,
    pub unit: String,
}

impl From<TemperatureReading> for TemperatureResponse {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            temperature: reading.temperature,
            location: reading.location,
            timestamp: reading.timestamp.to_string(),
            unit: reading.unit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub text: String,
    pub generation_time: f64,
    pub input_tokens: i32,
    pub generated_tokens: i32,
}

impl From<TextGenerationResponse> for GenerateResponse {
    fn from(response: TextGenerationResponse) -> Self {
        Self {
            text: response.generated_text,
            generation_time: response.generation_time,
            input_tokens: response.input_tokens,
            generated_tokens: response.generated_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub label: String,
    pub confidence: f64,
    pub classification_time: f64,
}

impl From<TextClassificationResponse> for ClassifyResponse {
    fn from(response: TextClassificationResponse) -> Self {
        Self {
            label: response.label,
            confidence: response.confidence,
            classification_time: response.classification_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
