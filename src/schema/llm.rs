use super::INVALID_REQUEST;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_LENGTH: i32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;
pub const DEFAULT_TOP_K: i32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub max_length: i32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: i32,
}

impl TextGenerationRequest {
    /// Request for `prompt` with every sampling parameter at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

impl Default for TextGenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationResponse {
    pub generated_text: String,
    /// Seconds
    pub generation_time: f64,
    pub input_tokens: i32,
    pub generated_tokens: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextClassificationRequest {
    pub text: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextClassificationResponse {
    pub label: String,
    pub confidence: f64,
    /// Seconds
    pub classification_time: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}: {details}")]
pub struct ModelError {
    pub message: String,
    pub details: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, details)
    }

    /// The request was rejected before the model ran.
    pub fn is_invalid_request(&self) -> bool {
        self.message == INVALID_REQUEST
    }
}

#[tarpc::service]
pub trait LanguageModelService {
    async fn generate_text(
        request: TextGenerationRequest,
    ) -> Result<TextGenerationResponse, ModelError>;

    async fn classify_text(
        request: TextClassificationRequest,
    ) -> Result<TextClassificationResponse, ModelError>;
}
