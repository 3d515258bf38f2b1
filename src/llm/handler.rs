use super::model;
use crate::schema::{
    LanguageModelService, ModelError, TextClassificationRequest, TextClassificationResponse,
    TextGenerationRequest, TextGenerationResponse,
};
use std::time::Instant;
use tarpc::context;
use tracing::{error, info};

type ModelResult<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Clone, Default)]
pub struct LanguageModelHandler;

impl LanguageModelHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, request: &TextGenerationRequest) -> ModelResult<TextGenerationResponse> {
        info!(
            "Received generation request with prompt: {}...",
            preview(&request.prompt)
        );

        validate_generation(request).inspect_err(|e| error!("Error in text generation: {}", e))?;

        let start = Instant::now();
        let generation = model::generate(request);
        let generation_time = start.elapsed().as_secs_f64();

        info!(
            "Generated text of length {} ({} tokens) in {:.2} seconds",
            generation.text.len(),
            generation.generated_tokens,
            generation_time
        );

        Ok(TextGenerationResponse {
            generated_text: generation.text,
            generation_time,
            input_tokens: generation.input_tokens,
            generated_tokens: generation.generated_tokens,
        })
    }

    pub fn classify(
        &self,
        request: &TextClassificationRequest,
    ) -> ModelResult<TextClassificationResponse> {
        info!(
            "Received classification request for text: {}...",
            preview(&request.text)
        );

        validate_classification(request)
            .inspect_err(|e| error!("Error in text classification: {}", e))?;

        let start = Instant::now();
        let classification = model::classify(&request.text, &request.labels);
        let classification_time = start.elapsed().as_secs_f64();

        info!(
            "Classified text as '{}' with confidence {:.2} in {:.2} seconds",
            classification.label, classification.confidence, classification_time
        );

        Ok(TextClassificationResponse {
            label: classification.label,
            confidence: classification.confidence,
            classification_time,
        })
    }
}

impl LanguageModelService for LanguageModelHandler {
    async fn generate_text(
        self,
        _: context::Context,
        request: TextGenerationRequest,
    ) -> ModelResult<TextGenerationResponse> {
        self.generate(&request)
    }

    async fn classify_text(
        self,
        _: context::Context,
        request: TextClassificationRequest,
    ) -> ModelResult<TextClassificationResponse> {
        self.classify(&request)
    }
}

fn validate_generation(request: &TextGenerationRequest) -> ModelResult<()> {
    if request.prompt.trim().is_empty() {
        return Err(ModelError::invalid_request("prompt must not be empty"));
    }
    if request.max_length <= 0 {
        return Err(ModelError::invalid_request(format!(
            "max_length must be positive, got {}",
            request.max_length
        )));
    }
    if !(0.0..=2.0).contains(&request.temperature) {
        return Err(ModelError::invalid_request(format!(
            "temperature must be between 0 and 2, got {}",
            request.temperature
        )));
    }
    if !(request.top_p > 0.0 && request.top_p <= 1.0) {
        return Err(ModelError::invalid_request(format!(
            "top_p must be in (0, 1], got {}",
            request.top_p
        )));
    }
    if request.top_k <= 0 {
        return Err(ModelError::invalid_request(format!(
            "top_k must be positive, got {}",
            request.top_k
        )));
    }
    Ok(())
}

fn validate_classification(request: &TextClassificationRequest) -> ModelResult<()> {
    if request.text.trim().is_empty() {
        return Err(ModelError::invalid_request("text must not be empty"));
    }
    if request.labels.is_empty() {
        return Err(ModelError::invalid_request("labels must not be empty"));
    }
    if request.labels.iter().any(|label| label.trim().is_empty()) {
        return Err(ModelError::invalid_request("labels must not contain blanks"));
    }
    Ok(())
}

/// First 50 characters, for log lines.
fn preview(text: &str) -> &str {
    match text.char_indices().nth(50) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
