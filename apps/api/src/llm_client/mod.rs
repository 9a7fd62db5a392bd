/// LLM Client — the single point of entry for all model calls in this service.
///
/// ARCHITECTURAL RULE: No other module may call the generation endpoint
/// directly. All model interactions MUST go through this module.
///
/// The backend is a locally reachable Ollama-compatible endpoint. Each call
/// is a single attempt: the extraction pipeline owns the timeout and the
/// fallback, so the client itself carries no retry loop.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

/// Seam between the extraction pipeline and the generation backend.
/// Tests swap in deterministic mocks; production uses `LlmClient`.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    /// Sends one prompt and returns the raw response text.
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    /// Structured-output flag: constrains the model to emit valid JSON.
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// The single model client used by the extraction pipeline.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerateClient for LlmClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;

        if generated.response.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            "model call succeeded: model={}, response_bytes={}",
            self.model,
            generated.response.len()
        );

        Ok(generated.response)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
/// The `format: "json"` flag should prevent fences, but smaller models
/// still emit them occasionally.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
