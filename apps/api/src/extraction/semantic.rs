//! Semantic Extractor — model-backed extraction under a confidence gate and
//! a hard time budget.
//!
//! Every failure mode (connection error, timeout, malformed JSON, low
//! self-reported confidence) collapses to `None`, logged with enough detail
//! to tell the causes apart. Nothing on this path throws past its boundary.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_SEMANTIC_TIMEOUT_SECS};
use crate::extraction::profile::ExtractedProfile;
use crate::extraction::prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};
use crate::llm_client::{strip_json_fences, GenerateClient};

/// Resume text beyond this many characters is dropped before prompting.
/// Resumes front-load the high-value signal, so losing the tail is an
/// acceptable tradeoff against the model's practical input limits.
pub const MAX_PROMPT_CHARS: usize = 5_000;

/// Tuning knobs for the semantic stage, injected rather than read from
/// globals so tests can run with alternate thresholds and budgets.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub semantic_timeout: Duration,
    pub confidence_threshold: f32,
    pub max_prompt_chars: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            semantic_timeout: Duration::from_secs(DEFAULT_SEMANTIC_TIMEOUT_SECS),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_prompt_chars: MAX_PROMPT_CHARS,
        }
    }
}

impl From<&Config> for ExtractionSettings {
    fn from(config: &Config) -> Self {
        Self {
            semantic_timeout: config.semantic_timeout,
            confidence_threshold: config.confidence_threshold,
            max_prompt_chars: MAX_PROMPT_CHARS,
        }
    }
}

/// Model-backed extractor. Holds the generation backend behind a trait
/// object so tests can substitute deterministic mocks.
#[derive(Clone)]
pub struct SemanticExtractor {
    client: Arc<dyn GenerateClient>,
    settings: ExtractionSettings,
}

impl SemanticExtractor {
    pub fn new(client: Arc<dyn GenerateClient>, settings: ExtractionSettings) -> Self {
        Self { client, settings }
    }

    /// Attempts one model-backed extraction. `None` means "nothing usable":
    /// the orchestrator falls back to the deterministic path.
    pub async fn extract(&self, text: &str) -> Option<ExtractedProfile> {
        let truncated = truncate_chars(text, self.settings.max_prompt_chars);
        let prompt = EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", truncated);

        let call = self.client.generate(&prompt, EXTRACTION_SYSTEM);
        let response = match timeout(self.settings.semantic_timeout, call).await {
            Err(_) => {
                // the in-flight call is dropped; any late result is discarded
                warn!(
                    budget_ms = self.settings.semantic_timeout.as_millis() as u64,
                    "semantic extraction timed out, abandoning model call"
                );
                return None;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "semantic extraction model call failed");
                return None;
            }
            Ok(Ok(body)) => body,
        };

        let value: Value = match serde_json::from_str(strip_json_fences(&response)) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "semantic extraction returned invalid JSON");
                return None;
            }
        };

        if !value.is_object() {
            warn!("semantic extraction returned JSON that is not an object");
            return None;
        }

        let confidence = value
            .get("confidence")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;

        if confidence < self.settings.confidence_threshold {
            warn!(
                confidence = confidence as f64,
                threshold = self.settings.confidence_threshold as f64,
                "rejecting semantic extraction below confidence threshold"
            );
            return None;
        }

        debug!(confidence = confidence as f64, "semantic extraction accepted");
        Some(ExtractedProfile::from_value(&value))
    }
}

/// Truncates to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
