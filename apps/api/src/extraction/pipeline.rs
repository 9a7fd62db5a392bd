//! Orchestrator — the single entry point of the extraction pipeline.
//!
//! Semantic extraction is the primary path, deterministic extraction the
//! fallback, and an outer spawn boundary converts any defect into the empty
//! profile. No branch can leave without a schema-valid `ExtractedProfile`;
//! callers judge quality by `confidence` alone, never by catching errors.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::extraction::deterministic::{DeterministicExtractor, SkillDictionary};
use crate::extraction::profile::ExtractedProfile;
use crate::extraction::semantic::{ExtractionSettings, SemanticExtractor};
use crate::llm_client::GenerateClient;

/// Inputs shorter than this (after trimming) are not worth extracting from.
pub const MIN_INPUT_CHARS: usize = 20;

/// Primary/fallback extraction pipeline. Stateless per invocation; clone
/// freely and run any number of extractions concurrently.
#[derive(Clone)]
pub struct ProfileExtractor {
    semantic: SemanticExtractor,
    deterministic: DeterministicExtractor,
}

impl ProfileExtractor {
    pub fn new(
        client: Arc<dyn GenerateClient>,
        settings: ExtractionSettings,
        dictionary: SkillDictionary,
    ) -> Self {
        Self {
            semantic: SemanticExtractor::new(client, settings),
            deterministic: DeterministicExtractor::new(dictionary),
        }
    }

    /// Extracts a profile from raw resume text. Never fails: the worst
    /// possible outcome is the empty profile with confidence 0.0.
    pub async fn extract(&self, raw_text: &str) -> ExtractedProfile {
        let trimmed = raw_text.trim();
        if trimmed.chars().count() < MIN_INPUT_CHARS {
            debug!(
                input_chars = trimmed.chars().count(),
                "input below minimum length, skipping extraction"
            );
            return ExtractedProfile::empty();
        }

        // Run the extractors in their own task so that a panic anywhere in
        // the chain surfaces here as a JoinError instead of unwinding into
        // the caller.
        let pipeline = self.clone();
        let text = trimmed.to_string();
        match tokio::spawn(async move { pipeline.run(&text).await }).await {
            Ok(profile) => profile,
            Err(e) => {
                error!(error = %e, "extraction pipeline defect, returning empty profile");
                ExtractedProfile::empty()
            }
        }
    }

    async fn run(&self, text: &str) -> ExtractedProfile {
        if let Some(profile) = self.semantic.extract(text).await {
            return profile;
        }
        info!("semantic extraction unusable, falling back to deterministic");
        self.deterministic.extract(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    const SAMPLE_RESUME: &str = "Jane Doe, frontend developer. \
        Built react dashboards at Acme Corp. Reach me at jane@example.com.";

    struct StaticClient(String);

    #[async_trait]
    impl GenerateClient for StaticClient {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct HangingClient;

    #[async_trait]
    impl GenerateClient for HangingClient {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            std::future::pending().await
        }
    }

    struct PanickingClient;

    #[async_trait]
    impl GenerateClient for PanickingClient {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            panic!("simulated defect in the model client")
        }
    }

    fn pipeline_with(client: impl GenerateClient + 'static) -> ProfileExtractor {
        ProfileExtractor::new(
            Arc::new(client),
            ExtractionSettings::default(),
            SkillDictionary::default(),
        )
    }

    fn accepted_body() -> String {
        r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "",
            "skills": ["react"],
            "education": [],
            "projects": [],
            "experience": ["Acme Corp"],
            "confidence": 0.95
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty_profile() {
        let pipeline = pipeline_with(StaticClient(accepted_body()));
        let profile = pipeline.extract("").await;
        assert_eq!(profile, ExtractedProfile::empty());
        assert_eq!(profile.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_whitespace_only_input_returns_empty_profile() {
        let pipeline = pipeline_with(StaticClient(accepted_body()));
        let profile = pipeline.extract("   \n\t  \n  ").await;
        assert_eq!(profile, ExtractedProfile::empty());
    }

    #[tokio::test]
    async fn test_input_below_minimum_length_returns_empty_profile() {
        let pipeline = pipeline_with(StaticClient(accepted_body()));
        let short = "x".repeat(MIN_INPUT_CHARS - 1);
        let profile = pipeline.extract(&short).await;
        assert_eq!(profile.confidence, 0.0);
        assert!(profile.skills.is_empty());
    }

    #[tokio::test]
    async fn test_accepted_semantic_result_is_returned_unmodified() {
        let pipeline = pipeline_with(StaticClient(accepted_body()));
        let profile = pipeline.extract(SAMPLE_RESUME).await;
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.skills, vec!["react"]);
        assert_eq!(profile.experience, vec!["Acme Corp"]);
        assert!((profile.confidence - 0.95).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_low_confidence_falls_back_to_deterministic() {
        let body = r#"{"name": "Jane Doe", "confidence": 0.59}"#;
        let pipeline = pipeline_with(StaticClient(body.to_string()));
        let profile = pipeline.extract(SAMPLE_RESUME).await;

        let expected = DeterministicExtractor::default().extract(SAMPLE_RESUME);
        assert_eq!(profile, expected);
        assert_eq!(profile.confidence, 0.3);
        assert_eq!(profile.email, "jane@example.com");
        assert!(profile.name.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back_to_deterministic() {
        let pipeline = pipeline_with(StaticClient("garbage output".to_string()));
        let profile = pipeline.extract(SAMPLE_RESUME).await;
        assert_eq!(profile.confidence, 0.3);
        assert_eq!(profile.skills, vec!["react"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_model_call_times_out_into_fallback() {
        let pipeline = pipeline_with(HangingClient);
        let started = tokio::time::Instant::now();
        let profile = pipeline.extract(SAMPLE_RESUME).await;

        let expected = DeterministicExtractor::default().extract(SAMPLE_RESUME);
        assert_eq!(profile, expected);
        // virtual elapsed time stays at the budget; no extra waiting
        assert!(started.elapsed() <= std::time::Duration::from_secs(7));
    }

    #[tokio::test]
    async fn test_panic_in_model_client_yields_empty_profile() {
        let pipeline = pipeline_with(PanickingClient);
        let profile = pipeline.extract(SAMPLE_RESUME).await;
        assert_eq!(profile, ExtractedProfile::empty());
        assert_eq!(profile.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_identical_input_yields_identical_results() {
        let pipeline = pipeline_with(StaticClient(accepted_body()));
        let first = pipeline.extract(SAMPLE_RESUME).await;
        let second = pipeline.extract(SAMPLE_RESUME).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_result_always_serializes_with_all_fields() {
        let pipeline = pipeline_with(StaticClient("not json".to_string()));
        let profile = pipeline.extract(SAMPLE_RESUME).await;
        let value = serde_json::to_value(&profile).unwrap();
        let object = value.as_object().unwrap();
        for field in [
            "name",
            "email",
            "phone",
            "skills",
            "education",
            "projects",
            "experience",
            "confidence",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }
        assert_eq!(object.len(), 8);
    }

    #[tokio::test]
    async fn test_confidence_is_always_in_unit_interval() {
        let body = r#"{"name": "Jane", "confidence": 42}"#;
        let pipeline = pipeline_with(StaticClient(body.to_string()));
        let profile = pipeline.extract(SAMPLE_RESUME).await;
        assert!((0.0..=1.0).contains(&profile.confidence));
    }
}
