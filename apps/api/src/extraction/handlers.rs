//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extraction::profile::ExtractedProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub profile: ExtractedProfile,
}

/// POST /api/v1/profiles/extract
///
/// Runs the extraction pipeline over raw resume text. This handler cannot
/// fail: insufficient or adversarial input comes back as a well-formed
/// profile with low confidence, never as an error status.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    let profile = state.extractor.extract(&request.resume_text).await;

    info!(
        input_chars = request.resume_text.chars().count(),
        confidence = profile.confidence as f64,
        "profile extraction complete"
    );

    Json(ExtractResponse { profile })
}
