//! Canonical extracted-profile schema and its zero value.
//!
//! Every exit path of the pipeline produces this shape fully populated:
//! missing data is an empty string or empty list, never an absent field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured candidate profile extracted from raw resume text.
///
/// `confidence` is the only trust signal callers should branch on:
/// threshold-or-above means accepted semantic extraction, 0.3 means
/// deterministic fallback, 0.0 means insufficient input or total failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub confidence: f32,
}

impl ExtractedProfile {
    /// The zero value: all fields empty, confidence 0.0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schema-valid profile from an arbitrary JSON object,
    /// coercing each field individually: non-string scalars become `""`,
    /// non-array lists become `[]`, non-numeric confidence becomes 0.0.
    /// A partially malformed object still yields a well-formed profile.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: coerce_string(value.get("name")),
            email: coerce_string(value.get("email")),
            phone: coerce_string(value.get("phone")),
            skills: dedup_preserving_order(coerce_string_list(value.get("skills"))),
            education: coerce_string_list(value.get("education")),
            projects: coerce_string_list(value.get("projects")),
            experience: coerce_string_list(value.get("experience")),
            confidence: coerce_confidence(value.get("confidence")),
        }
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    value
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_default()
}

fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn coerce_confidence(value: Option<&Value>) -> f32 {
    value
        .and_then(|v| v.as_f64())
        .map(|c| c.clamp(0.0, 1.0) as f32)
        .unwrap_or(0.0)
}

/// Collapses duplicates while keeping first-occurrence order.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
