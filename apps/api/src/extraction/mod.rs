//! Resume information-extraction pipeline.
//!
//! Converts unstructured resume text into a structured candidate profile.
//! A model-backed semantic extractor is the primary path; a regex/keyword
//! extractor is the guaranteed-available fallback. Every exit path returns a
//! fully populated schema — failure is signalled through `confidence`, never
//! through errors.

pub mod deterministic;
pub mod handlers;
pub mod pipeline;
pub mod profile;
pub mod prompts;
pub mod semantic;
