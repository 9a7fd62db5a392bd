use crate::extraction::pipeline::ProfileExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The extraction pipeline. Stateless per request, safe to share.
    pub extractor: ProfileExtractor,
}
