use std::sync::Arc;

use crate::analysis::reasoner::ResumeReasoner;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-session data; every request is independent.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable reasoning adapter. Gemini when a key is configured, local otherwise.
    pub reasoner: Arc<dyn ResumeReasoner>,
}
