use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is per-user; every analysis is independent.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Default: LlmAnalyzer over the Anthropic client.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
}
