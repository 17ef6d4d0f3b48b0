use std::sync::Arc;

use crate::catalog::JobCatalog;
use crate::config::Config;
use crate::keywords::KeywordTracker;
use crate::matching::ResumeMatchStrategy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; freely shared across concurrent requests.
    pub catalog: Arc<JobCatalog>,
    pub keywords: KeywordTracker,
    /// Lexical overlap matcher — the default resume matching path.
    pub lexical: Arc<dyn ResumeMatchStrategy>,
    /// Classification-backed matcher selected by the classify endpoint.
    pub by_role: Arc<dyn ResumeMatchStrategy>,
    pub config: Config,
}
