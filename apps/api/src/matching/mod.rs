//! Resume-to-job matching.
//!
//! Two strategies live behind one capability: lexical overlap scoring (pure,
//! in-process) and role classification (delegates ranking to a hosted
//! zero-shot model). Handlers select the strategy per request; both feed the
//! same search engine so query filters and pagination stack on top of the
//! ranked subset.

pub mod classifier;
pub mod handlers;
pub mod lexical;

use async_trait::async_trait;

use crate::catalog::JobCatalog;
use crate::errors::AppError;
use crate::models::job::RankedJob;

/// Output of a matching strategy: a ranked subset of the catalog, plus the
/// predicted role labels when an external classifier produced the ranking.
pub struct MatchOutcome {
    pub jobs: Vec<RankedJob>,
    pub predicted_roles: Option<Vec<String>>,
}

/// One resume-matching backend. Implementations never mutate the catalog.
///
/// Carried in `AppState` as `Arc<dyn ResumeMatchStrategy>`, one per endpoint.
#[async_trait]
pub trait ResumeMatchStrategy: Send + Sync {
    async fn rank(
        &self,
        resume_text: &str,
        catalog: &JobCatalog,
    ) -> Result<MatchOutcome, AppError>;
}
