use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::models::job::NormalizedJob;
use crate::search::{self, QuerySpec, RawQuery, SearchPage};
use crate::state::AppState;

/// Popular-keyword responses are truncated to this many entries.
const TOP_KEYWORDS: usize = 10;

/// GET /api/jobs
///
/// Filters, sorts, and paginates the full catalog. The raw title filter is
/// counted for keyword popularity before coercion, so popularity reflects
/// what users actually typed.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> Json<SearchPage<NormalizedJob>> {
    if let Some(title) = raw.title.as_deref() {
        state.keywords.record(title);
    }
    let query = QuerySpec::from_raw(&raw);
    Json(search::apply(state.catalog.all(), &query))
}

#[derive(Debug, Serialize)]
pub struct KeywordCount {
    pub term: String,
    pub count: u64,
}

/// GET /api/search-keywords
///
/// Most-searched title terms, count descending. Equal counts order by term so
/// the response is deterministic.
pub async fn handle_popular_keywords(State(state): State<AppState>) -> Json<Vec<KeywordCount>> {
    let mut counts: Vec<(String, u64)> = state.keywords.snapshot().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Json(
        counts
            .into_iter()
            .take(TOP_KEYWORDS)
            .map(|(term, count)| KeywordCount { term, count })
            .collect(),
    )
}
