pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching_handlers;
use crate::search::handlers as search_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/jobs", get(search_handlers::handle_search))
        .route(
            "/api/search-keywords",
            get(search_handlers::handle_popular_keywords),
        )
        .route(
            "/api/upload-resume",
            post(matching_handlers::handle_match_resume),
        )
        .route(
            "/api/upload-resume/classify",
            post(matching_handlers::handle_match_resume_by_role),
        )
        .with_state(state)
}
