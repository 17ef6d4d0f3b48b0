use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::MatchOutcome;
use crate::models::job::RankedJob;
use crate::search::{self, QuerySpec, RawQuery, SearchPage};
use crate::state::AppState;

/// Multipart field that carries the resume document.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ResumeMatchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_roles: Option<Vec<String>>,
    #[serde(flatten)]
    pub page: SearchPage<RankedJob>,
}

/// POST /api/upload-resume
///
/// Lexical overlap matching: extract the resume text, score the catalog, then
/// apply the same filters and pagination as plain search on the ranked subset.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
    multipart: Multipart,
) -> Result<Json<ResumeMatchResponse>, AppError> {
    let resume_text = extract_resume_text(multipart).await?;
    let outcome = state.lexical.rank(&resume_text, &state.catalog).await?;
    Ok(Json(respond(outcome, &raw)))
}

/// POST /api/upload-resume/classify
///
/// Classification-backed matching: predicted role labels are echoed in the
/// response alongside the filtered page.
pub async fn handle_match_resume_by_role(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
    multipart: Multipart,
) -> Result<Json<ResumeMatchResponse>, AppError> {
    let resume_text = extract_resume_text(multipart).await?;
    let outcome = state.by_role.rank(&resume_text, &state.catalog).await?;
    Ok(Json(respond(outcome, &raw)))
}

fn respond(outcome: MatchOutcome, raw: &RawQuery) -> ResumeMatchResponse {
    let query = QuerySpec::from_raw(raw);
    ResumeMatchResponse {
        predicted_roles: outcome.predicted_roles,
        page: search::apply(&outcome.jobs, &query),
    }
}

/// Pulls the `resume` field out of the upload and extracts its text.
/// Anything that is not a readable PDF is rejected before matching starts;
/// the catalog and keyword counter are untouched on rejection.
async fn extract_resume_text(mut multipart: Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        if field.content_type() != Some("application/pdf") {
            return Err(AppError::Validation(
                "only PDF resumes are supported".to_string(),
            ));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read resume upload: {e}")))?;
        return extract_pdf_text(data).await;
    }
    Err(AppError::Validation(format!(
        "missing '{RESUME_FIELD}' file field"
    )))
}

/// PDF text extraction is CPU-bound, so it runs off the async worker threads.
async fn extract_pdf_text(data: bytes::Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| AppError::Validation(format!("could not extract text from PDF: {e}")))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
}
