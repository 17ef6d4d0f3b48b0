use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or unsupported uploaded document. Rejected before any
    /// matching runs; catalog and counter state are untouched.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external role classifier failed. Detail goes to the operator log;
    /// callers see a generic matching failure. Never retried here.
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Classifier(msg) => {
                tracing::error!("Classifier error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "CLASSIFIER_ERROR",
                    "Resume classification failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
