use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const EMPTY_RESUME_FOR_ANALYSIS: &str =
    "Upload a PDF or TXT resume so we can analyze the content.";
pub const EMPTY_RESUME_FOR_QUESTION: &str =
    "Upload and analyze a resume before asking questions.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// External model failures never appear here: they are absorbed by the
/// reasoning adapter and downgraded to local analysis.
#[derive(Debug, Error)]
pub enum AppError {
    /// No resume text was supplied. Carries the user-facing message for the operation.
    #[error("{0}")]
    EmptyInput(&'static str),

    #[error("Ask a focused question about your resume.")]
    EmptyQuestion,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::EmptyInput(msg) => (StatusCode::BAD_REQUEST, "EMPTY_INPUT", msg.to_string()),
            AppError::EmptyQuestion => (
                StatusCode::BAD_REQUEST,
                "EMPTY_QUESTION",
                self.to_string(),
            ),
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
