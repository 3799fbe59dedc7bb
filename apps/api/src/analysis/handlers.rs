//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::engine::{analyze_resume, ask_resume_question, AnalysisResult, ChatResponse};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub resume_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/analyze
///
/// Scores already-extracted resume text and returns findings.
/// Falls back to local rules whenever the external model is missing or fails.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = analyze_resume(&request.resume_text, state.reasoner.as_ref()).await?;
    Ok(Json(result))
}

/// POST /api/v1/resume/ask
///
/// Answers a question grounded in the resume's most relevant sentences.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = ask_resume_question(
        &request.question,
        &request.resume_text,
        state.reasoner.as_ref(),
    )
    .await?;
    Ok(Json(response))
}
