//! Resume analysis & Q&A: orchestrates the full pipeline for one request.
//!
//! Analyze: clean → extract signals → score → (external analysis | local rules) → lift → result.
//! Ask:     validate → select evidence → (external answer | templated local answer).
//!
//! Stateless per call. The caller owns the session, the transcript and the busy flag.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::findings::{local_findings, Findings, Issue, Suggestion};
use crate::analysis::reasoner::{
    ReasonerError, ResumeReasoner, LOCAL_ANALYSIS_LABEL, LOCAL_CHAT_LABEL,
};
use crate::analysis::retrieval::select_evidence;
use crate::analysis::scoring::{lifted_score, score, ScoreBreakdownItem};
use crate::analysis::signals::ResumeSignals;
use crate::analysis::text::clean;
use crate::errors::{AppError, EMPTY_RESUME_FOR_ANALYSIS, EMPTY_RESUME_FOR_QUESTION};

const HIGH_FIT_THRESHOLD: u32 = 85;
const MAX_KEYWORD_EVIDENCE: usize = 10;
const MAX_METRIC_EVIDENCE: usize = 4;
const DEFAULT_SECTIONS: &[&str] = &["Experience", "Skills"];

pub const RAG_SOURCE: &str = "Resume context (RAG)";
pub const MODEL_SOURCE: &str = "Gemini response";
pub const UNAVAILABLE_ANSWER: &str =
    "Gemini is unavailable right now. Here's a local, grounded answer based on your resume.";
pub const LOCAL_ANSWER: &str = "Based on your resume, strengthen your most recent role by adding \
    1-2 quantified outcomes and aligning the top skills to the target role.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Raw counts behind the score, returned so users can see what was measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceSnapshot {
    pub keywords_matched: Vec<String>,
    pub metric_samples: Vec<String>,
    pub word_count: usize,
    pub sentence_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Composite score plus any external lift, 0–100.
    pub ats_score: u32,
    pub summary: String,
    pub highlights: Vec<String>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub errors: Vec<Issue>,
    pub estimated_lift: u32,
    pub sections_reviewed: Vec<String>,
    pub evidence: EvidenceSnapshot,
    pub breakdown: Vec<ScoreBreakdownItem>,
    pub externally_enhanced: bool,
    pub engine_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<String>,
    pub snippets: Vec<String>,
    pub engine_label: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyze
// ────────────────────────────────────────────────────────────────────────────

/// Scores a resume and derives its findings.
///
/// The reasoner's failures never propagate: any error falls back to local rules.
pub async fn analyze_resume(
    resume_text: &str,
    reasoner: &dyn ResumeReasoner,
) -> Result<AnalysisResult, AppError> {
    let cleaned = clean(resume_text);
    if cleaned.is_empty() {
        return Err(AppError::EmptyInput(EMPTY_RESUME_FOR_ANALYSIS));
    }

    let signals = ResumeSignals::extract(&cleaned);
    let card = score(&signals);

    let (findings, strengths, lift, externally_enhanced) = match reasoner.analyze(resume_text).await
    {
        Ok(external) => {
            let lift = external.lift();
            let strengths = external.strengths.clone();
            (external.into_findings(), strengths, lift, true)
        }
        Err(e) => {
            log_fallback("analysis", &e);
            (local_findings(&signals), Vec::new(), 0, false)
        }
    };

    let ats_score = lifted_score(card.composite, lift);
    info!(
        "Resume analyzed: composite={} lift={} external={}",
        card.composite, lift, externally_enhanced
    );

    let Findings {
        errors,
        suggestions,
    } = findings;

    Ok(AnalysisResult {
        ats_score,
        summary: build_summary(card.composite),
        highlights: build_highlights(&signals),
        strengths,
        suggestions,
        errors,
        estimated_lift: lift,
        sections_reviewed: sections_reviewed(&signals),
        evidence: EvidenceSnapshot {
            keywords_matched: signals
                .keyword_matches
                .iter()
                .take(MAX_KEYWORD_EVIDENCE)
                .map(|k| k.to_string())
                .collect(),
            metric_samples: signals
                .metrics
                .iter()
                .take(MAX_METRIC_EVIDENCE)
                .cloned()
                .collect(),
            word_count: signals.word_count,
            sentence_count: signals.sentence_count.max(1),
        },
        breakdown: card.breakdown,
        externally_enhanced,
        engine_label: if externally_enhanced {
            reasoner.analysis_label()
        } else {
            LOCAL_ANALYSIS_LABEL.to_string()
        },
    })
}

fn build_summary(composite: u32) -> String {
    if composite >= HIGH_FIT_THRESHOLD {
        "Your resume reads as high-fit with solid structure and measurable impact.".to_string()
    } else {
        "Your resume has strong fundamentals with clear opportunities to boost ATS match."
            .to_string()
    }
}

fn build_highlights(signals: &ResumeSignals) -> Vec<String> {
    vec![
        if signals.keyword_matches.is_empty() {
            "Keyword coverage needs work".to_string()
        } else {
            format!("Keyword coverage: {} matched", signals.keyword_matches.len())
        },
        if signals.metrics.is_empty() {
            "Add more quantified impact".to_string()
        } else {
            format!("Quantified metrics found ({})", signals.metrics.len())
        },
        if signals.sections.len() >= 4 {
            "Core sections detected".to_string()
        } else {
            "Add missing resume sections".to_string()
        },
    ]
}

fn sections_reviewed(signals: &ResumeSignals) -> Vec<String> {
    let sections = if signals.sections.is_empty() {
        DEFAULT_SECTIONS
    } else {
        signals.sections.as_slice()
    };
    sections.iter().map(|s| s.to_string()).collect()
}

fn log_fallback(operation: &str, error: &ReasonerError) {
    match error {
        ReasonerError::NotConfigured => {
            debug!("No external model configured, using local {operation}")
        }
        other => warn!("External {operation} failed, using local {operation} only: {other}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ask
// ────────────────────────────────────────────────────────────────────────────

/// Answers a question about the resume, grounded in retrieved sentences.
///
/// The selected snippets are returned whichever path produced the answer.
pub async fn ask_resume_question(
    question: &str,
    resume_text: &str,
    reasoner: &dyn ResumeReasoner,
) -> Result<ChatResponse, AppError> {
    if clean(resume_text).is_empty() {
        return Err(AppError::EmptyInput(EMPTY_RESUME_FOR_QUESTION));
    }
    if question.trim().is_empty() {
        return Err(AppError::EmptyQuestion);
    }

    let snippets = select_evidence(question, resume_text);

    let response = match reasoner.ask(question, &snippets).await {
        Ok(answer) => ChatResponse {
            answer,
            sources: vec![RAG_SOURCE.to_string(), MODEL_SOURCE.to_string()],
            snippets,
            engine_label: reasoner.chat_label(),
        },
        Err(e) => {
            log_fallback("answer", &e);
            let answer = match e {
                ReasonerError::NotConfigured => LOCAL_ANSWER,
                _ => UNAVAILABLE_ANSWER,
            };
            ChatResponse {
                answer: answer.to_string(),
                sources: vec![RAG_SOURCE.to_string()],
                snippets,
                engine_label: LOCAL_CHAT_LABEL.to_string(),
            }
        }
    };

    Ok(response)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
