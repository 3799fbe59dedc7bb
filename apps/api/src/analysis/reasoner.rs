//! External reasoning adapter: optional generative-model backing for analysis and Q&A.
//!
//! Default: `LocalReasoner` (no credential; every call reports `NotConfigured`).
//! With a credential: `GeminiReasoner`, which goes through `LlmClient`.
//!
//! `AppState` holds an `Arc<dyn ResumeReasoner>`, chosen once at startup from config.
//! Callers never surface a `ReasonerError`; they degrade to local computation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::findings::ExternalAnalysis;
use crate::analysis::prompts::{analysis_prompt, question_prompt};
use crate::config::Config;
use crate::llm_client::{LlmClient, LlmError};

pub const LOCAL_CHAT_LABEL: &str = "Local fallback · RAG grounded";
pub const LOCAL_ANALYSIS_LABEL: &str = "Local heuristics";

/// Answer used when the model responds without any text.
pub const INCOMPLETE_ANSWER: &str =
    "I analyzed your resume, but could not form a complete response.";

#[derive(Debug, Error)]
pub enum ReasonerError {
    #[error("no external reasoning model is configured")]
    NotConfigured,

    #[error("external reasoning model unavailable: {0}")]
    Unavailable(#[from] LlmError),

    #[error("external reasoning model returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// The reasoning adapter trait. Implement this to swap model providers without
/// touching the scoring, retrieval or handler code.
#[async_trait]
pub trait ResumeReasoner: Send + Sync {
    /// Structured analysis of the full resume text.
    async fn analyze(&self, resume_text: &str) -> Result<ExternalAnalysis, ReasonerError>;

    /// Answers a question strictly from the supplied evidence snippets.
    async fn ask(&self, question: &str, snippets: &[String]) -> Result<String, ReasonerError>;

    /// Label shown next to answers this reasoner produced.
    fn chat_label(&self) -> String;

    /// Label shown next to analyses this reasoner produced.
    fn analysis_label(&self) -> String;
}

/// Builds the reasoner the configuration calls for.
pub fn reasoner_from_config(config: &Config) -> anyhow::Result<Arc<dyn ResumeReasoner>> {
    match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(
                config.gemini_api_base.clone(),
                key.clone(),
                config.gemini_model.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            Ok(Arc::new(GeminiReasoner::new(client)))
        }
        None => Ok(Arc::new(LocalReasoner)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LocalReasoner
// ────────────────────────────────────────────────────────────────────────────

/// Stand-in used when no credential is configured.
pub struct LocalReasoner;

#[async_trait]
impl ResumeReasoner for LocalReasoner {
    async fn analyze(&self, _resume_text: &str) -> Result<ExternalAnalysis, ReasonerError> {
        Err(ReasonerError::NotConfigured)
    }

    async fn ask(&self, _question: &str, _snippets: &[String]) -> Result<String, ReasonerError> {
        Err(ReasonerError::NotConfigured)
    }

    fn chat_label(&self) -> String {
        LOCAL_CHAT_LABEL.to_string()
    }

    fn analysis_label(&self) -> String {
        LOCAL_ANALYSIS_LABEL.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiReasoner
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiReasoner {
    llm: LlmClient,
}

impl GeminiReasoner {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeReasoner for GeminiReasoner {
    async fn analyze(&self, resume_text: &str) -> Result<ExternalAnalysis, ReasonerError> {
        self.llm
            .call_json::<ExternalAnalysis>(&analysis_prompt(resume_text))
            .await
            .map_err(|e| match e {
                LlmError::EmptyContent | LlmError::NoJsonObject | LlmError::Parse(_) => {
                    ReasonerError::MalformedResponse(e.to_string())
                }
                other => ReasonerError::Unavailable(other),
            })
    }

    async fn ask(&self, question: &str, snippets: &[String]) -> Result<String, ReasonerError> {
        let response = self.llm.call(&question_prompt(question, snippets)).await?;
        Ok(response
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| INCOMPLETE_ANSWER.to_string()))
    }

    fn chat_label(&self) -> String {
        format!("Gemini ({}) · RAG grounded", self.llm.model())
    }

    fn analysis_label(&self) -> String {
        format!("Gemini ({}) · ATS analysis", self.llm.model())
    }
}
