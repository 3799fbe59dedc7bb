// Resume Analysis Engine
// Implements: text normalization, signal extraction, scoring, findings, retrieval, Q&A.
// All LLM calls go through llm_client via the reasoner adapter, never directly.

pub mod engine;
pub mod findings;
pub mod handlers;
pub mod prompts;
pub mod reasoner;
pub mod retrieval;
pub mod scoring;
pub mod signals;
pub mod text;
