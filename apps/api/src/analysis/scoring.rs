//! ATS Scoring: converts extracted signals into five weighted sub-scores and a composite.
//!
//! Banding is a step function with exact breakpoints:
//! - keyword alignment: round(matched / lexicon × 35), max 35
//! - impact metrics:    4 per retained metric, max 20
//! - structure:         4 per detected section, max 20
//! - readability:       <16 → 10, 16–22 → 15, 23–30 → 10, >30 → 6
//! - conciseness:       <250 → 6, 250–349 → 10, 350–900 → 15, 901–1200 → 10, >1200 → 6

use serde::{Deserialize, Serialize};

use crate::analysis::signals::{ResumeSignals, KEYWORD_LEXICON};

pub const KEYWORD_WEIGHT: u32 = 35;
pub const METRIC_WEIGHT: u32 = 20;
pub const STRUCTURE_WEIGHT: u32 = 20;
pub const READABILITY_WEIGHT: u32 = 15;
pub const CONCISENESS_WEIGHT: u32 = 10;

/// One weighted factor of the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdownItem {
    pub label: String,
    pub score: u32,
    pub weight: u32,
    pub note: String,
    pub rationale: String,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    /// Composite before any external lift, 0–100.
    pub composite: u32,
    pub breakdown: Vec<ScoreBreakdownItem>,
}

pub fn score_keywords(matched: usize) -> u32 {
    let ratio = matched as f64 / KEYWORD_LEXICON.len() as f64;
    ((ratio * KEYWORD_WEIGHT as f64).round() as u32).min(KEYWORD_WEIGHT)
}

pub fn score_metrics(metric_count: usize) -> u32 {
    (metric_count as u32 * 4).min(METRIC_WEIGHT)
}

pub fn score_structure(section_count: usize) -> u32 {
    (section_count as u32 * 4).min(STRUCTURE_WEIGHT)
}

pub fn score_readability(avg_sentence_length: usize) -> u32 {
    match avg_sentence_length {
        0..=15 => 10,
        16..=22 => 15,
        23..=30 => 10,
        _ => 6,
    }
}

pub fn score_length(word_count: usize) -> u32 {
    match word_count {
        0..=249 => 6,
        250..=349 => 10,
        350..=900 => 15,
        901..=1200 => 10,
        _ => 6,
    }
}

/// Adds an external lift to a composite score, clamped to 0–100.
pub fn lifted_score(composite: u32, lift: u32) -> u32 {
    composite.saturating_add(lift).min(100)
}

/// Scores a resume's signals. Pure and deterministic.
pub fn score(signals: &ResumeSignals) -> ScoreCard {
    let keyword_score = score_keywords(signals.keyword_matches.len());
    let metric_score = score_metrics(signals.metrics.len());
    let structure_score = score_structure(signals.sections.len());
    let readability_score = score_readability(signals.avg_sentence_length);
    let length_score = score_length(signals.word_count);

    let composite =
        (keyword_score + metric_score + structure_score + readability_score + length_score)
            .min(100);

    let top_count = signals.keyword_matches.len().min(3);
    let top_hits = joined_or_none(&signals.keyword_matches[..top_count], ", ");
    let metric_hits = signals.metrics.iter().take(2).cloned().collect::<Vec<_>>();
    let sections = joined_or_none(&signals.sections, ", ");

    let breakdown = vec![
        ScoreBreakdownItem {
            label: "Keyword alignment".to_string(),
            score: keyword_score,
            weight: KEYWORD_WEIGHT,
            note: "Matches against a curated role keyword set.".to_string(),
            rationale: format!(
                "{} of {} lexicon keywords found in the resume.",
                signals.keyword_matches.len(),
                KEYWORD_LEXICON.len()
            ),
            evidence: vec![
                format!("{} keywords matched", signals.keyword_matches.len()),
                format!("Top hits: {top_hits}"),
            ],
        },
        ScoreBreakdownItem {
            label: "Impact metrics".to_string(),
            score: metric_score,
            weight: METRIC_WEIGHT,
            note: "Counts quantified outcomes across the resume.".to_string(),
            rationale: "Each numeric impact signal is worth 4 points.".to_string(),
            evidence: vec![
                format!("{} numeric impact signals", signals.metrics.len()),
                if metric_hits.is_empty() {
                    "No metrics found".to_string()
                } else {
                    metric_hits.join(" · ")
                },
            ],
        },
        ScoreBreakdownItem {
            label: "Structure coverage".to_string(),
            score: structure_score,
            weight: STRUCTURE_WEIGHT,
            note: "Checks for key ATS sections.".to_string(),
            rationale: "Each detected core section is worth 4 points.".to_string(),
            evidence: vec![format!("Sections detected: {sections}")],
        },
        ScoreBreakdownItem {
            label: "Readability".to_string(),
            score: readability_score,
            weight: READABILITY_WEIGHT,
            note: "Average sentence length signals clarity.".to_string(),
            rationale: "16–22 words per sentence scores best.".to_string(),
            evidence: vec![format!("{} words per sentence", signals.avg_sentence_length)],
        },
        ScoreBreakdownItem {
            label: "Conciseness".to_string(),
            score: length_score,
            weight: CONCISENESS_WEIGHT,
            note: "Targets recruiter-friendly length.".to_string(),
            rationale: "350–900 words scores best.".to_string(),
            evidence: vec![format!("{} total words", signals.word_count)],
        },
    ];

    ScoreCard {
        composite,
        breakdown,
    }
}

fn joined_or_none(items: &[&str], sep: &str) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(sep)
    }
}
