//! Signal extraction: keyword, metric and section detection against static lexicons.
//!
//! All lexicon data is immutable and shared across requests without locking.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::text::{clean, split_sentences, word_count};

/// Maximum number of metric matches retained. The cap applies before scoring.
pub const MAX_METRIC_SAMPLES: usize = 6;

/// Curated role keywords, matched as case-insensitive substrings in lexicon order.
pub const KEYWORD_LEXICON: &[&str] = &[
    "product",
    "roadmap",
    "stakeholder",
    "strategy",
    "growth",
    "experiment",
    "metrics",
    "analytics",
    "user research",
    "customer",
    "go-to-market",
    "design",
    "engineering",
    "cross-functional",
    "launch",
    "retention",
    "a/b",
    "okrs",
    "kpis",
    "impact",
    "scalability",
    "leadership",
    "system design",
    "api",
    "react",
    "figma",
];

/// A resume section label and the lowercase phrases that reveal it.
#[derive(Debug, Clone, Copy)]
pub struct SectionPattern {
    pub label: &'static str,
    pub needles: &'static [&'static str],
}

impl SectionPattern {
    fn matches(&self, lowered: &str) -> bool {
        self.needles.iter().any(|n| lowered.contains(n))
    }
}

pub const SECTION_PATTERNS: &[SectionPattern] = &[
    SectionPattern {
        label: "Summary",
        needles: &["summary", "profile", "objective"],
    },
    SectionPattern {
        label: "Experience",
        needles: &["experience", "employment", "work history"],
    },
    SectionPattern {
        label: "Projects",
        needles: &["projects", "case studies"],
    },
    SectionPattern {
        label: "Skills",
        needles: &["skills", "tooling", "stack"],
    },
    SectionPattern {
        label: "Education",
        needles: &["education", "certifications"],
    },
];

lazy_static! {
    // Percentages, currency amounts with separators/decimals, bare counts with optional "+".
    // Digits and word boundaries are ASCII-only.
    static ref RE_METRIC: Regex = Regex::new(
        r"(?-u:\b)[0-9]{1,3}%|\$[0-9][0-9,]*(?:\.[0-9]+)?|(?-u:\b)[0-9]{1,4}\+?(?-u:\b)"
    )
    .unwrap();
}

/// Lexicon entries contained in the text, in lexicon order.
pub fn match_keywords(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    KEYWORD_LEXICON
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .collect()
}

/// The first `MAX_METRIC_SAMPLES` numeric impact tokens, in document order.
pub fn match_metrics(text: &str) -> Vec<String> {
    RE_METRIC
        .find_iter(text)
        .take(MAX_METRIC_SAMPLES)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Labels of the sections whose pattern matches, in declared order.
pub fn detect_sections(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    SECTION_PATTERNS
        .iter()
        .filter(|p| p.matches(&lowered))
        .map(|p| p.label)
        .collect()
}

/// Everything the scorer and the rule engine read from one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeSignals {
    pub word_count: usize,
    /// Raw number of sentences found; zero for text without any.
    pub sentence_count: usize,
    pub avg_sentence_length: usize,
    pub keyword_matches: Vec<&'static str>,
    pub metrics: Vec<String>,
    pub sections: Vec<&'static str>,
}

impl ResumeSignals {
    pub fn extract(resume_text: &str) -> Self {
        let cleaned = clean(resume_text);
        let word_count = word_count(&cleaned);
        let sentence_count = split_sentences(&cleaned).len();
        let avg_sentence_length = if sentence_count > 0 {
            (word_count as f64 / sentence_count as f64).round() as usize
        } else {
            0
        };

        Self {
            word_count,
            sentence_count,
            avg_sentence_length,
            keyword_matches: match_keywords(&cleaned),
            metrics: match_metrics(&cleaned),
            sections: detect_sections(&cleaned),
        }
    }

    pub fn has_section(&self, label: &str) -> bool {
        self.sections.iter().any(|s| *s == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_has_26_entries() {
        assert_eq!(KEYWORD_LEXICON.len(), 26);
    }

    #[test]
    fn test_match_keywords_preserves_lexicon_order() {
        let matches = match_keywords("Figma prototypes for our Go-To-Market STRATEGY and product");
        assert_eq!(matches, vec!["product", "strategy", "go-to-market", "figma"]);
    }

    #[test]
    fn test_match_keywords_multi_word_phrases() {
        let matches = match_keywords("Ran user research and system design reviews");
        assert!(matches.contains(&"user research"));
        assert!(matches.contains(&"system design"));
        assert!(matches.contains(&"design"));
    }

    #[test]
    fn test_match_metrics_scenario_sentence() {
        let metrics =
            match_metrics("increased revenue by 23% and grew to $4,500 users, launched 3 products");
        assert_eq!(metrics, vec!["23%", "$4,500", "3"]);
    }

    #[test]
    fn test_match_metrics_plus_suffix_and_decimal_currency() {
        let metrics = match_metrics("Managed $1,250.50 budget across 12+teams");
        assert_eq!(metrics, vec!["$1,250.50", "12+"]);
    }

    #[test]
    fn test_match_metrics_caps_at_six() {
        let metrics = match_metrics("1 2 3 4 5 6 7 8 9");
        assert_eq!(metrics.len(), MAX_METRIC_SAMPLES);
        assert_eq!(metrics.last().map(String::as_str), Some("6"));
    }

    #[test]
    fn test_match_metrics_ascii_digits_only() {
        let metrics = match_metrics("Grew revenue ٤٥% and résumé2024 plus 12 teams");
        assert_eq!(metrics, vec!["2024", "12"]);
    }

    #[test]
    fn test_match_metrics_skips_long_numbers() {
        assert!(match_metrics("Order 123456").is_empty());
    }

    #[test]
    fn test_detect_sections_in_declared_order() {
        let sections =
            detect_sections("EDUCATION ... Skills: Rust ... Work History ... Professional Profile");
        assert_eq!(sections, vec!["Summary", "Experience", "Skills", "Education"]);
    }

    #[test]
    fn test_detect_sections_none() {
        assert!(detect_sections("Just a paragraph of prose.").is_empty());
    }

    #[test]
    fn test_extract_computes_average_sentence_length() {
        let signals = ResumeSignals::extract("One two three four. Five six.");
        assert_eq!(signals.word_count, 6);
        assert_eq!(signals.sentence_count, 2);
        assert_eq!(signals.avg_sentence_length, 3);
    }

    #[test]
    fn test_extract_empty_text() {
        let signals = ResumeSignals::extract("");
        assert_eq!(signals.word_count, 0);
        assert_eq!(signals.sentence_count, 0);
        assert_eq!(signals.avg_sentence_length, 0);
    }
}
