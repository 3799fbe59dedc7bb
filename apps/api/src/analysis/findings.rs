//! Issue & suggestion generation.
//!
//! Local rules fire independently in a fixed order, each yielding at most one
//! issue and one suggestion. External analyses are mapped field-for-field.
//! Either way the suggestions are stable-sorted by severity before returning.

use serde::{Deserialize, Deserializer, Serialize};

use crate::analysis::signals::{ResumeSignals, KEYWORD_LEXICON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Lenient parse for model output; anything unrecognised is treated as medium.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_impact: Option<String>,
    pub evidence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Suggestion {
    /// Sort rank; suggestions without a severity sit with medium ones.
    fn rank(&self) -> u8 {
        self.severity.map(Severity::rank).unwrap_or(1)
    }
}

/// Issues and suggestions produced for one resume.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Findings {
    pub errors: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
}

impl Findings {
    fn push(&mut self, issue: Issue, suggestion: Suggestion) {
        self.errors.push(issue);
        self.suggestions.push(suggestion);
    }

    /// Stable sort by severity rank: high, then medium (and unranked), then low.
    pub fn sorted(mut self) -> Self {
        self.suggestions.sort_by_key(Suggestion::rank);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// External analysis schema
// ────────────────────────────────────────────────────────────────────────────

/// Structured analysis returned by the external model. Parsed leniently:
/// missing or null fields are empty and unknown severities become medium.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ExternalIssue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ats_optimizations: Vec<Optimization>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, rename = "estimatedATSLift", deserialize_with = "lenient_lift")]
    pub estimated_ats_lift: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIssue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub example: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvement: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_impact: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts an integer, a float or a numeric string; negatives clamp to zero.
fn lenient_lift<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().trim_start_matches('+').parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite())
        .map(|n| n.round().max(0.0).min(100.0) as u32))
}

/// Default lift when the model succeeds but omits an estimate.
pub const DEFAULT_EXTERNAL_LIFT: u32 = 5;

impl ExternalAnalysis {
    /// An explicit zero is kept; only a missing or unreadable estimate defaults.
    pub fn lift(&self) -> u32 {
        self.estimated_ats_lift.unwrap_or(DEFAULT_EXTERNAL_LIFT)
    }

    pub fn into_findings(self) -> Findings {
        let errors = self
            .errors
            .into_iter()
            .map(|e| Issue {
                category: e.category,
                severity: Severity::parse(&e.severity),
                description: e.description,
                example: e.example,
            })
            .collect();

        let suggestions = self
            .ats_optimizations
            .into_iter()
            .map(|opt| Suggestion {
                evidence: format!("Current: {}", opt.current_state),
                title: opt.title,
                detail: opt.improvement,
                current_state: Some(opt.current_state),
                expected_impact: Some(opt.expected_impact),
                severity: None,
            })
            .collect();

        Findings {
            errors,
            suggestions,
        }
        .sorted()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Local rules
// ────────────────────────────────────────────────────────────────────────────

pub const MIN_METRICS: usize = 3;
pub const MIN_KEYWORDS: usize = 8;
pub const MIN_WORDS: usize = 280;
pub const MAX_WORDS: usize = 1100;
pub const MAX_AVG_SENTENCE_LENGTH: usize = 30;

/// Applies the local heuristic rules in declaration order.
pub fn local_findings(signals: &ResumeSignals) -> Findings {
    let mut findings = Findings::default();
    let metric_count = signals.metrics.len();
    let keyword_count = signals.keyword_matches.len();
    let word_count = signals.word_count;
    let avg = signals.avg_sentence_length;

    if metric_count < MIN_METRICS {
        findings.push(
            Issue {
                category: "Missing quantified metrics".to_string(),
                severity: Severity::High,
                description: "Resume lacks measurable impact statements".to_string(),
                example: format!("Only {metric_count} numeric signals detected"),
            },
            Suggestion {
                title: "Quantify impact".to_string(),
                detail: "Add measurable outcomes (%, $, #) to recent roles to lift ATS confidence. \
                    Example: 'Increased user engagement by 23%' instead of 'Improved user engagement'."
                    .to_string(),
                current_state: None,
                expected_impact: Some("+8-12 ATS points".to_string()),
                evidence: format!("Detected {metric_count} numeric impact signals."),
                severity: Some(Severity::High),
            },
        );
    }

    if keyword_count < MIN_KEYWORDS {
        let total = KEYWORD_LEXICON.len();
        findings.push(
            Issue {
                category: "Weak keyword alignment".to_string(),
                severity: Severity::High,
                description: "Missing critical role-specific keywords".to_string(),
                example: format!("Only {keyword_count} of {total} keywords matched"),
            },
            Suggestion {
                title: "Mirror job description keywords".to_string(),
                detail: "Review the target job description and integrate 5-7 key terms into your \
                    experience bullets and skills section. Use natural language that matches the role."
                    .to_string(),
                current_state: None,
                expected_impact: Some("+10-15 ATS points".to_string()),
                evidence: format!("Matched {keyword_count} of {total} target keywords."),
                severity: Some(Severity::High),
            },
        );
    }

    if !signals.has_section("Summary") {
        findings.push(
            Issue {
                category: "Missing professional summary".to_string(),
                severity: Severity::Medium,
                description: "No summary section to establish context".to_string(),
                example: "Resume starts directly with experience".to_string(),
            },
            Suggestion {
                title: "Add a professional summary".to_string(),
                detail: "Write a 2-3 line summary that captures your role, key strengths, and value \
                    prop. Example: 'Product Manager with 7+ years driving user engagement and revenue \
                    growth at B2B SaaS. Expertise in cross-functional leadership and data-driven \
                    decision making.'"
                    .to_string(),
                current_state: None,
                expected_impact: Some("+5-8 ATS points".to_string()),
                evidence: "No summary section detected.".to_string(),
                severity: Some(Severity::Medium),
            },
        );
    }

    if word_count > MAX_WORDS || word_count < MIN_WORDS {
        let too_brief = word_count < MIN_WORDS;
        let (verdict, advice) = if too_brief {
            ("too brief", "Add more detail to experience bullets.")
        } else {
            (
                "too long",
                "Cut down to essentials: remove dated or less relevant roles.",
            )
        };
        findings.push(
            Issue {
                category: "Resume length out of range".to_string(),
                severity: Severity::Medium,
                description: format!("Resume is {verdict} for ATS parsing"),
                example: format!("Current length: {word_count} words"),
            },
            Suggestion {
                title: "Optimize resume length".to_string(),
                detail: format!("Aim for 350–900 words. You're at {word_count} words. {advice}"),
                current_state: None,
                expected_impact: Some("+3-6 ATS points".to_string()),
                evidence: format!("Current length: {word_count} words."),
                severity: Some(Severity::Medium),
            },
        );
    }

    if avg > MAX_AVG_SENTENCE_LENGTH {
        findings.push(
            Issue {
                category: "Poor readability".to_string(),
                severity: Severity::Low,
                description: "Sentences are too long, hurting ATS parsing".to_string(),
                example: format!("Avg sentence length: {avg} words"),
            },
            Suggestion {
                title: "Shorten sentences for clarity".to_string(),
                detail: "Keep bullets to 1-2 lines max. ATS systems prefer concise, scannable \
                    content. Break long sentences into multiple bullet points."
                    .to_string(),
                current_state: None,
                expected_impact: Some("+2-4 ATS points".to_string()),
                evidence: format!("Current avg sentence length: {avg} words."),
                severity: Some(Severity::Low),
            },
        );
    }

    if findings.suggestions.is_empty() {
        findings.suggestions.push(Suggestion {
            title: "Polish and refine".to_string(),
            detail: "Your resume structure is solid. Now refine the top 3 bullets in each role to \
                emphasize outcomes, leadership, and business impact."
                .to_string(),
            current_state: None,
            expected_impact: Some("+2-5 ATS points".to_string()),
            evidence: "Core structure and metrics look healthy.".to_string(),
            severity: None,
        });
    }

    findings.sorted()
}
