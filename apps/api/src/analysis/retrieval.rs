//! Retrieval: picks the resume sentences that best support a question.
//!
//! Sentences are ranked by how many of their tokens appear in the question.
//! Repeated relevant tokens count every time they occur.

use std::collections::HashSet;

use crate::analysis::text::{split_sentences, tokenize};

pub const MAX_SNIPPETS: usize = 3;

/// Returns up to three evidence sentences for the question.
///
/// Falls back to the first three sentences in document order when nothing
/// overlaps, so the result is non-empty whenever the resume has a sentence.
pub fn select_evidence(question: &str, resume_text: &str) -> Vec<String> {
    let sentences = split_sentences(resume_text);
    let query: HashSet<String> = tokenize(question).into_iter().collect();

    let mut scored: Vec<(usize, &String)> = sentences
        .iter()
        .map(|sentence| {
            let overlap = tokenize(sentence)
                .iter()
                .filter(|t| query.contains(*t))
                .count();
            (overlap, sentence)
        })
        .filter(|(overlap, _)| *overlap > 0)
        .collect();

    if scored.is_empty() {
        return sentences.into_iter().take(MAX_SNIPPETS).collect();
    }

    // Stable: ties keep document order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SNIPPETS)
        .map(|(_, s)| s.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Senior product manager at Acme. \
        Led growth experiments that lifted retention 12%. \
        Owned the roadmap and roadmap reviews with stakeholders. \
        Mentored two designers. \
        Shipped a React dashboard for analytics.";

    #[test]
    fn test_ranks_by_overlap_count() {
        let evidence = select_evidence("How did I manage the roadmap?", RESUME);
        assert_eq!(
            evidence[0],
            "Owned the roadmap and roadmap reviews with stakeholders"
        );
    }

    #[test]
    fn test_duplicate_tokens_multiply_score() {
        // "roadmap" appears twice in the third sentence, "growth" once in the second.
        let evidence = select_evidence("growth roadmap", RESUME);
        assert_eq!(
            evidence,
            vec![
                "Owned the roadmap and roadmap reviews with stakeholders",
                "Led growth experiments that lifted retention 12%",
            ]
        );
    }

    #[test]
    fn test_ties_keep_document_order() {
        let evidence = select_evidence("shipped led", RESUME);
        assert_eq!(
            evidence,
            vec![
                "Led growth experiments that lifted retention 12%",
                "Shipped a React dashboard for analytics.",
            ]
        );
    }

    #[test]
    fn test_caps_at_three_snippets() {
        // Four sentences overlap; only the three best survive.
        let evidence = select_evidence("a the with that for two", RESUME);
        assert_eq!(evidence.len(), MAX_SNIPPETS);
        assert_eq!(
            evidence[0],
            "Owned the roadmap and roadmap reviews with stakeholders"
        );
    }

    #[test]
    fn test_no_overlap_falls_back_to_first_three_sentences() {
        let evidence = select_evidence("zebra quantum", RESUME);
        assert_eq!(
            evidence,
            vec![
                "Senior product manager at Acme",
                "Led growth experiments that lifted retention 12%",
                "Owned the roadmap and roadmap reviews with stakeholders",
            ]
        );
    }

    #[test]
    fn test_fallback_is_non_empty_for_single_sentence() {
        let evidence = select_evidence("???", "Only one sentence here");
        assert_eq!(evidence, vec!["Only one sentence here"]);
    }

    #[test]
    fn test_empty_resume_yields_no_evidence() {
        assert!(select_evidence("roadmap", "").is_empty());
    }
}
