//! Text normalization: whitespace cleanup, sentence splitting, tokenization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SENTENCE_BREAK: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Collapses runs of whitespace and control characters to single spaces and trims the ends.
pub fn clean(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits on `.`, `!` or `?` followed by whitespace. Abbreviations are not special-cased,
/// and the terminal punctuation of the last sentence is kept.
pub fn split_sentences(text: &str) -> Vec<String> {
    let cleaned = clean(text);
    RE_SENTENCE_BREAK
        .split(&cleaned)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Lowercases and splits on anything outside `[a-z0-9+%$]`. Order and duplicates are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '%' | '$')
}

pub fn word_count(cleaned: &str) -> usize {
    cleaned.split(' ').filter(|w| !w.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace_and_trims() {
        assert_eq!(clean("  Senior\t\tPM \n\n led  launch  "), "Senior PM led launch");
    }

    #[test]
    fn test_clean_strips_nul_characters() {
        assert_eq!(clean("Skills\u{0000}Rust"), "Skills Rust");
    }

    #[test]
    fn test_clean_empty_is_empty() {
        assert_eq!(clean(" \n\t "), "");
    }

    #[test]
    fn test_split_sentences_on_terminal_punctuation() {
        let sentences = split_sentences("Led the roadmap. Shipped 3 launches! Why not?  Next one.");
        assert_eq!(
            sentences,
            vec!["Led the roadmap", "Shipped 3 launches", "Why not", "Next one."]
        );
    }

    #[test]
    fn test_split_sentences_ignores_punctuation_without_whitespace() {
        let sentences = split_sentences("Built v1.2 of the api.");
        assert_eq!(sentences, vec!["Built v1.2 of the api."]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_metric_characters() {
        assert_eq!(
            tokenize("Grew ARR 40% to $2M, 10+ A/B tests"),
            vec!["grew", "arr", "40%", "to", "$2m", "10+", "a", "b", "tests"]
        );
    }

    #[test]
    fn test_tokenize_preserves_duplicates() {
        assert_eq!(tokenize("growth, Growth"), vec!["growth", "growth"]);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count(""), 0);
    }
}
