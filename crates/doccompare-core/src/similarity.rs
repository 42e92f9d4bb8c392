//! Fuzzy paragraph similarity: Jaccard over word-token sets.
//!
//! Two paragraphs are "the same paragraph, possibly edited" when at
//! least half of their combined vocabulary is shared. The 0.5 threshold
//! is a contract: heavy edits still align, distinct paragraphs split
//! into a deletion plus an insertion.

use std::collections::BTreeSet;

use crate::model::Paragraph;
use crate::text;

/// Minimum Jaccard score for two paragraphs to be considered aligned.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// The word-token set of a normalized text, optionally ASCII-lowercased.
pub fn token_set(normalized: &str, ignore_case: bool) -> BTreeSet<String> {
    text::tokenize_words(normalized)
        .into_iter()
        .map(|t| {
            if ignore_case {
                t.to_ascii_lowercase()
            } else {
                t.to_string()
            }
        })
        .collect()
}

/// |A ∩ B| / |A ∪ B| over word-token sets. Empty-vs-empty scores 1,
/// empty-vs-nonempty scores 0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Jaccard similarity of two texts in [0, 1].
pub fn similarity_score(a: &str, b: &str, ignore_case: bool) -> f64 {
    let a = text::normalize_whitespace(a);
    let b = text::normalize_whitespace(b);
    jaccard(&token_set(&a, ignore_case), &token_set(&b, ignore_case))
}

/// Whether two paragraphs should align. Both empty counts as similar;
/// exactly one empty never does.
pub fn similar(a: &Paragraph, b: &Paragraph, ignore_case: bool) -> bool {
    let na = a.normalized_text();
    let nb = b.normalized_text();

    if na.is_empty() && nb.is_empty() {
        return true;
    }
    if na.is_empty() || nb.is_empty() {
        return false;
    }

    jaccard(&token_set(&na, ignore_case), &token_set(&nb, ignore_case)) >= SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        assert_eq!(similarity_score("hello world", "hello world", false), 1.0);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        assert_eq!(similarity_score("alpha beta", "gamma delta", false), 0.0);
    }

    #[test]
    fn jaccard_at_exactly_half_is_similar() {
        // {a, b, c} vs {b, c, d}: intersection 2, union 4.
        let a = Paragraph::from_text("apple banana cherry");
        let b = Paragraph::from_text("banana cherry date");
        assert_eq!(
            similarity_score("apple banana cherry", "banana cherry date", false),
            0.5
        );
        assert!(similar(&a, &b, false));
    }

    #[test]
    fn jaccard_below_half_is_not_similar() {
        // {a, b} vs {b, c}: intersection 1, union 3.
        let a = Paragraph::from_text("apple banana");
        let b = Paragraph::from_text("banana cherry");
        assert!(similarity_score("apple banana", "banana cherry", false) < SIMILARITY_THRESHOLD);
        assert!(!similar(&a, &b, false));
    }

    #[test]
    fn both_empty_paragraphs_are_similar() {
        let a = Paragraph::from_text("   ");
        let b = Paragraph::new();
        assert!(similar(&a, &b, false));
    }

    #[test]
    fn one_empty_paragraph_is_not_similar() {
        let a = Paragraph::new();
        let b = Paragraph::from_text("content");
        assert!(!similar(&a, &b, false));
        assert!(!similar(&b, &a, false));
    }

    #[test]
    fn ignore_case_folds_before_tokenizing() {
        let a = Paragraph::from_text("Hello World");
        let b = Paragraph::from_text("hello world");
        assert!(!similar(&a, &b, false));
        assert!(similar(&a, &b, true));
        assert_eq!(similarity_score("HELLO", "hello", true), 1.0);
    }

    #[test]
    fn duplicate_words_collapse_into_the_set() {
        // "a a b" vs "a b" are identical as sets.
        assert_eq!(similarity_score("a a b", "a b", false), 1.0);
    }
}
