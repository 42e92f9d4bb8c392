//! Word-granularity inline diff for matched paragraph pairs.
//!
//! Tokens become diff units, units run through the correlation engine,
//! and same-kind neighbors merge into segments. In the default word
//! path every segment gets a single trailing space, trimmed from the
//! final segment only, so concatenating segment texts reconstructs the
//! space-joined token stream exactly.

use crate::lcs::{self, CorrelationStatus};
use crate::model::Paragraph;
use crate::settings::{CompareOptions, Granularity};
use crate::text;

/// Kind of an inline segment. The differ emits only the first three;
/// the move variants are applied later by the composer's move pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Inserted,
    Deleted,
    MovedFrom,
    MovedTo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffSegment {
    pub text: String,
    pub kind: SegmentKind,
}

/// Inline diff of one matched paragraph pair. Counts are segment
/// counts, not word counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphDiffResult {
    pub segments: Vec<DiffSegment>,
    pub entirely_deleted: bool,
    pub entirely_inserted: bool,
    pub insertion_count: usize,
    pub deletion_count: usize,
    pub unchanged_count: usize,
}

impl ParagraphDiffResult {
    pub fn has_changes(&self) -> bool {
        self.insertion_count > 0 || self.deletion_count > 0
    }

    fn push(&mut self, text: String, kind: SegmentKind) {
        match kind {
            SegmentKind::Inserted => self.insertion_count += 1,
            SegmentKind::Deleted => self.deletion_count += 1,
            SegmentKind::Unchanged => self.unchanged_count += 1,
            SegmentKind::MovedFrom | SegmentKind::MovedTo => {}
        }
        self.segments.push(DiffSegment { text, kind });
    }
}

/// A diff unit carrying its display text and the key it compares by.
/// The key differs from the text only under `ignore_case`.
#[derive(Debug, Clone)]
struct Unit {
    text: String,
    key: String,
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

fn units_of(text: &str, options: &CompareOptions) -> Vec<Unit> {
    let tokens: Vec<String> = match options.granularity {
        Granularity::Word => {
            if options.ignore_whitespace {
                text::tokenize_words(text)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            } else {
                text::tokenize_preserving_whitespace(text)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            }
        }
        Granularity::Character => text.chars().map(|c| c.to_string()).collect(),
        Granularity::Sentence => split_sentences(text),
        Granularity::Paragraph => {
            let normalized = text::normalize_whitespace(text);
            if normalized.is_empty() {
                vec![]
            } else {
                vec![normalized]
            }
        }
    };

    tokens
        .into_iter()
        .map(|t| {
            let key = if options.ignore_case {
                t.to_ascii_lowercase()
            } else {
                t.clone()
            };
            Unit { text: t, key }
        })
        .collect()
}

fn split_sentences(text: &str) -> Vec<String> {
    let normalized = text::normalize_whitespace(text);
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in normalized.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// Whether merged units are joined with single spaces (and get the
/// trailing-space treatment) or concatenated as-is.
fn space_joined(options: &CompareOptions) -> bool {
    match options.granularity {
        Granularity::Word => options.ignore_whitespace,
        Granularity::Sentence => true,
        Granularity::Character | Granularity::Paragraph => false,
    }
}

/// Diff two plain texts into ordered inline segments.
pub fn diff_texts(original: &str, modified: &str, options: &CompareOptions) -> ParagraphDiffResult {
    let mut result = ParagraphDiffResult::default();

    let original_empty = original.trim().is_empty();
    let modified_empty = modified.trim().is_empty();

    if original_empty && modified_empty {
        return result;
    }
    if original_empty {
        result.entirely_inserted = true;
        result.push(modified.to_string(), SegmentKind::Inserted);
        return result;
    }
    if modified_empty {
        result.entirely_deleted = true;
        result.push(original.to_string(), SegmentKind::Deleted);
        return result;
    }

    let units1 = units_of(original, options);
    let units2 = units_of(modified, options);

    let correlation = lcs::flatten_correlation(lcs::correlate(&units1, &units2));
    let joiner = if space_joined(options) { " " } else { "" };

    for sequence in correlation {
        let (kind, units) = match sequence.status {
            CorrelationStatus::Unchanged => (SegmentKind::Unchanged, sequence.items2),
            CorrelationStatus::Deleted => (SegmentKind::Deleted, sequence.items1),
            CorrelationStatus::Inserted => (SegmentKind::Inserted, sequence.items2),
        };
        let Some(units) = units else { continue };
        if units.is_empty() {
            continue;
        }

        let mut segment_text = units
            .iter()
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join(joiner);
        if !joiner.is_empty() {
            segment_text.push(' ');
        }
        result.push(segment_text, kind);
    }

    // Trim the trailing space from the final segment only.
    if !joiner.is_empty() {
        if let Some(last) = result.segments.last_mut() {
            if last.text.ends_with(' ') {
                last.text.pop();
            }
        }
    }

    result
}

/// Diff two paragraphs known to be similar.
pub fn diff_paragraphs(
    original: &Paragraph,
    modified: &Paragraph,
    options: &CompareOptions,
) -> ParagraphDiffResult {
    diff_texts(&original.plain_text(), &modified.plain_text(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(original: &str, modified: &str) -> ParagraphDiffResult {
        diff_texts(original, modified, &CompareOptions::default())
    }

    #[test]
    fn both_empty_yields_empty_result() {
        let result = diff("", "  ");
        assert!(result.segments.is_empty());
        assert!(!result.entirely_deleted);
        assert!(!result.entirely_inserted);
    }

    #[test]
    fn empty_original_is_entirely_inserted() {
        let result = diff("", "X");
        assert!(result.entirely_inserted);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Inserted);
        assert_eq!(result.segments[0].text, "X");
    }

    #[test]
    fn empty_modified_is_entirely_deleted() {
        let result = diff("X", "");
        assert!(result.entirely_deleted);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Deleted);
        assert_eq!(result.segments[0].text, "X");
    }

    #[test]
    fn word_addition_yields_inserted_segment_only() {
        let result = diff("Hello world", "Hello beautiful world");

        assert!(result
            .segments
            .iter()
            .any(|s| s.kind == SegmentKind::Inserted && s.text.contains("beautiful")));
        assert_eq!(result.deletion_count, 0);
    }

    #[test]
    fn word_removal_yields_deleted_segment_only() {
        let result = diff("Hello beautiful world", "Hello world");

        let deleted: Vec<_> = result
            .segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Deleted)
            .collect();
        assert_eq!(deleted.len(), 1);
        assert!(deleted[0].text.contains("beautiful"));
        assert_eq!(result.insertion_count, 0);
    }

    #[test]
    fn replacement_yields_both_segments() {
        let result = diff("Hello world", "Hello universe");

        assert!(result
            .segments
            .iter()
            .any(|s| s.kind == SegmentKind::Deleted && s.text.contains("world")));
        assert!(result
            .segments
            .iter()
            .any(|s| s.kind == SegmentKind::Inserted && s.text.contains("universe")));
    }

    #[test]
    fn segments_carry_trailing_spaces_except_the_last() {
        let result = diff("foo bar baz", "foo bar qux");

        let concatenated: String = result.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(concatenated, "foo bar baz qux");
        assert_eq!(result.segments[0].text, "foo bar ");
        assert!(!result.segments.last().unwrap().text.ends_with(' '));
    }

    #[test]
    fn identical_texts_yield_single_unchanged_segment() {
        let result = diff("same text here", "same text here");
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Unchanged);
        assert_eq!(result.segments[0].text, "same text here");
        assert!(!result.has_changes());
    }

    #[test]
    fn counts_are_segment_counts() {
        let result = diff("a b c d", "a x c y");
        assert_eq!(
            result.insertion_count,
            result
                .segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Inserted)
                .count()
        );
        assert_eq!(
            result.deletion_count,
            result
                .segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Deleted)
                .count()
        );
        assert_eq!(
            result.unchanged_count,
            result
                .segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Unchanged)
                .count()
        );
    }

    #[test]
    fn ignore_case_matches_differently_cased_words() {
        let options = CompareOptions::default().with_ignore_case(true);
        let result = diff_texts("Hello World", "hello world", &options);
        assert!(!result.has_changes());
        assert_eq!(result.unchanged_count, 1);
    }

    #[test]
    fn character_granularity_diffs_within_words() {
        let options = CompareOptions::default().with_granularity(Granularity::Character);
        let result = diff_texts("cat", "cut", &options);

        assert!(result.has_changes());
        let concatenated: String = result
            .segments
            .iter()
            .filter(|s| s.kind != SegmentKind::Deleted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(concatenated, "cut");
    }

    #[test]
    fn sentence_granularity_keeps_sentences_whole() {
        let options = CompareOptions::default().with_granularity(Granularity::Sentence);
        let result = diff_texts(
            "First point. Second point.",
            "First point. Third point.",
            &options,
        );

        assert!(result
            .segments
            .iter()
            .any(|s| s.kind == SegmentKind::Deleted && s.text.contains("Second point.")));
        assert!(result
            .segments
            .iter()
            .any(|s| s.kind == SegmentKind::Inserted && s.text.contains("Third point.")));
    }

    #[test]
    fn whitespace_preserved_when_not_ignored() {
        let options = CompareOptions::default().with_ignore_whitespace(false);
        let result = diff_texts("a  b", "a  b", &options);
        assert!(!result.has_changes());
        let concatenated: String = result.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(concatenated, "a  b");
    }
}
