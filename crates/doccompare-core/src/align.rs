//! Global paragraph alignment.
//!
//! Classic longest-common-subsequence DP over the fuzzy similarity
//! indicator, backtracked into an ordered trace of Matched / Inserted /
//! Deleted entries reading top-to-bottom of the document. O(m·n) time
//! and space; documents are expected to fit in memory.

use crate::model::{Document, Paragraph};
use crate::settings::CompareOptions;
use crate::similarity::{self, SIMILARITY_THRESHOLD};

/// One entry of the alignment trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignmentEntry {
    /// The paragraphs align; `score` is their Jaccard similarity.
    Matched {
        original: usize,
        modified: usize,
        score: f64,
    },
    /// Paragraph present only in the modified document.
    Inserted { modified: usize },
    /// Paragraph present only in the original document.
    Deleted { original: usize },
}

/// Pairwise similarity scores, computed once so the DP fill and the
/// backtrack agree on every cell.
struct ScoreMatrix {
    scores: Vec<f64>,
    cols: usize,
}

impl ScoreMatrix {
    fn build(original: &[&Paragraph], modified: &[&Paragraph], ignore_case: bool) -> Self {
        let originals: Vec<_> = original
            .iter()
            .map(|p| {
                let text = p.normalized_text();
                let set = similarity::token_set(&text, ignore_case);
                (text, set)
            })
            .collect();
        let modifieds: Vec<_> = modified
            .iter()
            .map(|p| {
                let text = p.normalized_text();
                let set = similarity::token_set(&text, ignore_case);
                (text, set)
            })
            .collect();

        let cols = modifieds.len();
        let mut scores = Vec::with_capacity(originals.len() * cols);
        for (otext, oset) in &originals {
            for (mtext, mset) in &modifieds {
                let score = if otext.is_empty() && mtext.is_empty() {
                    1.0
                } else if otext.is_empty() || mtext.is_empty() {
                    // One-sided emptiness never aligns.
                    -1.0
                } else {
                    similarity::jaccard(oset, mset)
                };
                scores.push(score);
            }
        }

        Self { scores, cols }
    }

    fn score(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.cols + j]
    }

    fn similar(&self, i: usize, j: usize) -> bool {
        self.score(i, j) >= SIMILARITY_THRESHOLD
    }
}

/// Align two paragraph sequences. The trace covers every index of both
/// inputs exactly once, in document order.
pub fn align_paragraphs(
    original: &[&Paragraph],
    modified: &[&Paragraph],
    options: &CompareOptions,
) -> Vec<AlignmentEntry> {
    let m = original.len();
    let n = modified.len();
    let matrix = ScoreMatrix::build(original, modified, options.ignore_case);

    // DP fill.
    let mut lcs = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if matrix.similar(i - 1, j - 1) {
                lcs[i][j] = lcs[i - 1][j - 1] + 1;
            } else {
                lcs[i][j] = lcs[i - 1][j].max(lcs[i][j - 1]);
            }
        }
    }

    // Backtrack, emitting in reverse order. On ties the `>=` prefers
    // insertions, so inserts read before deletes top-to-bottom.
    let mut trace = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && matrix.similar(i - 1, j - 1) {
            trace.push(AlignmentEntry::Matched {
                original: i - 1,
                modified: j - 1,
                score: matrix.score(i - 1, j - 1),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            trace.push(AlignmentEntry::Inserted { modified: j - 1 });
            j -= 1;
        } else {
            trace.push(AlignmentEntry::Deleted { original: i - 1 });
            i -= 1;
        }
    }

    trace.reverse();
    trace
}

/// Flatten both documents and align their paragraph sequences.
pub fn align_documents(
    original: &Document,
    modified: &Document,
    options: &CompareOptions,
) -> Vec<AlignmentEntry> {
    align_paragraphs(
        &original.paragraphs_flat(),
        &modified.paragraphs_flat(),
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
        texts.iter().map(|t| Paragraph::from_text(*t)).collect()
    }

    fn align(original: &[Paragraph], modified: &[Paragraph]) -> Vec<AlignmentEntry> {
        let o: Vec<&Paragraph> = original.iter().collect();
        let m: Vec<&Paragraph> = modified.iter().collect();
        align_paragraphs(&o, &m, &CompareOptions::default())
    }

    #[test]
    fn identical_sequences_match_pairwise() {
        let original = paragraphs(&["first paragraph", "second paragraph"]);
        let trace = align(&original, &original);

        assert_eq!(trace.len(), 2);
        assert!(matches!(
            trace[0],
            AlignmentEntry::Matched {
                original: 0,
                modified: 0,
                ..
            }
        ));
        assert!(matches!(
            trace[1],
            AlignmentEntry::Matched {
                original: 1,
                modified: 1,
                ..
            }
        ));
    }

    #[test]
    fn insertion_in_middle_yields_one_inserted_entry() {
        let original = paragraphs(&["alpha alpha", "gamma gamma"]);
        let modified = paragraphs(&["alpha alpha", "beta beta", "gamma gamma"]);
        let trace = align(&original, &modified);

        assert_eq!(trace.len(), 3);
        let inserted: Vec<_> = trace
            .iter()
            .filter(|e| matches!(e, AlignmentEntry::Inserted { .. }))
            .collect();
        assert_eq!(inserted.len(), 1);
        assert!(matches!(trace[1], AlignmentEntry::Inserted { modified: 1 }));
    }

    #[test]
    fn deletion_in_middle_yields_one_deleted_entry() {
        let original = paragraphs(&["alpha alpha", "beta beta", "gamma gamma"]);
        let modified = paragraphs(&["alpha alpha", "gamma gamma"]);
        let trace = align(&original, &modified);

        assert_eq!(trace.len(), 3);
        let deleted: Vec<_> = trace
            .iter()
            .filter(|e| matches!(e, AlignmentEntry::Deleted { .. }))
            .collect();
        assert_eq!(deleted.len(), 1);
        assert!(matches!(trace[1], AlignmentEntry::Deleted { original: 1 }));
    }

    #[test]
    fn edited_paragraph_still_matches() {
        let original = paragraphs(&["the quick brown fox jumps"]);
        let modified = paragraphs(&["the quick brown fox leaps"]);
        let trace = align(&original, &modified);

        assert_eq!(trace.len(), 1);
        match trace[0] {
            AlignmentEntry::Matched { score, .. } => assert!(score >= 0.5),
            _ => panic!("expected a match, got {:?}", trace[0]),
        }
    }

    #[test]
    fn unrelated_paragraphs_split_into_insert_and_delete() {
        let original = paragraphs(&["completely different words here"]);
        let modified = paragraphs(&["nothing shared at all"]);
        let trace = align(&original, &modified);

        assert_eq!(trace.len(), 2);
        assert!(trace
            .iter()
            .any(|e| matches!(e, AlignmentEntry::Inserted { .. })));
        assert!(trace
            .iter()
            .any(|e| matches!(e, AlignmentEntry::Deleted { .. })));
    }

    #[test]
    fn inserts_read_before_deletes_on_ties() {
        let original = paragraphs(&["shared intro text", "old old old"]);
        let modified = paragraphs(&["shared intro text", "new new new"]);
        let trace = align(&original, &modified);

        assert_eq!(trace.len(), 3);
        assert!(matches!(trace[0], AlignmentEntry::Matched { .. }));
        assert!(matches!(trace[1], AlignmentEntry::Inserted { .. }));
        assert!(matches!(trace[2], AlignmentEntry::Deleted { .. }));
    }

    #[test]
    fn empty_inputs_produce_empty_or_one_sided_traces() {
        let empty: Vec<Paragraph> = vec![];
        let some = paragraphs(&["only only"]);

        assert!(align(&empty, &empty).is_empty());

        let inserted = align(&empty, &some);
        assert_eq!(inserted.len(), 1);
        assert!(matches!(inserted[0], AlignmentEntry::Inserted { modified: 0 }));

        let deleted = align(&some, &empty);
        assert_eq!(deleted.len(), 1);
        assert!(matches!(deleted[0], AlignmentEntry::Deleted { original: 0 }));
    }
}
