//! Top-level compare pipeline: flatten, align, diff, compose.

use crate::align;
use crate::compose;
use crate::model::Document;
use crate::settings::CompareOptions;
use crate::stats::CompareStatistics;

/// Result of an in-memory compare: the redlined document plus change
/// totals.
#[derive(Debug, Clone)]
pub struct RedlineOutcome {
    pub document: Document,
    pub statistics: CompareStatistics,
}

pub struct DocumentComparer;

impl DocumentComparer {
    /// Compare two documents and build the redlined result. Pure and
    /// deterministic: identical inputs and options always produce a
    /// structurally identical outcome. Never fails on well-formed
    /// model inputs.
    pub fn compare(
        original: &Document,
        modified: &Document,
        options: &CompareOptions,
    ) -> RedlineOutcome {
        let trace = align::align_documents(original, modified, options);
        let (document, statistics) = compose::compose_redline(original, modified, &trace, options);
        RedlineOutcome {
            document,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Paragraph, Section};

    fn doc_of(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        let mut section = Section::new();
        for text in texts {
            section
                .blocks
                .push(Block::Paragraph(Paragraph::from_text(*text)));
        }
        doc.sections.push(section);
        doc
    }

    #[test]
    fn outcome_counts_both_sides() {
        let original = doc_of(&["one one", "two two"]);
        let modified = doc_of(&["one one", "two two", "three three"]);

        let outcome =
            DocumentComparer::compare(&original, &modified, &CompareOptions::default());
        assert_eq!(outcome.statistics.original_paragraphs, 2);
        assert_eq!(outcome.statistics.modified_paragraphs, 3);
        assert_eq!(outcome.statistics.insertions, 2);
    }

    #[test]
    fn empty_documents_compare_cleanly() {
        let empty = Document::new();
        let outcome = DocumentComparer::compare(&empty, &empty, &CompareOptions::default());

        assert_eq!(outcome.statistics, CompareStatistics::default());
        assert_eq!(outcome.document.paragraphs_flat().len(), 0);
        assert_eq!(outcome.document.sections.len(), 1);
    }
}
