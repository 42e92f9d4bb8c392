//! Redline composition.
//!
//! Walks the alignment trace and builds the output document around the
//! modified document's structural scaffolding: its properties, numbering
//! definitions and instances, styles, and first section's layout and
//! headers/footers are deep-cloned into the result, so numbered lists
//! restart and headings stay styled exactly as the modified document
//! would render them. Run formatting then carries the redline markup.

use crate::align::AlignmentEntry;
use crate::diff::{self, SegmentKind};
use crate::model::{
    Block, Document, Paragraph, Run, RunFormatting, Section,
};
use crate::settings::{CompareOptions, RedlineStyles};
use crate::stats::CompareStatistics;

/// Deletion formatting using the caller's styles in place of the
/// hard-coded defaults.
fn deletion_formatting(styles: &RedlineStyles, base: Option<&RunFormatting>) -> RunFormatting {
    let mut formatting = base.cloned().unwrap_or_default();
    if styles.deletion_strikethrough {
        formatting.strikethrough = true;
    }
    formatting.color = Some(styles.deletion_color.clone());
    formatting
}

fn insertion_formatting(styles: &RedlineStyles, base: Option<&RunFormatting>) -> RunFormatting {
    let mut formatting = base.cloned().unwrap_or_default();
    if styles.insertion_bold {
        formatting.bold = true;
    }
    formatting.color = Some(styles.insertion_color.clone());
    formatting
}

fn move_formatting(
    styles: &RedlineStyles,
    base: Option<&RunFormatting>,
    is_source: bool,
) -> RunFormatting {
    let mut formatting = base.cloned().unwrap_or_default();
    formatting.color = Some(styles.move_color.clone());
    if is_source {
        formatting.strikethrough = true;
    }
    formatting
}

/// A whole-paragraph insert or delete remembered for the move pass,
/// keeping the pristine paragraph so move formatting derives from the
/// source formatting rather than the already-rewritten redline runs.
struct MoveCandidate {
    block_index: usize,
    normalized: String,
    words: usize,
    pristine: Paragraph,
    paired: bool,
}

/// Build the redlined document and its statistics from an alignment
/// trace. Pure on in-memory data; never fails.
pub fn compose_redline(
    original: &Document,
    modified: &Document,
    trace: &[AlignmentEntry],
    options: &CompareOptions,
) -> (Document, CompareStatistics) {
    let original_flat = original.paragraphs_flat();
    let modified_flat = modified.paragraphs_flat();
    let styles = &options.styles;

    let mut result = Document {
        sections: Vec::new(),
        properties: modified.properties.clone(),
        numbering_definitions: modified.numbering_definitions.clone(),
        numbering_instances: modified.numbering_instances.clone(),
        styles: modified.styles.clone(),
    };

    let mut section = match modified.sections.first() {
        Some(first) => Section {
            blocks: Vec::new(),
            properties: first.properties.clone(),
            headers: first.headers.clone(),
            footers: first.footers.clone(),
        },
        None => Section::new(),
    };

    let mut stats = CompareStatistics {
        original_paragraphs: original_flat.len(),
        modified_paragraphs: modified_flat.len(),
        ..Default::default()
    };

    let mut deleted_candidates: Vec<MoveCandidate> = Vec::new();
    let mut inserted_candidates: Vec<MoveCandidate> = Vec::new();

    for entry in trace {
        match *entry {
            AlignmentEntry::Deleted { original: i } => {
                let source = original_flat[i];
                let mut paragraph = source.clone();
                for run in &mut paragraph.runs {
                    run.formatting = deletion_formatting(styles, Some(&run.formatting));
                }

                let words = source.word_count();
                stats.deletions += words;

                if options.detect_moves {
                    deleted_candidates.push(MoveCandidate {
                        block_index: section.blocks.len(),
                        normalized: source.normalized_text(),
                        words,
                        pristine: source.clone(),
                        paired: false,
                    });
                }
                section.blocks.push(Block::Paragraph(paragraph));
            }

            AlignmentEntry::Inserted { modified: j } => {
                let source = modified_flat[j];
                let mut paragraph = source.clone();
                for run in &mut paragraph.runs {
                    run.formatting = insertion_formatting(styles, Some(&run.formatting));
                }

                let words = source.word_count();
                stats.insertions += words;

                if options.detect_moves {
                    inserted_candidates.push(MoveCandidate {
                        block_index: section.blocks.len(),
                        normalized: source.normalized_text(),
                        words,
                        pristine: source.clone(),
                        paired: false,
                    });
                }
                section.blocks.push(Block::Paragraph(paragraph));
            }

            AlignmentEntry::Matched {
                original: i,
                modified: j,
                ..
            } => {
                let original_para = original_flat[i];
                let modified_para = modified_flat[j];
                let result_diff = diff::diff_paragraphs(original_para, modified_para, options);

                stats.insertions += result_diff.insertion_count;
                stats.deletions += result_diff.deletion_count;
                stats.unchanged += result_diff.unchanged_count;

                let mut paragraph = Paragraph {
                    runs: Vec::new(),
                    style: modified_para.style.clone(),
                    numbering: modified_para.numbering,
                    bookmark_starts: modified_para.bookmark_starts.clone(),
                    bookmark_ends: modified_para.bookmark_ends.clone(),
                    id: modified_para.id.clone(),
                };

                for segment in &result_diff.segments {
                    if segment.text.is_empty() {
                        continue;
                    }
                    let formatting = match segment.kind {
                        SegmentKind::Unchanged => RunFormatting::default(),
                        SegmentKind::Deleted => deletion_formatting(styles, None),
                        SegmentKind::Inserted => insertion_formatting(styles, None),
                        SegmentKind::MovedFrom => move_formatting(styles, None, true),
                        SegmentKind::MovedTo => move_formatting(styles, None, false),
                    };
                    paragraph.runs.push(Run::new(segment.text.clone(), formatting));
                }

                section.blocks.push(Block::Paragraph(paragraph));
            }
        }
    }

    if options.detect_moves {
        detect_moves(
            &mut section,
            &mut stats,
            styles,
            &mut deleted_candidates,
            &mut inserted_candidates,
        );
    }

    result.sections.push(section);
    (result, stats)
}

/// Pair whole-paragraph deletions with whole-paragraph insertions whose
/// normalized texts match exactly, first-come, and rewrite both as move
/// source/destination.
fn detect_moves(
    section: &mut Section,
    stats: &mut CompareStatistics,
    styles: &RedlineStyles,
    deleted: &mut [MoveCandidate],
    inserted: &mut [MoveCandidate],
) {
    for del in deleted.iter_mut() {
        if del.normalized.is_empty() {
            continue;
        }

        let Some(ins) = inserted
            .iter_mut()
            .find(|c| !c.paired && c.normalized == del.normalized)
        else {
            continue;
        };

        del.paired = true;
        ins.paired = true;

        rewrite_as_move(section, del, styles, true);
        rewrite_as_move(section, ins, styles, false);

        stats.deletions -= del.words;
        stats.insertions -= ins.words;
        stats.moves += del.words;
    }
}

fn rewrite_as_move(
    section: &mut Section,
    candidate: &MoveCandidate,
    styles: &RedlineStyles,
    is_source: bool,
) {
    if let Some(paragraph) = section.blocks[candidate.block_index].as_paragraph_mut() {
        let mut replacement = candidate.pristine.clone();
        for run in &mut replacement.runs {
            run.formatting = move_formatting(styles, Some(&run.formatting), is_source);
        }
        *paragraph = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align;
    use crate::model::{MOVE_COLOR, NumberingDefinition, NumberingInstance};

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

    fn compare(original: &Document, modified: &Document, options: &CompareOptions) -> (Document, CompareStatistics) {
        let trace = align::align_documents(original, modified, options);
        compose_redline(original, modified, &trace, options)
    }

    #[test]
    fn deleted_paragraph_is_struck_red() {
        let original = doc_of(&["keep this text", "drop drop drop"]);
        let modified = doc_of(&["keep this text"]);
        let options = CompareOptions::default();

        let (result, stats) = compare(&original, &modified, &options);
        let paragraphs = result.paragraphs_flat();
        assert_eq!(paragraphs.len(), 2);

        let dropped = paragraphs[1];
        assert_eq!(dropped.plain_text(), "drop drop drop");
        for run in &dropped.runs {
            assert!(run.formatting.strikethrough);
            assert_eq!(run.formatting.color.as_deref(), Some("FF0000"));
        }
        assert_eq!(stats.deletions, 3);
    }

    #[test]
    fn inserted_paragraph_is_bold_blue() {
        let original = doc_of(&["keep this text"]);
        let modified = doc_of(&["keep this text", "brand new paragraph"]);
        let options = CompareOptions::default();

        let (result, stats) = compare(&original, &modified, &options);
        let paragraphs = result.paragraphs_flat();

        let added = paragraphs[1];
        for run in &added.runs {
            assert!(run.formatting.bold);
            assert_eq!(run.formatting.color.as_deref(), Some("0000FF"));
        }
        assert_eq!(stats.insertions, 3);
    }

    #[test]
    fn matched_identical_paragraph_rebuilds_with_plain_runs() {
        let mut original = doc_of(&[]);
        let mut para = Paragraph::new();
        para.add_run(
            "styled text",
            RunFormatting {
                italic: true,
                ..Default::default()
            },
        );
        original.sections[0].blocks.push(Block::Paragraph(para));
        let modified = original.clone();

        let options = CompareOptions::default();
        let (result, stats) = compare(&original, &modified, &options);

        // Matched output is rebuilt from segments; unchanged text gets
        // default run formatting.
        let out = result.paragraphs_flat();
        assert_eq!(out[0].plain_text(), "styled text");
        assert_eq!(out[0].runs.len(), 1);
        assert_eq!(out[0].runs[0].formatting, RunFormatting::default());
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.insertions, 0);
        assert_eq!(stats.deletions, 0);
    }

    #[test]
    fn matched_edited_paragraph_carries_numbering_and_style() {
        let mut modified = doc_of(&[]);
        modified
            .numbering_definitions
            .push(NumberingDefinition::default_decimal(1));
        modified.numbering_instances.push(NumberingInstance::new(5, 1));
        let para = Paragraph::from_text("first item edited").with_numbering(5, 0);
        modified.sections[0].blocks.push(Block::Paragraph(para));

        let original = doc_of(&["first item original"]);
        let options = CompareOptions::default();
        let (result, _) = compare(&original, &modified, &options);

        let out = result.paragraphs_flat();
        assert_eq!(out.len(), 1);
        let numbering = out[0].numbering.expect("numbering carried through");
        assert_eq!(numbering.instance_id, 5);
        assert_eq!(numbering.level, 0);
        assert!(result.numbering_instance(5).is_some());
        assert!(result.numbering_definition(1).is_some());
    }

    #[test]
    fn custom_styles_replace_default_colors() {
        let styles = RedlineStyles {
            deletion_color: "800000".to_string(),
            insertion_color: "000080".to_string(),
            move_color: "008080".to_string(),
            insertion_bold: true,
            deletion_strikethrough: true,
        };
        let options = CompareOptions::default().with_styles(styles);

        let original = doc_of(&["old paragraph gone"]);
        let modified = doc_of(&["fresh paragraph here"]);
        let (result, _) = compare(&original, &modified, &options);

        let colors: Vec<Option<&str>> = result
            .paragraphs_flat()
            .iter()
            .flat_map(|p| p.runs.iter())
            .map(|r| r.formatting.color.as_deref())
            .collect();
        assert!(colors.contains(&Some("000080")));
        assert!(colors.contains(&Some("800000")));
        assert!(!colors.contains(&Some("FF0000")));
    }

    #[test]
    fn move_detection_pairs_identical_paragraphs() {
        let original = doc_of(&["movable clause text", "anchor one anchor", "anchor two anchor"]);
        let modified = doc_of(&["anchor one anchor", "anchor two anchor", "movable clause text"]);
        let options = CompareOptions::default().with_detect_moves(true);

        let (result, stats) = compare(&original, &modified, &options);

        assert_eq!(stats.moves, 3);
        assert_eq!(stats.insertions, 0);
        assert_eq!(stats.deletions, 0);

        let moved: Vec<&Paragraph> = result
            .paragraphs_flat()
            .into_iter()
            .filter(|p| {
                p.runs
                    .iter()
                    .any(|r| r.formatting.color.as_deref() == Some(MOVE_COLOR))
            })
            .collect();
        assert_eq!(moved.len(), 2);

        let source = moved
            .iter()
            .find(|p| p.runs.iter().all(|r| r.formatting.strikethrough))
            .expect("move source struck through");
        let destination = moved
            .iter()
            .find(|p| p.runs.iter().all(|r| !r.formatting.strikethrough))
            .expect("move destination not struck");
        assert_eq!(source.plain_text(), destination.plain_text());
    }

    #[test]
    fn move_destination_does_not_keep_insertion_bold() {
        let original = doc_of(&["movable clause text", "anchor anchor anchor"]);
        let modified = doc_of(&["anchor anchor anchor", "movable clause text"]);
        let options = CompareOptions::default().with_detect_moves(true);

        let (result, _) = compare(&original, &modified, &options);
        let destination = result
            .paragraphs_flat()
            .into_iter()
            .find(|p| {
                p.runs.iter().any(|r| {
                    r.formatting.color.as_deref() == Some(MOVE_COLOR) && !r.formatting.strikethrough
                })
            })
            .expect("destination present");
        assert!(destination.runs.iter().all(|r| !r.formatting.bold));
    }

    #[test]
    fn output_section_clones_modified_layout() {
        let original = doc_of(&["text text"]);
        let mut modified = doc_of(&["text text"]);
        modified.sections[0].properties.page_width = 11906;
        modified.sections[0].properties.page_height = 16838;

        let options = CompareOptions::default();
        let (result, _) = compare(&original, &modified, &options);

        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].properties.page_width, 11906);
        assert_eq!(result.sections[0].properties.page_height, 16838);
    }
}
