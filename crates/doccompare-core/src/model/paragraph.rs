use std::collections::BTreeSet;

use super::numbering::NumberingInfo;
use super::run::{Run, RunFormatting};
use super::Twips;
use crate::text;

/// Horizontal alignment of a paragraph or numbering level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// How the `line` spacing value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineRule {
    #[default]
    Auto,
    Exact,
    AtLeast,
}

/// Paragraph-level formatting. Lengths are twips; a negative
/// `indent_first_line` encodes a hanging indent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphStyle {
    pub style_id: Option<String>,
    /// 1..=9 when the paragraph uses a heading style.
    pub heading_level: Option<u8>,
    pub alignment: Alignment,
    pub indent_left: Twips,
    pub indent_right: Twips,
    pub indent_first_line: Twips,
    pub spacing_before: Twips,
    pub spacing_after: Twips,
    pub line_spacing: Twips,
    pub line_rule: LineRule,
    pub keep_with_next: bool,
    pub keep_lines_together: bool,
    pub page_break_before: bool,
    /// 0..=8, TOC outline position.
    pub outline_level: Option<u8>,
}

/// An ordered list of runs plus paragraph-level state. Numbering is
/// referenced by instance id so cloning a paragraph never drags list
/// definitions along with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub style: ParagraphStyle,
    pub numbering: Option<NumberingInfo>,
    pub bookmark_starts: BTreeSet<String>,
    pub bookmark_ends: BTreeSet<String>,
    pub id: Option<String>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding a single plainly-formatted run.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: ParagraphStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_numbering(mut self, instance_id: u32, level: u8) -> Self {
        self.numbering = Some(NumberingInfo { instance_id, level });
        self
    }

    pub fn add_run(&mut self, text: impl Into<String>, formatting: RunFormatting) {
        self.runs.push(Run::new(text, formatting));
    }

    /// Concatenation of run texts in order, verbatim.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Plain text trimmed with interior whitespace runs collapsed to
    /// single spaces.
    pub fn normalized_text(&self) -> String {
        text::normalize_whitespace(&self.plain_text())
    }

    pub fn word_count(&self) -> usize {
        text::word_count(&self.plain_text())
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_text().is_empty()
    }
}
