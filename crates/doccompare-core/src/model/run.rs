/// Color applied to deleted text in a redline.
pub const DELETION_COLOR: &str = "FF0000";
/// Color applied to inserted text in a redline.
pub const INSERTION_COLOR: &str = "0000FF";
/// Color applied to moved text in a redline.
pub const MOVE_COLOR: &str = "008000";

/// A maximal span of text sharing one formatting record inside a
/// paragraph. Leading and trailing spaces in `text` are significant and
/// preserved on serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub formatting: RunFormatting,
}

impl Run {
    pub fn new(text: impl Into<String>, formatting: RunFormatting) -> Self {
        Self {
            text: text.into(),
            formatting,
        }
    }

    /// A run with default (empty) formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunFormatting::default())
    }
}

/// Character formatting on a run. Font size is in points (OOXML
/// half-points are divided by two on read); colors are six hex digits
/// with no leading hash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<String>,
    pub highlight: Option<String>,
    pub style_id: Option<String>,
}

impl RunFormatting {
    /// Formatting for deleted text: red strikethrough over whatever the
    /// base run carried.
    pub fn for_deletion(base: Option<&RunFormatting>) -> Self {
        let mut formatting = base.cloned().unwrap_or_default();
        formatting.strikethrough = true;
        formatting.color = Some(DELETION_COLOR.to_string());
        formatting
    }

    /// Formatting for inserted text: blue bold over the base.
    pub fn for_insertion(base: Option<&RunFormatting>) -> Self {
        let mut formatting = base.cloned().unwrap_or_default();
        formatting.bold = true;
        formatting.color = Some(INSERTION_COLOR.to_string());
        formatting
    }

    /// Formatting for moved text: green, struck through at the source
    /// location only.
    pub fn for_move(base: Option<&RunFormatting>, is_source: bool) -> Self {
        let mut formatting = base.cloned().unwrap_or_default();
        formatting.color = Some(MOVE_COLOR.to_string());
        if is_source {
            formatting.strikethrough = true;
        }
        formatting
    }
}
