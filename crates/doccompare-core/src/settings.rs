use serde::{Deserialize, Serialize};

/// Unit size for the inline differ inside matched paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Character,
    #[default]
    Word,
    Sentence,
    Paragraph,
}

/// Formatting applied to redline runs. The defaults are the conventional
/// legal-redline scheme: red strikethrough deletions, blue bold
/// insertions, green moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedlineStyles {
    pub deletion_color: String,
    pub insertion_color: String,
    pub move_color: String,
    pub insertion_bold: bool,
    pub deletion_strikethrough: bool,
}

impl Default for RedlineStyles {
    fn default() -> Self {
        Self {
            deletion_color: "FF0000".to_string(),
            insertion_color: "0000FF".to_string(),
            move_color: "008000".to_string(),
            insertion_bold: true,
            deletion_strikethrough: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Pair whole-paragraph deletions with identical whole-paragraph
    /// insertions and mark them as moves instead.
    pub detect_moves: bool,
    /// Collapse whitespace before tokenizing; disabling preserves
    /// whitespace runs as their own diff units.
    pub ignore_whitespace: bool,
    /// ASCII-lowercase text before similarity and diffing.
    pub ignore_case: bool,
    /// Reserved: run-formatting differences are not yet diffed.
    pub ignore_formatting: bool,
    pub granularity: Granularity,
    pub styles: RedlineStyles,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            detect_moves: false,
            ignore_whitespace: true,
            ignore_case: false,
            ignore_formatting: false,
            granularity: Granularity::Word,
            styles: RedlineStyles::default(),
        }
    }
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detect_moves(mut self, detect: bool) -> Self {
        self.detect_moves = detect;
        self
    }

    pub fn with_ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    pub fn with_ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_styles(mut self, styles: RedlineStyles) -> Self {
        self.styles = styles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_have_expected_values() {
        let options = CompareOptions::default();

        assert!(!options.detect_moves);
        assert!(options.ignore_whitespace);
        assert!(!options.ignore_case);
        assert_eq!(options.granularity, Granularity::Word);
        assert_eq!(options.styles.deletion_color, "FF0000");
        assert_eq!(options.styles.insertion_color, "0000FF");
        assert_eq!(options.styles.move_color, "008000");
    }

    #[test]
    fn builder_pattern_works() {
        let options = CompareOptions::new()
            .with_detect_moves(true)
            .with_ignore_case(true)
            .with_granularity(Granularity::Character);

        assert!(options.detect_moves);
        assert!(options.ignore_case);
        assert_eq!(options.granularity, Granularity::Character);
    }

    #[test]
    fn granularity_serializes_lowercase() {
        let json = serde_json::to_string(&Granularity::Word).unwrap();
        assert_eq!(json, "\"word\"");
    }
}
