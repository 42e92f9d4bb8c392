use super::paragraph::ParagraphStyle;
use super::run::RunFormatting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleType {
    #[default]
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleType {
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "character" => Self::Character,
            "table" => Self::Table,
            "numbering" => Self::Numbering,
            _ => Self::Paragraph,
        }
    }

    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::Numbering => "numbering",
        }
    }
}

/// A named style from the styles part. Carried through comparison so
/// the redlined output keeps heading and list styling intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDefinition {
    pub id: String,
    pub name: Option<String>,
    pub style_type: StyleType,
    pub based_on: Option<String>,
    pub next_style: Option<String>,
    pub paragraph: Option<ParagraphStyle>,
    pub run: Option<RunFormatting>,
}

impl StyleDefinition {
    pub fn new(id: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            id: id.into(),
            style_type,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_type_round_trips() {
        for t in [
            StyleType::Paragraph,
            StyleType::Character,
            StyleType::Table,
            StyleType::Numbering,
        ] {
            assert_eq!(StyleType::from_ooxml(t.as_ooxml()), t);
        }
    }

    #[test]
    fn unknown_style_type_defaults_to_paragraph() {
        assert_eq!(StyleType::from_ooxml("weird"), StyleType::Paragraph);
    }
}
