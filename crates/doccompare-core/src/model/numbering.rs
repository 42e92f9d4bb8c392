use std::collections::BTreeMap;

use super::paragraph::Alignment;
use super::Twips;

/// Number format of one list level. Unknown formats collapse to
/// `Decimal` on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    #[default]
    Decimal,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
    Bullet,
    None,
    Ordinal,
    CardinalText,
    OrdinalText,
}

impl NumberFormat {
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "decimal" => Self::Decimal,
            "lowerLetter" => Self::LowerLetter,
            "upperLetter" => Self::UpperLetter,
            "lowerRoman" => Self::LowerRoman,
            "upperRoman" => Self::UpperRoman,
            "bullet" => Self::Bullet,
            "none" => Self::None,
            "ordinal" => Self::Ordinal,
            "cardinalText" => Self::CardinalText,
            "ordinalText" => Self::OrdinalText,
            _ => Self::Decimal,
        }
    }

    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::LowerLetter => "lowerLetter",
            Self::UpperLetter => "upperLetter",
            Self::LowerRoman => "lowerRoman",
            Self::UpperRoman => "upperRoman",
            Self::Bullet => "bullet",
            Self::None => "none",
            Self::Ordinal => "ordinal",
            Self::CardinalText => "cardinalText",
            Self::OrdinalText => "ordinalText",
        }
    }
}

/// One level (0..=8) of a numbering definition. `text` is the rendered
/// pattern with `%n` placeholders, e.g. `"%1.%2"`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingLevel {
    pub index: u8,
    pub format: NumberFormat,
    pub text: String,
    pub start: u32,
    pub indent: Option<Twips>,
    pub hanging: Option<Twips>,
    pub alignment: Alignment,
    pub font: Option<String>,
}

impl NumberingLevel {
    pub fn new(index: u8) -> Self {
        Self {
            index,
            format: NumberFormat::Decimal,
            text: format!("%{}.", index + 1),
            start: 1,
            indent: None,
            hanging: None,
            alignment: Alignment::Left,
            font: None,
        }
    }
}

/// Abstract description of a multi-level list format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberingDefinition {
    pub id: u32,
    pub name: Option<String>,
    pub multi_level: bool,
    pub levels: Vec<NumberingLevel>,
}

impl NumberingDefinition {
    /// A single-level decimal list, the fallback emitted for dangling
    /// references on output.
    pub fn default_decimal(id: u32) -> Self {
        Self {
            id,
            name: None,
            multi_level: false,
            levels: vec![NumberingLevel::new(0)],
        }
    }

    pub fn level(&self, index: u8) -> Option<&NumberingLevel> {
        self.levels.iter().find(|l| l.index == index)
    }
}

/// Per-level override applied by a numbering instance.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingLevelOverride {
    pub level: u8,
    pub start_override: Option<u32>,
    pub level_redefinition: Option<NumberingLevel>,
}

/// A concrete list "counter" that paragraphs reference; points at a
/// definition and may override individual levels. Instance ids are
/// stable identities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberingInstance {
    pub id: u32,
    pub definition_id: u32,
    pub overrides: BTreeMap<u8, NumberingLevelOverride>,
}

impl NumberingInstance {
    pub fn new(id: u32, definition_id: u32) -> Self {
        Self {
            id,
            definition_id,
            overrides: BTreeMap::new(),
        }
    }
}

/// A paragraph's link to its list: instance id plus level 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingInfo {
    pub instance_id: u32,
    pub level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_falls_back_to_decimal() {
        assert_eq!(NumberFormat::from_ooxml("chicago"), NumberFormat::Decimal);
        assert_eq!(NumberFormat::from_ooxml(""), NumberFormat::Decimal);
    }

    #[test]
    fn format_round_trips_through_ooxml_names() {
        for format in [
            NumberFormat::Decimal,
            NumberFormat::LowerRoman,
            NumberFormat::Bullet,
            NumberFormat::OrdinalText,
        ] {
            assert_eq!(NumberFormat::from_ooxml(format.as_ooxml()), format);
        }
    }

    #[test]
    fn new_level_starts_at_one() {
        let level = NumberingLevel::new(2);
        assert_eq!(level.start, 1);
        assert_eq!(level.text, "%3.");
    }

    #[test]
    fn instance_overrides_clone_independently() {
        let mut instance = NumberingInstance::new(1, 10);
        instance.overrides.insert(
            0,
            NumberingLevelOverride {
                level: 0,
                start_override: Some(5),
                level_redefinition: None,
            },
        );

        let mut copy = instance.clone();
        copy.overrides.get_mut(&0).unwrap().start_override = Some(9);

        assert_eq!(instance.overrides[&0].start_override, Some(5));
    }
}
