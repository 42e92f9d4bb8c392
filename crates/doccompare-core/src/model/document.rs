use chrono::{DateTime, Utc};

use super::numbering::{NumberingDefinition, NumberingInstance};
use super::paragraph::Paragraph;
use super::section::Section;
use super::styles::StyleDefinition;

/// Core metadata plus document-wide defaults. Everything optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub creator: Option<String>,
    pub last_modified_by: Option<String>,
    pub default_font: Option<String>,
    pub default_font_size: Option<f32>,
}

/// The root of the model. Owns its sections, numbering, and styles
/// exclusively; cloning yields a fully independent tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sections: Vec<Section>,
    pub properties: DocumentProperties,
    pub numbering_definitions: Vec<NumberingDefinition>,
    pub numbering_instances: Vec<NumberingInstance>,
    pub styles: Vec<StyleDefinition>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// All paragraphs in document order: each section's top-level
    /// blocks, with table cell paragraphs contributed at the table's
    /// position (row-major, cell-major, block order). This is the
    /// sequence the paragraph aligner consumes.
    pub fn paragraphs_flat(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for section in &self.sections {
            out.extend(section.paragraphs());
        }
        out
    }

    pub fn numbering_definition(&self, id: u32) -> Option<&NumberingDefinition> {
        self.numbering_definitions.iter().find(|d| d.id == id)
    }

    pub fn numbering_instance(&self, id: u32) -> Option<&NumberingInstance> {
        self.numbering_instances.iter().find(|i| i.id == id)
    }

    pub fn style(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, NumberingInfo};

    #[test]
    fn paragraphs_flat_spans_sections() {
        let mut doc = Document::new();
        let mut first = Section::new();
        first
            .blocks
            .push(Block::Paragraph(Paragraph::from_text("one")));
        let mut second = Section::new();
        second
            .blocks
            .push(Block::Paragraph(Paragraph::from_text("two")));
        doc.sections.push(first);
        doc.sections.push(second);

        let texts: Vec<String> = doc
            .paragraphs_flat()
            .iter()
            .map(|p| p.plain_text())
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn numbering_lookup_by_id() {
        let mut doc = Document::new();
        doc.numbering_definitions
            .push(NumberingDefinition::default_decimal(7));
        doc.numbering_instances
            .push(NumberingInstance::new(3, 7));

        assert!(doc.numbering_definition(7).is_some());
        assert!(doc.numbering_definition(8).is_none());
        assert_eq!(doc.numbering_instance(3).unwrap().definition_id, 7);
    }

    #[test]
    fn dangling_numbering_reference_is_tolerated() {
        let mut doc = Document::new();
        let mut section = Section::new();
        section.blocks.push(Block::Paragraph(
            Paragraph::from_text("listed").with_numbering(99, 0),
        ));
        doc.sections.push(section);

        let para = doc.paragraphs_flat()[0];
        let info: NumberingInfo = para.numbering.unwrap();
        assert!(doc.numbering_instance(info.instance_id).is_none());
    }
}
