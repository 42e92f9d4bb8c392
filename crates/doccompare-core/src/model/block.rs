use super::paragraph::Paragraph;
use super::table::Table;

/// Top-level content inside a section: a paragraph or a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => {
                let parts: Vec<String> = t.paragraphs().iter().map(|p| p.plain_text()).collect();
                parts.join("\n")
            }
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TableCell, TableRow};

    #[test]
    fn plain_text_matches_variant() {
        let para = Block::Paragraph(Paragraph::from_text("hello"));
        assert_eq!(para.plain_text(), "hello");

        let table = Block::Table(Table {
            rows: vec![TableRow {
                cells: vec![TableCell::from_text("x"), TableCell::from_text("y")],
            }],
            properties: Default::default(),
        });
        assert_eq!(table.plain_text(), "x\ny");
    }
}
