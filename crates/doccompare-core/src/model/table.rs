use super::block::Block;
use super::paragraph::{Alignment, Paragraph};

/// How a table width value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthType {
    #[default]
    Auto,
    /// Twentieths of a point.
    Dxa,
    /// Fiftieths of a percent.
    Pct,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProperties {
    pub width: Option<i32>,
    pub width_type: WidthType,
    pub alignment: Option<Alignment>,
}

/// A table body. Cells hold arbitrary blocks, so tables nest. Alignment
/// treats the body as opaque: cell paragraphs join the flattened
/// sequence in row-major, cell-major, block order, but the aligner never
/// reorders across a table boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub properties: TableProperties,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub blocks: Vec<Block>,
}

impl Table {
    /// All paragraphs inside the table in row-major, cell-major, block
    /// order, descending into nested tables.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for row in &self.rows {
            for cell in &row.cells {
                for block in &cell.blocks {
                    match block {
                        Block::Paragraph(p) => out.push(p),
                        Block::Table(t) => out.extend(t.paragraphs()),
                    }
                }
            }
        }
        out
    }
}

impl TableCell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::Paragraph(Paragraph::from_text(text))],
        }
    }

    /// Guarantee the cell holds at least one paragraph; emitted cells
    /// must never be empty.
    pub fn ensure_paragraph(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::Paragraph(Paragraph::new()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_walk_row_major() {
        let table = Table {
            rows: vec![
                TableRow {
                    cells: vec![TableCell::from_text("a"), TableCell::from_text("b")],
                },
                TableRow {
                    cells: vec![TableCell::from_text("c")],
                },
            ],
            properties: TableProperties::default(),
        };

        let texts: Vec<String> = table.paragraphs().iter().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn paragraphs_descend_into_nested_tables() {
        let inner = Table {
            rows: vec![TableRow {
                cells: vec![TableCell::from_text("inner")],
            }],
            properties: TableProperties::default(),
        };
        let table = Table {
            rows: vec![TableRow {
                cells: vec![TableCell {
                    blocks: vec![
                        Block::Paragraph(Paragraph::from_text("outer")),
                        Block::Table(inner),
                    ],
                }],
            }],
            properties: TableProperties::default(),
        };

        let texts: Vec<String> = table.paragraphs().iter().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["outer", "inner"]);
    }

    #[test]
    fn ensure_paragraph_fills_empty_cell() {
        let mut cell = TableCell::default();
        cell.ensure_paragraph();
        assert_eq!(cell.blocks.len(), 1);
    }
}
