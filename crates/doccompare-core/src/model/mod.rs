//! In-memory document model.
//!
//! The model is rich enough to round-trip the subset of OOXML the
//! comparison engine cares about: sections, paragraphs, runs, tables,
//! styles, and numbering definitions/instances. Everything is plain owned
//! data; `Clone` produces a fully independent deep copy, and
//! paragraph-to-numbering linkage is by id, never by reference.

mod block;
mod document;
mod numbering;
mod paragraph;
mod run;
mod section;
mod styles;
mod table;

pub use block::Block;
pub use document::{Document, DocumentProperties};
pub use numbering::{
    NumberFormat, NumberingDefinition, NumberingInfo, NumberingInstance, NumberingLevel,
    NumberingLevelOverride,
};
pub use paragraph::{Alignment, LineRule, Paragraph, ParagraphStyle};
pub use run::{Run, RunFormatting, DELETION_COLOR, INSERTION_COLOR, MOVE_COLOR};
pub use section::{
    BreakType, HeaderFooter, HeaderFooterSet, Orientation, Section, SectionProperties,
};
pub use styles::{StyleDefinition, StyleType};
pub use table::{Table, TableCell, TableProperties, TableRow, WidthType};

/// Twentieths of a point, 1/1440 inch. The native length unit of
/// word-processing layout.
pub type Twips = i32;
