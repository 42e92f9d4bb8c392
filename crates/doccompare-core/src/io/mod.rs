//! Reading and writing collaborators.
//!
//! The compare core only ever sees the in-memory model; these traits
//! are the seam where concrete formats plug in. `DocxParser` and
//! `DocxGenerator` are the built-in pair for OOXML word-processing
//! packages.

mod docx_reader;
mod docx_writer;
mod package;

pub use docx_reader::DocxParser;
pub use docx_writer::DocxGenerator;
pub use package::OoxmlPackage;

use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::Document;

/// Materializes a document model from a file format.
pub trait DocumentParser {
    /// Lowercase extensions this parser accepts, without dots.
    fn supported_extensions(&self) -> &[&str];

    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.supported_extensions().iter().any(|s| *s == e)
            })
            .unwrap_or(false)
    }

    fn parse_path(&self, path: &Path) -> Result<Document>;

    /// Parse from a stream; `filename_hint` carries the original name
    /// for error reporting and format checks.
    fn parse_stream(&self, reader: &mut dyn Read, filename_hint: &str) -> Result<Document>;
}

/// Serializes a document model into a file format.
pub trait DocumentGenerator: std::fmt::Debug {
    /// The format name this generator produces, e.g. `"docx"`.
    fn output_format(&self) -> &str;

    fn generate_path(&self, document: &Document, path: &Path) -> Result<()>;

    fn generate_stream(&self, document: &Document, writer: &mut dyn Write) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_checks_extension_case_insensitively() {
        let parser = DocxParser;
        assert!(parser.can_parse(Path::new("contract.docx")));
        assert!(parser.can_parse(Path::new("CONTRACT.DOCX")));
        assert!(!parser.can_parse(Path::new("contract.pdf")));
        assert!(!parser.can_parse(Path::new("contract")));
    }

    #[test]
    fn generator_reports_format() {
        assert_eq!(DocxGenerator.output_format(), "docx");
    }
}
