//! File-to-file compare façade.
//!
//! The only layer that touches I/O or reports errors. Everything the
//! parsers, the comparer, or the generator can fail with is absorbed
//! into `CompareResult { success: false, error_message }`; statistics
//! are always populated, even when zeroed by a failure.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::comparer::DocumentComparer;
use crate::error::{CompareError, Result};
use crate::io::{DocumentGenerator, DocumentParser, DocxGenerator, DocxParser};
use crate::model::Document;
use crate::settings::CompareOptions;
use crate::stats::CompareStatistics;

/// Where a compare input comes from. Byte inputs carry the original
/// filename so format detection and error messages stay meaningful.
#[derive(Debug, Clone)]
pub enum CompareInput {
    Path(PathBuf),
    Bytes {
        data: Vec<u8>,
        filename_hint: String,
    },
}

impl CompareInput {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(data: Vec<u8>, filename_hint: impl Into<String>) -> Self {
        Self::Bytes {
            data,
            filename_hint: filename_hint.into(),
        }
    }

    fn display_name(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes { filename_hint, .. } => filename_hint.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Word,
    Pdf,
    Html,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "word" | "docx" => Some(Self::Word),
            "pdf" => Some(Self::Pdf),
            "html" => Some(Self::Html),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub original: CompareInput,
    pub modified: CompareInput,
    pub output_format: OutputFormat,
    pub output_path: Option<PathBuf>,
    pub options: CompareOptions,
}

impl CompareRequest {
    pub fn new(original: impl Into<PathBuf>, modified: impl Into<PathBuf>) -> Self {
        Self {
            original: CompareInput::path(original),
            modified: CompareInput::path(modified),
            output_format: OutputFormat::Word,
            output_path: None,
            options: CompareOptions::default(),
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CompareResult {
    pub output_path: Option<PathBuf>,
    pub redlined_document: Option<Document>,
    pub statistics: CompareStatistics,
    pub success: bool,
    pub error_message: Option<String>,
}

impl CompareResult {
    fn failure(error: CompareError) -> Self {
        Self {
            output_path: None,
            redlined_document: None,
            statistics: CompareStatistics::default(),
            success: false,
            error_message: Some(error.to_string()),
        }
    }
}

fn parser_for(input: &CompareInput) -> Result<&'static dyn DocumentParser> {
    static DOCX: DocxParser = DocxParser;

    let accepted = match input {
        CompareInput::Path(path) => DOCX.can_parse(path),
        CompareInput::Bytes { filename_hint, .. } => DOCX.can_parse(Path::new(filename_hint)),
    };

    if accepted {
        Ok(&DOCX)
    } else {
        Err(CompareError::UnsupportedInput {
            path: input.display_name(),
        })
    }
}

fn generator_for(format: OutputFormat) -> Result<&'static dyn DocumentGenerator> {
    static DOCX: DocxGenerator = DocxGenerator;

    match format {
        OutputFormat::Word => Ok(&DOCX),
        OutputFormat::Pdf | OutputFormat::Html => Err(CompareError::UnsupportedOutput {
            format: format.as_str().to_string(),
        }),
    }
}

fn load_document(input: &CompareInput) -> Result<Document> {
    let parser = parser_for(input)?;
    match input {
        CompareInput::Path(path) => parser.parse_path(path),
        CompareInput::Bytes {
            data,
            filename_hint,
        } => parser.parse_stream(&mut Cursor::new(data), filename_hint),
    }
}

fn run_compare(request: &CompareRequest) -> Result<CompareResult> {
    let original = load_document(&request.original)?;
    let modified = load_document(&request.modified)?;

    let outcome = DocumentComparer::compare(&original, &modified, &request.options);

    let output_path = match &request.output_path {
        Some(path) => {
            let generator = generator_for(request.output_format)?;
            generator.generate_path(&outcome.document, path)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(CompareResult {
        output_path,
        redlined_document: Some(outcome.document),
        statistics: outcome.statistics,
        success: true,
        error_message: None,
    })
}

/// Compare two documents end to end. Never panics and never returns
/// `Err`; failures come back as `success == false`.
pub fn compare_files(request: &CompareRequest) -> CompareResult {
    match run_compare(request) {
        Ok(result) => result,
        Err(error) => CompareResult::failure(error),
    }
}
