use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("No parser accepts '{path}'")]
    UnsupportedInput { path: String },

    #[error("No generator produces '{format}' output")]
    UnsupportedOutput { format: String },

    #[error("Failed to parse '{path}': {message}")]
    ParseFailure { path: String, message: String },

    #[error("Missing required part '{part_path}' in package")]
    MissingPart { part_path: String },

    #[error("XML parsing error at {location}: {message}")]
    XmlParse { message: String, location: String },

    #[error("XML serialization error: {0}")]
    XmlWrite(String),

    #[error("Failed to write output: {0}")]
    WriteFailure(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        let err = CompareError::UnsupportedInput {
            path: "notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "No parser accepts 'notes.txt'");
    }

    #[test]
    fn error_missing_part_formats_correctly() {
        let err = CompareError::MissingPart {
            part_path: "word/document.xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required part 'word/document.xml' in package"
        );
    }
}
