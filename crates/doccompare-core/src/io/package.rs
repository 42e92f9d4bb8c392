//! OPC zip container handling.
//!
//! A package is an ordered map of part name to bytes. Ordering matters:
//! the same model must always serialize to the same archive, so parts
//! are kept in a `BTreeMap` and written in name order.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{CompareError, Result};

#[derive(Debug, Clone, Default)]
pub struct OoxmlPackage {
    parts: BTreeMap<String, Vec<u8>>,
}

impl OoxmlPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(bytes: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(bytes);
        let mut archive = ZipArchive::new(cursor)?;

        let mut parts = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut content = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut content)?;
            parts.insert(name, content);
        }

        Ok(Self { parts })
    }

    pub fn save(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = ZipWriter::new(&mut buffer);

        for (path, content) in &self.parts {
            // Fixed timestamp keeps identical models byte-identical.
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(zip::DateTime::default());
            writer.start_file(path.as_str(), options)?;
            writer.write_all(content)?;
        }

        writer.finish()?;
        Ok(buffer.into_inner())
    }

    pub fn part(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(|v| v.as_slice())
    }

    pub fn required_part(&self, path: &str) -> Result<&[u8]> {
        self.part(path).ok_or_else(|| CompareError::MissingPart {
            part_path: path.to_string(),
        })
    }

    pub fn set_part(&mut self, path: &str, content: Vec<u8>) {
        self.parts.insert(path.to_string(), content);
    }

    pub fn has_part(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    pub fn part_names(&self) -> impl Iterator<Item = &String> {
        self.parts.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_reopen_round_trips_parts() {
        let mut package = OoxmlPackage::new();
        package.set_part("word/document.xml", b"<doc/>".to_vec());
        package.set_part("[Content_Types].xml", b"<Types/>".to_vec());

        let bytes = package.save().unwrap();
        let reopened = OoxmlPackage::open(&bytes).unwrap();

        assert_eq!(reopened.part("word/document.xml"), Some(&b"<doc/>"[..]));
        assert!(reopened.has_part("[Content_Types].xml"));
    }

    #[test]
    fn part_names_are_ordered() {
        let mut package = OoxmlPackage::new();
        package.set_part("b.xml", vec![]);
        package.set_part("a.xml", vec![]);

        let names: Vec<&String> = package.part_names().collect();
        assert_eq!(names, vec!["a.xml", "b.xml"]);
    }

    #[test]
    fn missing_required_part_is_an_error() {
        let package = OoxmlPackage::new();
        let err = package.required_part("word/document.xml").unwrap_err();
        assert!(matches!(err, CompareError::MissingPart { .. }));
    }

    #[test]
    fn open_rejects_garbage() {
        assert!(OoxmlPackage::open(b"not a zip archive").is_err());
    }
}
