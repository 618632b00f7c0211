//! Parser trait definitions and error types.

use crate::model::Bom;
use crate::schema::WireFormat;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a BOM document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("XML parse error: {0}")]
    XmlError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid BOM structure: {0}")]
    InvalidStructure(String),

    #[error("Document nesting exceeds the limit of {max_depth} levels")]
    NestingTooDeep { max_depth: usize },
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlError(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlError(err.to_string())
    }
}

/// Trait for wire format readers.
///
/// Implementors read one serialization of the document into the model and
/// record the schema version they detected on the returned [`Bom`].
pub trait BomParser {
    /// Parse a BOM from raw bytes
    fn parse_bytes(&self, content: &[u8]) -> Result<Bom, ParseError>;

    /// Parse a BOM from string content
    fn parse_str(&self, content: &str) -> Result<Bom, ParseError> {
        self.parse_bytes(content.as_bytes())
    }

    /// Parse a BOM from a file path
    fn parse(&self, path: &Path) -> Result<Bom, ParseError> {
        let content = std::fs::read(path)?;
        self.parse_bytes(&content)
    }

    /// Wire format this parser reads
    fn format(&self) -> WireFormat;
}
