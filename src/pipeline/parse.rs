//! BOM reading stage.

use crate::model::Bom;
use crate::parsers::{create_parser, DetectionResult, FormatDetector, ParseOptions};
use crate::schema::{SchemaVersion, WireFormat};
use anyhow::{Context, Result};
use std::path::Path;

/// A parsed BOM together with what detection found about its source
#[derive(Debug)]
pub struct ParsedBom {
    /// The decoded model
    pub bom: Bom,
    /// Format, version and warnings from detection
    pub detection: DetectionResult,
    /// Size of the source document in bytes
    pub source_len: usize,
}

impl ParsedBom {
    #[must_use]
    pub const fn bom(&self) -> &Bom {
        &self.bom
    }

    /// Wire format of the source document
    #[must_use]
    pub const fn format(&self) -> WireFormat {
        self.detection.format
    }

    /// Schema version of the source document, when it was recognised
    #[must_use]
    pub fn version(&self) -> Option<SchemaVersion> {
        self.bom.version()
    }

    #[must_use]
    pub fn into_bom(self) -> Bom {
        self.bom
    }
}

/// Read and decode a BOM file with context for error messages
pub fn parse_bom_with_context(
    path: &Path,
    options: &ParseOptions,
    quiet: bool,
) -> Result<ParsedBom> {
    if !quiet {
        tracing::info!("Parsing BOM: {:?}", path);
    }

    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read BOM file: {}", path.display()))?;
    parse_bom_content(&content, options, quiet)
        .with_context(|| format!("Failed to parse BOM: {}", path.display()))
}

/// Decode a BOM already held in memory
pub fn parse_bom_content(content: &[u8], options: &ParseOptions, quiet: bool) -> Result<ParsedBom> {
    let detection = FormatDetector::new().detect_bytes(content)?;
    let bom = create_parser(detection.format, options.clone()).parse_bytes(content)?;

    if !quiet {
        tracing::info!(
            format = %detection.format,
            version = bom.version().map_or("unknown", SchemaVersion::as_str),
            "Parsed {} components",
            bom.all_components().count()
        );
    }

    Ok(ParsedBom {
        bom,
        detection,
        source_len: content.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_content() {
        let parsed = parse_bom_content(
            br#"<bom xmlns="http://cyclonedx.org/schema/bom/1.1" version="2"/>"#,
            &ParseOptions::default(),
            true,
        )
        .unwrap();
        assert_eq!(parsed.format(), WireFormat::Xml);
        assert_eq!(parsed.version(), Some(SchemaVersion::V1_1));
        assert_eq!(parsed.bom().revision, 2);
        assert!(parsed.detection.warnings.is_empty());
    }

    #[test]
    fn test_parse_file_error_mentions_path() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "garbage").unwrap();
        let err = parse_bom_with_context(file.path(), &ParseOptions::default(), true).unwrap_err();
        assert!(err.to_string().contains("Failed to parse BOM"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_bom_with_context(
            Path::new("/nonexistent/bom.json"),
            &ParseOptions::default(),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read BOM file"));
    }
}
