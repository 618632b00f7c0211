//! CycloneDX document readers.
//!
//! Both dialects are read into the same [`Bom`](crate::model::Bom) model.
//! The wire format is chosen from the first byte of the input; the schema
//! version comes from the XML namespace or the JSON `specVersion`.
//!
//! ## Usage
//!
//! ```no_run
//! use bom_codec::parsers::{parse_bom, FormatDetector};
//! use std::path::Path;
//!
//! let bom = parse_bom(Path::new("bom.xml")).unwrap();
//! println!("read schema {:?}", bom.version());
//!
//! let content = std::fs::read("bom.json").unwrap();
//! let detection = FormatDetector::new().detect_bytes(&content).unwrap();
//! println!("format: {}", detection.format);
//! ```

mod detection;
mod json;
mod namespace;
mod traits;
mod tree;
mod xml;

pub use detection::{DetectionResult, FormatDetector};
pub use json::JsonParser;
pub use namespace::{
    NamespaceNormalizer, NamespacePolicy, XmlAttribute, XmlDeclaration, XmlElement, XmlToken,
};
pub use traits::{BomParser, ParseError};
pub use tree::XmlNode;
pub use xml::XmlParser;

use crate::model::Bom;
use crate::schema::WireFormat;
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;

/// Default bound on component, service and dependency nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Maximum BOM file size read from disk (512 MB).
const MAX_BOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Reader settings shared by both dialects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest component, service or dependency nesting accepted
    pub max_depth: usize,
    /// XML namespaces rewritten to the latest version before mapping
    pub namespace_policy: NamespacePolicy,
    /// Reject JSON documents without `bomFormat`
    pub require_bom_format: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            namespace_policy: NamespacePolicy::default(),
            require_bom_format: false,
        }
    }
}

/// Parser for `format`.
#[must_use]
pub fn create_parser(format: WireFormat, options: ParseOptions) -> Box<dyn BomParser> {
    match format {
        WireFormat::Xml => Box::new(XmlParser::with_options(options)),
        WireFormat::Json => Box::new(JsonParser::with_options(options)),
    }
}

/// Detect the format of `content` and parse it with `options`.
pub fn parse_bom_bytes_with(content: &[u8], options: &ParseOptions) -> Result<Bom, ParseError> {
    let detection = FormatDetector::new().detect_bytes(content)?;
    tracing::debug!(format = %detection.format, "selected parser");
    create_parser(detection.format, options.clone()).parse_bytes(content)
}

/// Detect the format of `content` and parse it with default options.
pub fn parse_bom_bytes(content: &[u8]) -> Result<Bom, ParseError> {
    parse_bom_bytes_with(content, &ParseOptions::default())
}

/// Parse a BOM held in a string.
pub fn parse_bom_str(content: &str) -> Result<Bom, ParseError> {
    parse_bom_bytes(content.as_bytes())
}

/// Read all of `reader` and parse it.
pub fn parse_bom_reader<R: Read>(mut reader: R) -> Result<Bom, ParseError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    parse_bom_bytes(&content)
}

/// Parse a BOM file.
///
/// Files larger than 512 MB are rejected before reading.
pub fn parse_bom(path: &Path) -> Result<Bom, ParseError> {
    parse_bom_with(path, &ParseOptions::default())
}

/// Parse a BOM file with explicit options.
pub fn parse_bom_with(path: &Path, options: &ParseOptions) -> Result<Bom, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_BOM_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "BOM file is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_BOM_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read(path)?;
    parse_bom_bytes_with(&content, options)
}

/// Document revision; absent or unusable values fall back to 1.
pub(crate) fn parse_revision(value: Option<&str>) -> u32 {
    let Some(raw) = value else { return 1 };
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            tracing::warn!(value = raw, "invalid BOM version attribute, using 1");
            1
        }
    }
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// RFC 3339 timestamp in UTC. Unparsable values are dropped with a warning.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(value, error = %e, "dropping unparsable timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;
    use std::io::Write;

    #[test]
    fn test_parse_dispatches_on_leading_byte() {
        let xml = parse_bom_str(r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.3"/>"#).unwrap();
        assert_eq!(xml.version(), Some(SchemaVersion::V1_3));
        let json = parse_bom_str(r#"{"bomFormat":"CycloneDX","specVersion":"1.3"}"#).unwrap();
        assert_eq!(json.version(), Some(SchemaVersion::V1_3));
        assert!(matches!(
            parse_bom_str("\n<bom/>"),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_from_file_and_reader() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"bomFormat":"CycloneDX","specVersion":"1.4","version":3}"#)
            .unwrap();
        let bom = parse_bom(file.path()).unwrap();
        assert_eq!(bom.revision, 3);

        let bom = parse_bom_reader(&b"<bom xmlns=\"http://cyclonedx.org/schema/bom/1.5\"/>"[..])
            .unwrap();
        assert_eq!(bom.version(), Some(SchemaVersion::V1_5));
    }

    #[test]
    fn test_revision_and_flags() {
        assert_eq!(parse_revision(None), 1);
        assert_eq!(parse_revision(Some(" 4 ")), 4);
        assert_eq!(parse_revision(Some("0")), 1);
        assert_eq!(parse_revision(Some("x")), 1);
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_timestamps() {
        let ts = parse_timestamp("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T08:00:00+00:00");
        assert!(parse_timestamp("yesterday").is_none());
    }
}
