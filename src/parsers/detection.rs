//! Format and schema version detection.
//!
//! Detection looks only at the first byte to pick the wire format. It does
//! not skip whitespace or a byte order mark. For XML it then scans every
//! namespace declaration in document order and takes the first one that
//! names a registered schema. JSON documents carry their version in
//! `specVersion`, which the JSON parser reads.

use super::traits::ParseError;
use crate::schema::{SchemaVersion, WireFormat};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Result of format detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    /// Wire format selected by the leading byte.
    pub format: WireFormat,
    /// Schema version declared by the first registered XML namespace.
    /// Always `None` for JSON.
    pub version: Option<SchemaVersion>,
    /// Issues noticed during detection.
    pub warnings: Vec<String>,
}

impl DetectionResult {
    fn new(format: WireFormat) -> Self {
        Self {
            format,
            version: None,
            warnings: Vec::new(),
        }
    }
}

/// Format and version sniffer for BOM content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDetector;

impl FormatDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect format (and, for XML, schema version) of `content`.
    pub fn detect_bytes(&self, content: &[u8]) -> Result<DetectionResult, ParseError> {
        match content.first() {
            Some(b'{') => Ok(DetectionResult::new(WireFormat::Json)),
            Some(b'<') => self.detect_xml(content),
            Some(byte) => Err(ParseError::UnsupportedFormat(format!(
                "unexpected leading byte 0x{byte:02X}; expected '{{' or '<'"
            ))),
            None => Err(ParseError::UnsupportedFormat("empty input".to_string())),
        }
    }

    fn detect_xml(&self, content: &[u8]) -> Result<DetectionResult, ParseError> {
        let mut result = DetectionResult::new(WireFormat::Xml);
        let mut reader = Reader::from_reader(content);

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) => {
                    for version in declared_versions(&e)? {
                        match result.version {
                            None => result.version = Some(version),
                            Some(first) if first != version => {
                                let warning = format!(
                                    "document mixes CycloneDX namespaces {} and {}; using {}",
                                    first.as_str(),
                                    version.as_str(),
                                    first.as_str()
                                );
                                if !result.warnings.contains(&warning) {
                                    tracing::warn!("{warning}");
                                    result.warnings.push(warning);
                                }
                            }
                            Some(_) => {}
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if result.version.is_none() {
            let warning = "no registered CycloneDX namespace declared".to_string();
            tracing::warn!("{warning}");
            result.warnings.push(warning);
        }
        tracing::debug!(version = ?result.version, "detected XML document");
        Ok(result)
    }
}

/// Registered schema versions named by the `xmlns`/`xmlns:*` declarations
/// of one element, in attribute order.
fn declared_versions(element: &BytesStart<'_>) -> Result<Vec<SchemaVersion>, ParseError> {
    let mut versions = Vec::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            let value = attr.unescape_value()?;
            if let Some(version) = SchemaVersion::from_namespace(value.trim()) {
                versions.push(version);
            }
        }
    }
    Ok(versions)
}
