//! Detect command handler.
//!
//! Reports the wire format and schema version of a document without
//! decoding it.

use crate::parsers::{DetectionResult, FormatDetector};
use crate::schema::SchemaVersion;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Run the detect command and print the report to stdout.
pub fn run_detect(input: &Path) -> Result<()> {
    let content = std::fs::read(input)
        .with_context(|| format!("Failed to read BOM file: {}", input.display()))?;
    let detection = detect_document(&content)
        .with_context(|| format!("Failed to detect format of {}", input.display()))?;
    print!("{}", format_detection(&detection));
    Ok(())
}

/// Detect format and version. JSON versions come from `specVersion`, which
/// needs the document to be decoded as far as its header.
pub fn detect_document(content: &[u8]) -> Result<DetectionResult> {
    let mut detection = FormatDetector::new().detect_bytes(content)?;
    if detection.version.is_none() && detection.format == crate::schema::WireFormat::Json {
        detection.version = json_spec_version(content);
        if detection.version.is_none() {
            detection
                .warnings
                .push("specVersion is missing or not a known CycloneDX version".to_string());
        }
    }
    Ok(detection)
}

fn json_spec_version(content: &[u8]) -> Option<SchemaVersion> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Header {
        spec_version: Option<String>,
    }

    let header: Header = serde_json::from_slice(content).ok()?;
    SchemaVersion::from_version_str(header.spec_version.as_deref()?)
}

/// Human-readable detection report.
#[must_use]
pub fn format_detection(detection: &DetectionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "format:  {}", detection.format);
    let _ = writeln!(
        out,
        "version: {}",
        detection.version.map_or("unknown", SchemaVersion::as_str)
    );
    for warning in &detection.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WireFormat;

    #[test]
    fn test_detect_xml() {
        let detection =
            detect_document(br#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4"/>"#).unwrap();
        insta::assert_snapshot!(format_detection(&detection), @r"
        format:  XML
        version: 1.4
        ");
    }

    #[test]
    fn test_detect_json_reads_spec_version() {
        let detection =
            detect_document(br#"{"bomFormat":"CycloneDX","specVersion":"1.5"}"#).unwrap();
        assert_eq!(detection.format, WireFormat::Json);
        assert_eq!(detection.version, Some(SchemaVersion::V1_5));
        assert!(detection.warnings.is_empty());
    }

    #[test]
    fn test_detect_json_without_version_warns() {
        let detection = detect_document(br#"{"bomFormat":"CycloneDX"}"#).unwrap();
        assert_eq!(detection.version, None);
        assert_eq!(detection.warnings.len(), 1);
    }

    #[test]
    fn test_detect_unknown_leading_byte() {
        assert!(detect_document(b" {}").is_err());
    }
}
