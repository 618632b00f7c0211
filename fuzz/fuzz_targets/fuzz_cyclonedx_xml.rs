#![no_main]
use bom_codec::parsers::{BomParser, XmlParser};
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX XML reader.
///
/// Wraps input in a CycloneDX XML envelope, once in the current namespace
/// and once in the 1.1 namespace, to reach the mapping and the namespace
/// normalization paths.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = XmlParser::new();

        // Try raw input
        let _ = parser.parse_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            for namespace in [
                "http://cyclonedx.org/schema/bom/1.6",
                "http://cyclonedx.org/schema/bom/1.1",
            ] {
                let wrapped = format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="{namespace}" xmlns:dg="http://cyclonedx.org/schema/ext/dependency-graph/1.0" version="1">
  <components>{s}</components>
</bom>"#,
                );
                let _ = parser.parse_str(&wrapped);
            }
        }
    }
});
