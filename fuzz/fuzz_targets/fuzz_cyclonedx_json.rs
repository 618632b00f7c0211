#![no_main]
use bom_codec::parsers::{BomParser, JsonParser};
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX JSON reader directly.
///
/// Prefixes input with a minimal CycloneDX JSON wrapper to increase
/// the likelihood of reaching the model mapping rather than failing
/// at the document header.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = JsonParser::new();

        // Try raw input first
        let _ = parser.parse_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"bomFormat":"CycloneDX","specVersion":"1.6","components":[{s}]}}"#,
            );
            let _ = parser.parse_str(&wrapped);
        }
    }
});
