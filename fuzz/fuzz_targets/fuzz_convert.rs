#![no_main]
use bom_codec::{convert, CodecError, RenderError, SchemaVersion, WireFormat};
use libfuzzer_sys::fuzz_target;

fn unsupported(result: &Result<String, CodecError>) -> bool {
    matches!(
        result,
        Err(CodecError::Render {
            source: RenderError::UnsupportedCombination { .. },
            ..
        })
    )
}

/// Fuzz the full read and write path.
///
/// Any input that parses must render in every version without panicking.
/// Only JSON below 1.2 may be refused as an unsupported combination.
fuzz_target!(|data: &[u8]| {
    if bom_codec::parse_bom_bytes(data).is_err() {
        return;
    }
    for &version in SchemaVersion::all() {
        let xml = convert(data, WireFormat::Xml, Some(version));
        assert!(!unsupported(&xml), "XML {version}");
        let json = convert(data, WireFormat::Json, Some(version));
        assert_eq!(unsupported(&json), !version.has_json_format(), "JSON {version}");
    }
});
