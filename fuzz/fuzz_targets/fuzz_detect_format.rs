#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz format and version detection.
///
/// Exercises the leading-byte check and the namespace scan without
/// building a model.
fuzz_target!(|data: &[u8]| {
    let _ = bom_codec::parsers::FormatDetector::new().detect_bytes(data);
});
