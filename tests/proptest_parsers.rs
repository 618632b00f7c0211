//! Property-based tests for BOM readers.
//!
//! Ensures readers don't panic on arbitrary input, including random strings,
//! JSON-like fragments, and XML-like fragments.

use bom_codec::parsers::{parse_bom_bytes_with, FormatDetector, ParseOptions};
use bom_codec::{parse_bom_bytes, parse_bom_str, SchemaVersion};
use proptest::prelude::*;

proptest! {
    // 500 cases balances coverage vs speed for parser fuzz tests.
    // Random input is expected to produce Err in almost all cases, so most
    // tests only assert that nothing panics.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_bom_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_bom_str(&s);
    }

    #[test]
    fn unknown_leading_byte_is_rejected(s in "[^{<]\\PC{0,200}") {
        prop_assert!(parse_bom_str(&s).is_err());
        prop_assert!(FormatDetector::new().detect_bytes(s.as_bytes()).is_err());
    }

    #[test]
    fn arbitrary_bytes_dont_panic(bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        let _ = parse_bom_bytes(&bytes);
        let _ = FormatDetector::new().detect_bytes(&bytes);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_bom_str(&s);
    }

    #[test]
    fn xml_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"<[a-z]{1,20}>[^<]{0,200}</[a-z]{1,20}>"#).unwrap()
    ) {
        let _ = parse_bom_str(&s);
    }

    #[test]
    fn cyclonedx_partial_json_doesnt_panic(
        version in "1\\.[0-9]",
        extra in "\\PC{0,200}",
    ) {
        let input = format!(r#"{{"bomFormat": "CycloneDX", "specVersion": "{version}", {extra}}}"#);
        let _ = parse_bom_str(&input);
    }

    #[test]
    fn cyclonedx_partial_xml_doesnt_panic(
        minor in 0u8..8,
        body in "\\PC{0,300}",
    ) {
        let input = format!(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.{minor}" version="1">{body}</bom>"#
        );
        let _ = parse_bom_str(&input);
        let _ = FormatDetector::new().detect_bytes(input.as_bytes());
    }

    #[test]
    fn detected_xml_version_matches_namespace(minor in 0u8..7) {
        let input = format!(r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.{minor}"/>"#);
        let detection = FormatDetector::new().detect_bytes(input.as_bytes()).unwrap();
        let expected = SchemaVersion::from_version_str(&format!("1.{minor}"));
        prop_assert_eq!(detection.version, expected);
    }

    #[test]
    fn deep_nesting_is_reported_not_overflowed(depth in 1usize..400) {
        let mut xml =
            String::from(r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4"><components>"#);
        for _ in 0..depth {
            xml.push_str(r#"<component type="library"><name>n</name><components>"#);
        }
        for _ in 0..depth {
            xml.push_str("</components></component>");
        }
        xml.push_str("</components></bom>");

        let options = ParseOptions {
            max_depth: 64,
            ..ParseOptions::default()
        };
        let result = parse_bom_bytes_with(xml.as_bytes(), &options);
        // the limit counts nested components, not elements
        prop_assert_eq!(result.is_ok(), depth <= 64);
    }
}
