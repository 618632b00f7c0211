//! Convert command handler.
//!
//! Reads a BOM in either format and writes it for the configured target.

use crate::config::{CodecConfig, Validatable};
use crate::pipeline::{
    exit_codes, parse_bom_with_context, render_document, write_output, OutputTarget,
    PipelineError, RenderTarget,
};
use anyhow::Result;
use std::path::Path;

/// Run the convert command, returning the process exit code.
pub fn run_convert(input: &Path, config: &CodecConfig) -> Result<i32> {
    config.ensure_valid()?;

    let quiet = config.behavior.quiet;
    let parsed = parse_bom_with_context(input, &config.parse_options(), quiet).map_err(|source| {
        PipelineError::ParseFailed {
            path: input.display().to_string(),
            source,
        }
    })?;
    for warning in &parsed.detection.warnings {
        tracing::warn!("{}: {warning}", input.display());
    }

    let target = RenderTarget::resolve(&parsed, &config.output);
    if !quiet {
        tracing::info!(
            "Converting {} {} to {} {}",
            parsed.format(),
            parsed
                .version()
                .map_or_else(|| "(unversioned)".to_string(), |v| v.to_string()),
            target.format,
            target.version
        );
    }

    let mut ctx = config.render_context(target.version);
    let rendered = match render_document(parsed.bom(), target, &mut ctx) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::error!("{e}");
            return Ok(e.exit_code());
        }
    };

    if config.behavior.fail_on_drop && rendered.dropped > 0 {
        let e = PipelineError::ValuesDropped {
            count: rendered.dropped,
            version: target.version.to_string(),
        };
        tracing::error!("{e}");
        return Ok(e.exit_code());
    }

    write_output(
        &rendered.content,
        &OutputTarget::from_option(config.output.file.clone()),
        quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaVersion, WireFormat};
    use tempfile::TempDir;

    const BOM_1_0: &str = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.0" version="1"><components><component type="library"><name>acme</name></component></components></bom>"#;

    fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_convert_xml_to_json_file() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "bom.xml", BOM_1_0);
        let output = tmp.path().join("bom.json");
        let config = CodecConfig::builder()
            .output_format(WireFormat::Json)
            .output_version(SchemaVersion::V1_2)
            .output_file(Some(output.clone()))
            .quiet(true)
            .build();

        assert_eq!(run_convert(&input, &config).unwrap(), exit_codes::SUCCESS);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            r#"{"bomFormat":"CycloneDX","specVersion":"1.2","components":[{"type":"library","name":"acme"}]}"#
        );
    }

    #[test]
    fn test_json_for_old_input_version_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "bom.xml", BOM_1_0);
        let config = CodecConfig::builder()
            .output_format(WireFormat::Json)
            .output_file(Some(tmp.path().join("out.json")))
            .quiet(true)
            .build();

        assert_eq!(run_convert(&input, &config).unwrap(), exit_codes::UNSUPPORTED);
        assert!(!tmp.path().join("out.json").exists());
    }

    #[test]
    fn test_fail_on_drop() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(
            &tmp,
            "bom.json",
            r#"{"bomFormat":"CycloneDX","specVersion":"1.6","components":[{"type":"cryptographic-asset","name":"aes"}]}"#,
        );
        let mut config = CodecConfig::builder()
            .output_version(SchemaVersion::V1_5)
            .output_file(Some(tmp.path().join("out.json")))
            .quiet(true)
            .build();
        config.behavior.fail_on_drop = true;

        assert_eq!(
            run_convert(&input, &config).unwrap(),
            exit_codes::VALUES_DROPPED
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "bom.xml", BOM_1_0);
        let config = CodecConfig::builder().max_depth(0).build();
        let err = run_convert(&input, &config).unwrap_err();
        assert!(err.to_string().contains("parsing.max_depth"));
    }
}
