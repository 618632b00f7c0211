//! JSON generator.

use super::projection::{project, DependencyLayout};
use super::{BomGenerator, RenderContext, RenderError};
use crate::model::Bom;
use crate::schema::{SchemaVersion, WireFormat};

/// Writes CycloneDX JSON for schema 1.2 and later.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGenerator;

impl JsonGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BomGenerator for JsonGenerator {
    fn generate(&self, bom: &Bom, ctx: &mut RenderContext) -> Result<String, RenderError> {
        let target = ctx.target();
        if !self.supports(target) {
            return Err(RenderError::UnsupportedCombination {
                format: WireFormat::Json,
                version: target,
            });
        }

        let mut projected = project(bom, ctx, DependencyLayout::Flat)?;
        // The JSON revision defaults to 1 and is left out when it is the default.
        if projected.version == Some(1) {
            projected.version = None;
        }

        let json = if ctx.is_pretty() {
            serde_json::to_string_pretty(&projected)
        } else {
            serde_json::to_string(&projected)
        };
        json.map_err(|e| RenderError::Json(e.to_string()))
    }

    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn supports(&self, version: SchemaVersion) -> bool {
        version.has_json_format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, ComponentType, Hash, HashAlgorithm};

    fn render(bom: &Bom, target: SchemaVersion) -> Result<String, RenderError> {
        JsonGenerator::new().generate(bom, &mut RenderContext::new(target))
    }

    #[test]
    fn test_rejects_versions_without_json() {
        for version in [SchemaVersion::V1_0, SchemaVersion::V1_1] {
            assert!(matches!(
                render(&Bom::new(), version),
                Err(RenderError::UnsupportedCombination {
                    format: WireFormat::Json,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_compact_component_with_hash() {
        let mut component = Component::new(ComponentType::Library, "acme").with_version("1.0");
        component
            .hashes
            .push(Hash::new(HashAlgorithm::Sha256, "abc"));
        let mut bom = Bom::new();
        bom.components.push(component);

        insta::assert_snapshot!(render(&bom, SchemaVersion::V1_2).unwrap(), @r#"{"bomFormat":"CycloneDX","specVersion":"1.2","components":[{"type":"library","name":"acme","version":"1.0","hashes":[{"alg":"SHA-256","content":"abc"}]}]}"#);
    }

    #[test]
    fn test_revision_written_when_not_default() {
        let mut bom = Bom::new();
        bom.revision = 2;
        let json = render(&bom, SchemaVersion::V1_5).unwrap();
        assert!(json.contains(r#""version":2"#));
    }

    #[test]
    fn test_pretty_output() {
        let json = JsonGenerator::new()
            .generate(
                &Bom::new(),
                &mut RenderContext::new(SchemaVersion::V1_6).pretty(true),
            )
            .unwrap();
        assert!(json.starts_with("{\n  \"bomFormat\": \"CycloneDX\""));
    }
}
