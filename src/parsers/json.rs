//! CycloneDX JSON reader.
//!
//! Documents are deserialized into the [`wire`](crate::wire) structs and
//! converted to the model. The schema version comes from `specVersion`;
//! an unknown value leaves the version unset. Nested components and
//! services deeper than the configured limit are rejected.

use super::traits::{BomParser, ParseError};
use super::{parse_timestamp, ParseOptions};
use crate::model::{
    AttachedText, Authorship, Bom, Component, ComponentScope, ComponentType, Dependency,
    ExternalReference, ExternalReferenceType, Hash, HashAlgorithm, License,
    LicenseAcknowledgement, LicenseChoice, LicenseExpression, LicenseIdentity, Lifecycle,
    LifecyclePhase, Metadata, OrganizationalContact, OrganizationalEntity, Pedigree, Property,
    Service, Tool, Tools,
};
use crate::schema::{SchemaVersion, WireFormat};
use crate::wire::{
    CdxBom, CdxComponent, CdxContact, CdxDependency, CdxEntity, CdxExternalReference, CdxHash,
    CdxLicenseChoice, CdxLifecycle, CdxMetadata, CdxProperty, CdxService, CdxTool, CdxTools,
    BOM_FORMAT,
};

/// Parser for the JSON dialect (1.2 and later).
#[derive(Debug, Clone, Default)]
pub struct JsonParser {
    options: ParseOptions,
}

impl JsonParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    fn check_header(&self, cdx: &CdxBom) -> Result<Option<SchemaVersion>, ParseError> {
        match cdx.bom_format.as_deref() {
            Some(BOM_FORMAT) => {}
            Some(other) => {
                return Err(ParseError::InvalidStructure(format!(
                    "bomFormat is '{other}', expected '{BOM_FORMAT}'"
                )))
            }
            None if self.options.require_bom_format => {
                return Err(ParseError::InvalidStructure(
                    "missing bomFormat".to_string(),
                ))
            }
            None => tracing::warn!("JSON document has no bomFormat; assuming CycloneDX"),
        }

        let version = cdx
            .spec_version
            .as_deref()
            .and_then(SchemaVersion::from_version_str);
        if version.is_none() {
            tracing::warn!(
                spec_version = ?cdx.spec_version,
                "unknown or missing specVersion; schema version left unset"
            );
        }
        Ok(version)
    }
}

impl BomParser for JsonParser {
    fn parse_bytes(&self, content: &[u8]) -> Result<Bom, ParseError> {
        if content.first() != Some(&b'{') {
            return Err(ParseError::UnsupportedFormat(
                "JSON document must start with '{'".to_string(),
            ));
        }
        let cdx: CdxBom = serde_json::from_slice(content)?;
        let version = self.check_header(&cdx)?;

        let mapper = Mapper {
            max_depth: self.options.max_depth,
        };
        let mut bom = mapper.bom(cdx)?;
        bom.set_version(version);
        tracing::debug!(
            version = ?version,
            components = bom.components.len(),
            "parsed JSON BOM"
        );
        Ok(bom)
    }

    fn format(&self) -> WireFormat {
        WireFormat::Json
    }
}

/// Wire-to-model conversion with a nesting bound.
struct Mapper {
    max_depth: usize,
}

impl Mapper {
    fn enter(&self, depth: usize) -> Result<usize, ParseError> {
        let next = depth + 1;
        if next > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }
        Ok(next)
    }

    fn bom(&self, cdx: CdxBom) -> Result<Bom, ParseError> {
        let mut bom = Bom::new();
        bom.serial_number = cdx.serial_number.filter(|s| !s.trim().is_empty());
        bom.revision = match cdx.version {
            Some(0) => {
                tracing::warn!("invalid BOM version 0, using 1");
                1
            }
            Some(n) => n,
            None => 1,
        };
        bom.metadata = cdx.metadata.map(|m| self.metadata(m)).transpose()?;
        bom.components = self.components(cdx.components, 0)?;
        bom.services = self.services(cdx.services, 0)?;
        bom.external_references = external_references(cdx.external_references);
        bom.dependencies = dependencies(cdx.dependencies);
        bom.properties = properties(cdx.properties);
        Ok(bom)
    }

    fn metadata(&self, cdx: CdxMetadata) -> Result<Metadata, ParseError> {
        let tools = match cdx.tools {
            None => Tools::default(),
            Some(CdxTools::Legacy(list)) => Tools {
                legacy: list.into_iter().map(tool).collect(),
                ..Tools::default()
            },
            Some(CdxTools::Structured(object)) => Tools {
                legacy: Vec::new(),
                components: self.components(object.components, 1)?,
                services: self.services(object.services, 1)?,
            },
        };
        Ok(Metadata {
            timestamp: cdx.timestamp.as_deref().and_then(parse_timestamp),
            lifecycles: cdx.lifecycles.into_iter().filter_map(lifecycle).collect(),
            tools,
            authors: cdx.authors.into_iter().map(contact).collect(),
            component: cdx
                .component
                .map(|c| self.component(*c, 0))
                .transpose()?,
            manufacture: cdx.manufacture.map(entity),
            manufacturer: cdx.manufacturer.map(entity),
            supplier: cdx.supplier.map(entity),
            licenses: licenses(cdx.licenses),
            properties: properties(cdx.properties),
        })
    }

    fn components(
        &self,
        list: Vec<CdxComponent>,
        depth: usize,
    ) -> Result<Vec<Component>, ParseError> {
        list.into_iter().map(|c| self.component(c, depth)).collect()
    }

    fn component(&self, cdx: CdxComponent, depth: usize) -> Result<Component, ParseError> {
        let inner = self.enter(depth)?;
        let mut authorship = Authorship::default();
        authorship.set_legacy(cdx.author);
        authorship.set_contacts(cdx.authors.into_iter().map(contact).collect());

        let pedigree = match cdx.pedigree {
            Some(p) => Some(Pedigree {
                ancestors: self.components(p.ancestors, inner)?,
                descendants: self.components(p.descendants, inner)?,
                variants: self.components(p.variants, inner)?,
                notes: p.notes,
            }),
            None => None,
        };

        Ok(Component {
            component_type: cdx
                .component_type
                .as_deref()
                .map(ComponentType::from_wire)
                .unwrap_or_default(),
            mime_type: cdx.mime_type,
            bom_ref: cdx.bom_ref,
            supplier: cdx.supplier.map(entity),
            manufacturer: cdx.manufacturer.map(entity),
            authorship,
            publisher: cdx.publisher,
            group: cdx.group,
            name: cdx.name,
            version: cdx.version,
            description: cdx.description,
            scope: cdx.scope.as_deref().and_then(ComponentScope::from_wire),
            hashes: hashes(cdx.hashes),
            licenses: licenses(cdx.licenses),
            copyright: cdx.copyright,
            cpe: cdx.cpe,
            purl: cdx.purl,
            omnibor_ids: cdx.omnibor_id,
            swhids: cdx.swhid,
            modified: cdx.modified,
            pedigree,
            external_references: external_references(cdx.external_references),
            properties: properties(cdx.properties),
            components: self.components(cdx.components, inner)?,
            tags: cdx.tags,
        })
    }

    fn services(&self, list: Vec<CdxService>, depth: usize) -> Result<Vec<Service>, ParseError> {
        list.into_iter().map(|s| self.service(s, depth)).collect()
    }

    fn service(&self, cdx: CdxService, depth: usize) -> Result<Service, ParseError> {
        let inner = self.enter(depth)?;
        Ok(Service {
            bom_ref: cdx.bom_ref,
            provider: cdx.provider.map(entity),
            group: cdx.group,
            name: cdx.name,
            version: cdx.version,
            description: cdx.description,
            endpoints: cdx.endpoints,
            authenticated: cdx.authenticated,
            x_trust_boundary: cdx.x_trust_boundary,
            trust_zone: cdx.trust_zone,
            licenses: licenses(cdx.licenses),
            external_references: external_references(cdx.external_references),
            properties: properties(cdx.properties),
            services: self.services(cdx.services, inner)?,
            tags: cdx.tags,
        })
    }
}

fn lifecycle(cdx: CdxLifecycle) -> Option<Lifecycle> {
    if let Some(phase) = cdx.phase {
        return match LifecyclePhase::from_wire(&phase) {
            Some(phase) => Some(Lifecycle::Phase(phase)),
            None => {
                tracing::warn!(phase = %phase, "ignoring unknown lifecycle phase");
                None
            }
        };
    }
    cdx.name.map(|name| Lifecycle::Custom {
        name,
        description: cdx.description,
    })
}

fn tool(cdx: CdxTool) -> Tool {
    Tool {
        vendor: cdx.vendor,
        name: cdx.name,
        version: cdx.version,
        hashes: hashes(cdx.hashes),
        external_references: external_references(cdx.external_references),
    }
}

fn entity(cdx: CdxEntity) -> OrganizationalEntity {
    OrganizationalEntity {
        bom_ref: cdx.bom_ref,
        name: cdx.name,
        urls: cdx.url,
        contacts: cdx.contact.into_iter().map(contact).collect(),
    }
}

fn contact(cdx: CdxContact) -> OrganizationalContact {
    OrganizationalContact {
        bom_ref: cdx.bom_ref,
        name: cdx.name,
        email: cdx.email,
        phone: cdx.phone,
    }
}

fn hashes(list: Vec<CdxHash>) -> Vec<Hash> {
    list.into_iter()
        .filter(|h| !h.content.trim().is_empty())
        .map(|h| Hash::new(HashAlgorithm::from_wire(&h.alg), h.content))
        .collect()
}

/// Entries holding a `license` form the list; the first `expression`
/// entry is kept as the alternative. The list wins when both occur.
fn licenses(list: Vec<CdxLicenseChoice>) -> Option<LicenseChoice> {
    let mut licenses = Vec::new();
    let mut expression = None;
    for choice in list {
        if let Some(license) = choice.license {
            let identity = match (license.id, license.name) {
                (Some(id), _) => LicenseIdentity::Id(id),
                (None, Some(name)) => LicenseIdentity::Name(name),
                (None, None) => {
                    tracing::debug!("skipping license without id or name");
                    continue;
                }
            };
            licenses.push(License {
                identity,
                text: license.text.map(|t| AttachedText {
                    content_type: t.content_type,
                    encoding: t.encoding,
                    content: t.content,
                }),
                url: license.url,
                bom_ref: license.bom_ref,
                acknowledgement: license
                    .acknowledgement
                    .as_deref()
                    .and_then(LicenseAcknowledgement::from_wire),
                properties: properties(license.properties),
            });
        } else if let Some(expr) = choice.expression {
            if expression.is_none() {
                expression = Some(LicenseExpression {
                    expression: expr,
                    bom_ref: choice.bom_ref,
                    acknowledgement: choice
                        .acknowledgement
                        .as_deref()
                        .and_then(LicenseAcknowledgement::from_wire),
                });
            }
        }
    }
    LicenseChoice::from_parts(licenses, expression)
}

fn external_references(list: Vec<CdxExternalReference>) -> Vec<ExternalReference> {
    list.into_iter()
        .map(|r| ExternalReference {
            reference_type: ExternalReferenceType::from_wire(&r.reference_type),
            url: r.url,
            comment: r.comment,
            hashes: hashes(r.hashes),
        })
        .collect()
}

fn properties(list: Vec<CdxProperty>) -> Vec<Property> {
    list.into_iter()
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| Property {
            name: p.name,
            value: p.value,
        })
        .collect()
}

fn dependencies(list: Vec<CdxDependency>) -> Vec<Dependency> {
    list.into_iter()
        .filter(|d| !d.dependency_ref.trim().is_empty())
        .map(|d| Dependency {
            dependency_ref: d.dependency_ref,
            dependencies: d.depends_on.into_iter().map(Dependency::new).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Bom, ParseError> {
        JsonParser::new().parse_str(json)
    }

    #[test]
    fn test_minimal_document() {
        let bom = parse(
            r#"{"bomFormat":"CycloneDX","specVersion":"1.2","components":[{"type":"library","name":"acme"}]}"#,
        )
        .unwrap();
        assert_eq!(bom.version(), Some(SchemaVersion::V1_2));
        assert_eq!(bom.revision, 1);
        assert_eq!(bom.components[0].name, "acme");
        assert_eq!(bom.components[0].component_type, ComponentType::Library);
    }

    #[test]
    fn test_wrong_bom_format_is_rejected() {
        assert!(matches!(
            parse(r#"{"bomFormat":"SPDX","specVersion":"1.4"}"#),
            Err(ParseError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_missing_bom_format_is_configurable() {
        assert!(parse(r#"{"specVersion":"1.4"}"#).is_ok());
        let strict = JsonParser::with_options(ParseOptions {
            require_bom_format: true,
            ..ParseOptions::default()
        });
        assert!(strict.parse_str(r#"{"specVersion":"1.4"}"#).is_err());
    }

    #[test]
    fn test_unknown_spec_version_is_not_fatal() {
        let bom = parse(r#"{"bomFormat":"CycloneDX","specVersion":"2.0"}"#).unwrap();
        assert_eq!(bom.version(), None);
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        assert!(matches!(
            parse(r#"{"bomFormat":"CycloneDX","#),
            Err(ParseError::JsonError(_))
        ));
    }

    #[test]
    fn test_dependencies_and_structured_tools() {
        let bom = parse(
            r#"{"bomFormat":"CycloneDX","specVersion":"1.5",
                "metadata":{"tools":{"components":[{"type":"application","name":"scanner"}]}},
                "dependencies":[{"ref":"a","dependsOn":["b","c"]},{"ref":"b"}]}"#,
        )
        .unwrap();
        let tools = &bom.metadata.as_ref().unwrap().tools;
        assert_eq!(tools.components[0].name, "scanner");
        assert_eq!(bom.dependencies.len(), 2);
        assert_eq!(bom.dependencies[0].direct_refs().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_nesting_limit() {
        let mut json = String::from(r#"{"type":"library","name":"leaf"}"#);
        for _ in 0..5 {
            json = format!(r#"{{"type":"library","name":"n","components":[{json}]}}"#);
        }
        let doc = format!(r#"{{"bomFormat":"CycloneDX","specVersion":"1.4","components":[{json}]}}"#);
        let shallow = JsonParser::with_options(ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        });
        assert!(matches!(
            shallow.parse_str(&doc),
            Err(ParseError::NestingTooDeep { max_depth: 3 })
        ));
        assert!(JsonParser::new().parse_str(&doc).is_ok());
    }
}
