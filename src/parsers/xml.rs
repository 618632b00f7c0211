//! CycloneDX XML reader.
//!
//! The document is detected, tokenized through the namespace normalizer
//! and built into an element tree. Mapping then only looks at elements in
//! the latest core namespace (or in no namespace), so a single table of
//! element names serves every schema version. The detected version is set
//! on the result afterwards.

use super::detection::FormatDetector;
use super::namespace::NamespaceNormalizer;
use super::traits::{BomParser, ParseError};
use super::tree::XmlNode;
use super::{parse_flag, parse_revision, parse_timestamp, ParseOptions};
use crate::model::{
    AttachedText, Authorship, Bom, Component, ComponentScope, ComponentType, Dependency,
    ExternalReference, ExternalReferenceType, Hash, HashAlgorithm, License,
    LicenseAcknowledgement, LicenseChoice, LicenseExpression, LicenseIdentity, Lifecycle,
    LifecyclePhase, Metadata, OrganizationalContact, OrganizationalEntity, Pedigree, Property,
    Service, Tool, Tools,
};
use crate::schema::WireFormat;

/// Parser for the XML dialect of all registered versions.
#[derive(Debug, Clone, Default)]
pub struct XmlParser {
    options: ParseOptions,
}

impl XmlParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl BomParser for XmlParser {
    fn parse_bytes(&self, content: &[u8]) -> Result<Bom, ParseError> {
        let detection = FormatDetector::new().detect_bytes(content)?;
        if detection.format != WireFormat::Xml {
            return Err(ParseError::UnsupportedFormat(format!(
                "expected XML, found {}",
                detection.format
            )));
        }
        let text = std::str::from_utf8(content)
            .map_err(|e| ParseError::XmlError(format!("input is not UTF-8: {e}")))?;

        let tokens = NamespaceNormalizer::new(text, self.options.namespace_policy.clone());
        let mut root = XmlNode::build(tokens, self.options.max_depth)?;
        if detection.version.is_none() && root.name == "bom" && !root.is_core() {
            if let Some(namespace) = root.namespace.clone() {
                tracing::warn!(
                    namespace = %namespace,
                    "reading <bom> in an unregistered namespace with the latest element table"
                );
                root.adopt_namespace(&namespace);
            }
        }
        if !(root.is_core() && root.name == "bom") {
            return Err(ParseError::InvalidStructure(format!(
                "root element <{}> is not a CycloneDX <bom> in a supported namespace",
                root.name
            )));
        }

        let mut bom = read_bom(&root);
        bom.set_version(detection.version);
        tracing::debug!(
            version = ?detection.version,
            components = bom.components.len(),
            "parsed XML BOM"
        );
        Ok(bom)
    }

    fn format(&self) -> WireFormat {
        WireFormat::Xml
    }
}

fn read_bom(root: &XmlNode) -> Bom {
    let mut bom = Bom::new();
    bom.serial_number = root.attr_string("serialNumber");
    bom.revision = parse_revision(root.attr("version"));
    bom.metadata = root.child("metadata").map(read_metadata);
    bom.components = read_components(root);
    bom.services = read_services(root);
    bom.external_references = read_external_references(root);
    bom.dependencies = read_dependencies(root);
    bom.properties = read_properties(root);
    bom
}

fn read_metadata(node: &XmlNode) -> Metadata {
    let tools = node.child("tools").map(read_tools).unwrap_or_default();
    Metadata {
        timestamp: node
            .child_text("timestamp")
            .and_then(|t| parse_timestamp(&t)),
        lifecycles: node
            .child("lifecycles")
            .map(|w| w.children_named("lifecycle").filter_map(read_lifecycle).collect())
            .unwrap_or_default(),
        tools,
        authors: read_contacts(node, "authors", "author"),
        component: node.child("component").map(read_component),
        manufacture: node.child("manufacture").map(read_entity),
        manufacturer: node.child("manufacturer").map(read_entity),
        supplier: node.child("supplier").map(read_entity),
        licenses: read_licenses(node),
        properties: read_properties(node),
    }
}

fn read_lifecycle(node: &XmlNode) -> Option<Lifecycle> {
    if let Some(phase) = node.child_text("phase") {
        return match LifecyclePhase::from_wire(&phase) {
            Some(phase) => Some(Lifecycle::Phase(phase)),
            None => {
                tracing::warn!(phase = %phase, "ignoring unknown lifecycle phase");
                None
            }
        };
    }
    node.child_text("name").map(|name| Lifecycle::Custom {
        name,
        description: node.child_text("description"),
    })
}

fn read_tools(node: &XmlNode) -> Tools {
    Tools {
        legacy: node.children_named("tool").map(read_tool).collect(),
        components: read_components(node),
        services: read_services(node),
    }
}

fn read_tool(node: &XmlNode) -> Tool {
    Tool {
        vendor: node.child_text("vendor"),
        name: node.child_text("name"),
        version: node.child_text("version"),
        hashes: read_hashes(node),
        external_references: read_external_references(node),
    }
}

fn read_components(parent: &XmlNode) -> Vec<Component> {
    parent
        .child("components")
        .map(|w| w.children_named("component").map(read_component).collect())
        .unwrap_or_default()
}

fn read_component(node: &XmlNode) -> Component {
    let mut authorship = Authorship::default();
    authorship.set_legacy(node.child_text("author"));
    authorship.set_contacts(read_contacts(node, "authors", "author"));

    Component {
        component_type: node
            .attr("type")
            .map(ComponentType::from_wire)
            .unwrap_or_default(),
        mime_type: node.attr_string("mime-type"),
        bom_ref: node.attr_string("bom-ref"),
        supplier: node.child("supplier").map(read_entity),
        manufacturer: node.child("manufacturer").map(read_entity),
        authorship,
        publisher: node.child_text("publisher"),
        group: node.child_text("group"),
        name: node.child_text("name").unwrap_or_default(),
        version: node.child_text("version"),
        description: node.child_text("description"),
        scope: node
            .child_text("scope")
            .and_then(|s| ComponentScope::from_wire(&s)),
        hashes: read_hashes(node),
        licenses: read_licenses(node),
        copyright: node.child_text("copyright"),
        cpe: node.child_text("cpe"),
        purl: node.child_text("purl"),
        omnibor_ids: node
            .children_named("omniborId")
            .filter_map(XmlNode::text_value)
            .collect(),
        swhids: node
            .children_named("swhid")
            .filter_map(XmlNode::text_value)
            .collect(),
        modified: node.child_text("modified").and_then(|m| parse_flag(&m)),
        pedigree: node.child("pedigree").map(read_pedigree),
        external_references: read_external_references(node),
        properties: read_properties(node),
        components: read_components(node),
        tags: node.wrapped_texts("tags", "tag"),
    }
}

fn read_pedigree(node: &XmlNode) -> Pedigree {
    let group = |name: &str| {
        node.child(name)
            .map(|w| w.children_named("component").map(read_component).collect())
            .unwrap_or_default()
    };
    Pedigree {
        ancestors: group("ancestors"),
        descendants: group("descendants"),
        variants: group("variants"),
        notes: node.child_text("notes"),
    }
}

fn read_services(parent: &XmlNode) -> Vec<Service> {
    parent
        .child("services")
        .map(|w| w.children_named("service").map(read_service).collect())
        .unwrap_or_default()
}

fn read_service(node: &XmlNode) -> Service {
    Service {
        bom_ref: node.attr_string("bom-ref"),
        provider: node.child("provider").map(read_entity),
        group: node.child_text("group"),
        name: node.child_text("name").unwrap_or_default(),
        version: node.child_text("version"),
        description: node.child_text("description"),
        endpoints: node.wrapped_texts("endpoints", "endpoint"),
        authenticated: node
            .child_text("authenticated")
            .and_then(|v| parse_flag(&v)),
        x_trust_boundary: node
            .child_text("x-trust-boundary")
            .and_then(|v| parse_flag(&v)),
        trust_zone: node.child_text("trustZone"),
        licenses: read_licenses(node),
        external_references: read_external_references(node),
        properties: read_properties(node),
        services: read_services(node),
        tags: node.wrapped_texts("tags", "tag"),
    }
}

fn read_entity(node: &XmlNode) -> OrganizationalEntity {
    OrganizationalEntity {
        bom_ref: node.attr_string("bom-ref"),
        name: node.child_text("name"),
        urls: node
            .children_named("url")
            .filter_map(XmlNode::text_value)
            .collect(),
        contacts: node.children_named("contact").map(read_contact).collect(),
    }
}

fn read_contacts(node: &XmlNode, wrapper: &str, item: &str) -> Vec<OrganizationalContact> {
    node.child(wrapper)
        .map(|w| w.children_named(item).map(read_contact).collect())
        .unwrap_or_default()
}

fn read_contact(node: &XmlNode) -> OrganizationalContact {
    OrganizationalContact {
        bom_ref: node.attr_string("bom-ref"),
        name: node.child_text("name"),
        email: node.child_text("email"),
        phone: node.child_text("phone"),
    }
}

fn read_hashes(node: &XmlNode) -> Vec<Hash> {
    node.child("hashes")
        .map(|w| {
            w.children_named("hash")
                .filter_map(|h| {
                    let value = h.text_value()?;
                    let alg = h.attr("alg").unwrap_or_default();
                    Some(Hash::new(HashAlgorithm::from_wire(alg), value))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_licenses(node: &XmlNode) -> Option<LicenseChoice> {
    let wrapper = node.child("licenses")?;
    let licenses = wrapper
        .children_named("license")
        .filter_map(read_license)
        .collect();
    let expression = wrapper.child("expression").and_then(|e| {
        let text = e.text_value()?;
        Some(LicenseExpression {
            expression: text,
            bom_ref: e.attr_string("bom-ref"),
            acknowledgement: e
                .attr("acknowledgement")
                .and_then(LicenseAcknowledgement::from_wire),
        })
    });
    LicenseChoice::from_parts(licenses, expression)
}

fn read_license(node: &XmlNode) -> Option<License> {
    let identity = match (node.child_text("id"), node.child_text("name")) {
        (Some(id), _) => LicenseIdentity::Id(id),
        (None, Some(name)) => LicenseIdentity::Name(name),
        (None, None) => {
            tracing::debug!("skipping license without id or name");
            return None;
        }
    };
    Some(License {
        identity,
        text: node.child("text").map(|t| AttachedText {
            content_type: t.attr_string("content-type"),
            encoding: t.attr_string("encoding"),
            content: t.text.clone(),
        }),
        url: node.child_text("url"),
        bom_ref: node.attr_string("bom-ref"),
        acknowledgement: node
            .attr("acknowledgement")
            .and_then(LicenseAcknowledgement::from_wire),
        properties: read_properties(node),
    })
}

fn read_external_references(node: &XmlNode) -> Vec<ExternalReference> {
    node.child("externalReferences")
        .map(|w| {
            w.children_named("reference")
                .map(|r| ExternalReference {
                    reference_type: r
                        .attr("type")
                        .map_or(ExternalReferenceType::Other, ExternalReferenceType::from_wire),
                    url: r.child_text("url").unwrap_or_default(),
                    comment: r.child_text("comment"),
                    hashes: read_hashes(r),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_properties(node: &XmlNode) -> Vec<Property> {
    node.child("properties")
        .map(|w| {
            w.children_named("property")
                .filter_map(|p| {
                    Some(Property {
                        name: p.attr_string("name")?,
                        value: Some(p.trimmed_text()),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Dependencies live in the core namespace from 1.2 and in the
/// dependency-graph extension namespace in 1.1 documents.
fn read_dependencies(root: &XmlNode) -> Vec<Dependency> {
    root.children
        .iter()
        .find(|c| c.name == "dependencies" && (c.is_core() || c.is_dependency_graph()))
        .map(|w| dependency_children(w).filter_map(read_dependency).collect())
        .unwrap_or_default()
}

fn dependency_children(node: &XmlNode) -> impl Iterator<Item = &XmlNode> {
    node.children
        .iter()
        .filter(|c| c.name == "dependency" && (c.is_core() || c.is_dependency_graph()))
}

fn read_dependency(node: &XmlNode) -> Option<Dependency> {
    let dependency_ref = node.attr_string("ref")?;
    Some(Dependency {
        dependency_ref,
        dependencies: dependency_children(node).filter_map(read_dependency).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::namespace::NamespacePolicy;
    use crate::schema::SchemaVersion;

    fn parse(xml: &str) -> Bom {
        XmlParser::new().parse_str(xml).unwrap()
    }

    #[test]
    fn test_minimal_1_0_document() {
        let bom = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.0" version="1">
  <components>
    <component type="library"><name>acme</name><modified>false</modified></component>
  </components>
</bom>"#,
        );
        assert_eq!(bom.version(), Some(SchemaVersion::V1_0));
        assert_eq!(bom.revision, 1);
        assert_eq!(bom.components.len(), 1);
        let component = &bom.components[0];
        assert_eq!(component.component_type, ComponentType::Library);
        assert_eq!(component.name, "acme");
        assert_eq!(component.modified, Some(false));
    }

    #[test]
    fn test_dependency_graph_extension() {
        let bom = parse(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.1"
     xmlns:dg="http://cyclonedx.org/schema/ext/dependency-graph/1.0" version="1">
  <components>
    <component type="library" bom-ref="a"><name>a</name></component>
    <component type="library" bom-ref="b"><name>b</name></component>
  </components>
  <dg:dependencies>
    <dg:dependency ref="a"><dg:dependency ref="b"/></dg:dependency>
  </dg:dependencies>
</bom>"#,
        );
        assert_eq!(bom.version(), Some(SchemaVersion::V1_1));
        assert_eq!(bom.dependencies, vec![Dependency::new("a").depends_on("b")]);
    }

    #[test]
    fn test_authorship_forms_do_not_collide() {
        let bom = parse(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.6" version="1"><components>
<component type="library"><authors><author><name>Ann</name></author></authors>
<author>Legacy Person</author><name>x</name></component></components></bom>"#,
        );
        let authorship = &bom.components[0].authorship;
        assert_eq!(authorship.legacy_author(), Some("Legacy Person"));
        assert_eq!(authorship.contact_list().len(), 1);
        assert_eq!(authorship.contact_list()[0].name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_license_list_wins_over_expression() {
        let bom = parse(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4"><components><component type="library">
<name>x</name><licenses><license><id>MIT</id></license><expression>Apache-2.0</expression></licenses>
</component></components></bom>"#,
        );
        assert_eq!(
            bom.components[0].licenses,
            Some(LicenseChoice::Licenses(vec![License::id("MIT")]))
        );
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let bom = parse(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.5"><vulnerabilities><v/></vulnerabilities>
<components><component type="library"><name>x</name><evidence/></component></components></bom>"#,
        );
        assert_eq!(bom.components.len(), 1);
    }

    #[test]
    fn test_namespace_policy_limits_understood_versions() {
        let parser = XmlParser::with_options(ParseOptions {
            namespace_policy: NamespacePolicy::none(),
            ..ParseOptions::default()
        });
        let result = parser.parse_str(r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.2"/>"#);
        assert!(matches!(result, Err(ParseError::InvalidStructure(_))));
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let result = XmlParser::new().parse_str("<project/>");
        assert!(matches!(result, Err(ParseError::InvalidStructure(_))));
        let result = XmlParser::new().parse_str(r#"{"bomFormat":"CycloneDX"}"#);
        assert!(matches!(result, Err(ParseError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_unregistered_namespace_is_read_without_a_version() {
        let bom = parse(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.7" version="2">
  <components>
    <component type="library"><name>acme</name><version>1.0</version></component>
  </components>
</bom>"#,
        );
        assert_eq!(bom.version(), None);
        assert_eq!(bom.revision, 2);
        assert_eq!(bom.components.len(), 1);
        assert_eq!(bom.components[0].name, "acme");
        assert_eq!(bom.components[0].version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_empty_property_value_is_kept() {
        let bom = parse(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.6">
  <properties><property name="x"/><property name="y">  v </property></properties>
</bom>"#,
        );
        let values: Vec<_> = bom.properties.iter().map(|p| p.value.as_deref()).collect();
        assert_eq!(values, vec![Some(""), Some("v")]);
    }
}
