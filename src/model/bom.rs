//! The BOM document root.

use super::{Component, Dependency, ExternalReference, Metadata, Property, Service};
use crate::schema::SchemaVersion;
use uuid::Uuid;

/// A CycloneDX bill of materials, independent of wire format and version.
///
/// `version` records the schema the document was read from and stays
/// `None` for BOMs built in code. Rendering never consults it; the target
/// version is chosen per render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bom {
    version: Option<SchemaVersion>,
    /// `urn:uuid:` serial number (1.1+)
    pub serial_number: Option<String>,
    /// Document revision, starting at 1
    pub revision: u32,
    pub metadata: Option<Metadata>,
    pub components: Vec<Component>,
    pub services: Vec<Service>,
    pub external_references: Vec<ExternalReference>,
    pub dependencies: Vec<Dependency>,
    pub properties: Vec<Property>,
}

impl Default for Bom {
    fn default() -> Self {
        Self {
            version: None,
            serial_number: None,
            revision: 1,
            metadata: None,
            components: Vec::new(),
            services: Vec::new(),
            external_references: Vec::new(),
            dependencies: Vec::new(),
            properties: Vec::new(),
        }
    }
}

impl Bom {
    /// Empty BOM with no detected version.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema version the document was read from.
    #[must_use]
    pub fn version(&self) -> Option<SchemaVersion> {
        self.version
    }

    /// Record the detected schema version.
    pub fn set_version(&mut self, version: Option<SchemaVersion>) {
        self.version = version;
    }

    #[must_use]
    pub fn with_version(mut self, version: SchemaVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Assign a fresh random `urn:uuid:` serial number.
    pub fn generate_serial_number(&mut self) -> &str {
        self.serial_number
            .insert(format!("urn:uuid:{}", Uuid::new_v4()))
            .as_str()
    }

    /// Serial number as a UUID, when it is a well-formed `urn:uuid:` value.
    #[must_use]
    pub fn serial_uuid(&self) -> Option<Uuid> {
        self.serial_number
            .as_deref()
            .and_then(|s| s.strip_prefix("urn:uuid:"))
            .and_then(|s| Uuid::parse_str(s).ok())
    }

    /// Every component in the document, including nested ones and the
    /// metadata component, depth first.
    pub fn all_components(&self) -> impl Iterator<Item = &Component> {
        self.metadata
            .iter()
            .filter_map(|m| m.component.as_ref())
            .chain(self.components.iter())
            .flat_map(Component::iter_tree)
    }

    /// Find a component anywhere in the document by `bom-ref`.
    #[must_use]
    pub fn find_component(&self, bom_ref: &str) -> Option<&Component> {
        self.all_components()
            .find(|c| c.bom_ref.as_deref() == Some(bom_ref))
    }

    /// Whether the document holds no content beyond header fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_none()
            && self.components.is_empty()
            && self.services.is_empty()
            && self.external_references.is_empty()
            && self.dependencies.is_empty()
            && self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentType;

    #[test]
    fn test_defaults() {
        let bom = Bom::new();
        assert_eq!(bom.version(), None);
        assert_eq!(bom.revision, 1);
        assert!(bom.is_empty());
    }

    #[test]
    fn test_serial_number_generation() {
        let mut bom = Bom::new();
        let serial = bom.generate_serial_number().to_string();
        assert!(serial.starts_with("urn:uuid:"));
        assert!(bom.serial_uuid().is_some());
        bom.serial_number = Some("urn:uuid:nope".into());
        assert!(bom.serial_uuid().is_none());
    }

    #[test]
    fn test_find_nested_and_metadata_components() {
        let mut bom = Bom::new();
        let mut parent = Component::new(ComponentType::Library, "parent").with_bom_ref("p");
        parent
            .components
            .push(Component::new(ComponentType::Library, "child").with_bom_ref("c"));
        bom.components.push(parent);
        bom.metadata = Some(Metadata {
            component: Some(Component::new(ComponentType::Application, "app").with_bom_ref("app")),
            ..Metadata::default()
        });
        assert_eq!(bom.find_component("c").map(|c| c.name.as_str()), Some("child"));
        assert_eq!(bom.find_component("app").map(|c| c.name.as_str()), Some("app"));
        assert_eq!(bom.all_components().count(), 3);
        assert!(bom.find_component("missing").is_none());
    }
}
