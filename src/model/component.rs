//! Components and their version-dependent authorship.

use super::{
    ExternalReference, Hash, LicenseChoice, OrganizationalContact, OrganizationalEntity, Property,
};
use crate::schema::{preferred_authorship, AuthorshipForm, Member, SchemaVersion, VersionGated};
use packageurl::PackageUrl;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A software or hardware component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Component {
    pub component_type: ComponentType,
    pub mime_type: Option<String>,
    pub bom_ref: Option<String>,
    pub supplier: Option<OrganizationalEntity>,
    pub manufacturer: Option<OrganizationalEntity>,
    pub authorship: Authorship,
    pub publisher: Option<String>,
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub scope: Option<ComponentScope>,
    pub hashes: Vec<Hash>,
    pub licenses: Option<LicenseChoice>,
    pub copyright: Option<String>,
    pub cpe: Option<String>,
    pub purl: Option<String>,
    pub omnibor_ids: Vec<String>,
    pub swhids: Vec<String>,
    /// Only meaningful for 1.0 documents
    pub modified: Option<bool>,
    pub pedigree: Option<Pedigree>,
    pub external_references: Vec<ExternalReference>,
    pub properties: Vec<Property>,
    /// Nested sub-components
    pub components: Vec<Component>,
    pub tags: Vec<String>,
}

impl Component {
    /// Create a component with only a type and name set.
    #[must_use]
    pub fn new(component_type: ComponentType, name: impl Into<String>) -> Self {
        Self {
            component_type,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_bom_ref(mut self, bom_ref: impl Into<String>) -> Self {
        self.bom_ref = Some(bom_ref.into());
        self
    }

    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// Parsed package URL, if one is set and well formed.
    #[must_use]
    pub fn package_url(&self) -> Option<PackageUrl<'static>> {
        self.purl
            .as_deref()
            .and_then(|p| PackageUrl::from_str(p).ok())
    }

    /// Package ecosystem from the purl type (e.g. `npm`, `cargo`).
    #[must_use]
    pub fn ecosystem(&self) -> Option<String> {
        self.package_url().map(|p| p.ty().to_string())
    }

    /// Depth-first iterator over this component and all nested ones.
    pub fn iter_tree(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.components.iter().rev());
            Some(next)
        })
    }
}

/// Component classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ComponentType {
    Application,
    Framework,
    #[default]
    Library,
    OperatingSystem,
    Device,
    File,
    Container,
    Firmware,
    Platform,
    DeviceDriver,
    MachineLearningModel,
    Data,
    CryptographicAsset,
    /// Type value not known to this crate
    Unknown(String),
}

impl ComponentType {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "operating-system" => Self::OperatingSystem,
            "device" => Self::Device,
            "file" => Self::File,
            "container" => Self::Container,
            "firmware" => Self::Firmware,
            "platform" => Self::Platform,
            "device-driver" => Self::DeviceDriver,
            "machine-learning-model" => Self::MachineLearningModel,
            "data" => Self::Data,
            "cryptographic-asset" => Self::CryptographicAsset,
            other => Self::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::File => "file",
            Self::Container => "container",
            Self::Firmware => "firmware",
            Self::Platform => "platform",
            Self::DeviceDriver => "device-driver",
            Self::MachineLearningModel => "machine-learning-model",
            Self::Data => "data",
            Self::CryptographicAsset => "cryptographic-asset",
            Self::Unknown(value) => value,
        }
    }
}

impl VersionGated for ComponentType {
    fn since(&self) -> SchemaVersion {
        match self {
            Self::Application
            | Self::Framework
            | Self::Library
            | Self::OperatingSystem
            | Self::Device => SchemaVersion::V1_0,
            Self::File => SchemaVersion::V1_1,
            Self::Container | Self::Firmware => SchemaVersion::V1_2,
            Self::Platform | Self::DeviceDriver | Self::MachineLearningModel | Self::Data => {
                SchemaVersion::V1_5
            }
            Self::CryptographicAsset => SchemaVersion::V1_6,
            Self::Unknown(_) => SchemaVersion::latest(),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Whether a component is needed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentScope {
    Required,
    Optional,
    Excluded,
}

impl ComponentScope {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "required" => Some(Self::Required),
            "optional" => Some(Self::Optional),
            "excluded" => Some(Self::Excluded),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Excluded => "excluded",
        }
    }
}

impl VersionGated for ComponentScope {
    fn since(&self) -> SchemaVersion {
        match self {
            Self::Required | Self::Optional => SchemaVersion::V1_0,
            Self::Excluded => SchemaVersion::V1_1,
        }
    }
}

impl fmt::Display for ComponentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Component lineage (1.1+).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pedigree {
    pub ancestors: Vec<Component>,
    pub descendants: Vec<Component>,
    pub variants: Vec<Component>,
    pub notes: Option<String>,
}

impl Pedigree {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
            && self.descendants.is_empty()
            && self.variants.is_empty()
            && self.notes.is_none()
    }
}

/// Authors of a component.
///
/// Older schemas carry a single free-text `author`; 1.6 adds a list of
/// contacts under `authors` and deprecates the string. Both may be held at
/// once; [`Authorship::for_version`] decides which one goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Authorship {
    legacy: Option<String>,
    contacts: Vec<OrganizationalContact>,
}

/// Authorship as it should be written for one target version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorshipView<'a> {
    /// Write `author` with this text
    Legacy(Cow<'a, str>),
    /// Write `authors` with these contacts
    Contacts(&'a [OrganizationalContact]),
}

impl Authorship {
    /// Authorship from a legacy author string.
    #[must_use]
    pub fn legacy(author: impl Into<String>) -> Self {
        Self {
            legacy: Some(author.into()),
            contacts: Vec::new(),
        }
    }

    /// Authorship from a list of contacts.
    #[must_use]
    pub fn contacts(contacts: Vec<OrganizationalContact>) -> Self {
        Self {
            legacy: None,
            contacts,
        }
    }

    pub fn set_legacy(&mut self, author: Option<String>) {
        self.legacy = author.filter(|a| !a.trim().is_empty());
    }

    pub fn set_contacts(&mut self, contacts: Vec<OrganizationalContact>) {
        self.contacts = contacts;
    }

    #[must_use]
    pub fn legacy_author(&self) -> Option<&str> {
        self.legacy.as_deref()
    }

    #[must_use]
    pub fn contact_list(&self) -> &[OrganizationalContact] {
        &self.contacts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legacy.is_none() && self.contacts.is_empty()
    }

    /// The representation to write for `target`, or `None` when nothing
    /// representable remains.
    ///
    /// At 1.6 the contact list is preferred and the legacy string is only
    /// used when no contacts exist. Below 1.6 the legacy string is preferred;
    /// contacts degrade to a comma-joined list of their names or emails.
    #[must_use]
    pub fn for_version(&self, target: SchemaVersion) -> Option<AuthorshipView<'_>> {
        match preferred_authorship(target) {
            AuthorshipForm::Contacts => {
                if !self.contacts.is_empty() {
                    Some(AuthorshipView::Contacts(&self.contacts))
                } else {
                    self.legacy
                        .as_deref()
                        .map(|a| AuthorshipView::Legacy(Cow::Borrowed(a)))
                }
            }
            AuthorshipForm::Legacy => {
                if !Member::ComponentAuthor.admitted_in(target) {
                    return None;
                }
                if let Some(author) = self.legacy.as_deref() {
                    return Some(AuthorshipView::Legacy(Cow::Borrowed(author)));
                }
                let joined = self
                    .contacts
                    .iter()
                    .filter_map(OrganizationalContact::display_name)
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then(|| AuthorshipView::Legacy(Cow::Owned(joined)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> OrganizationalContact {
        OrganizationalContact {
            name: Some(name.to_string()),
            ..OrganizationalContact::default()
        }
    }

    #[test]
    fn test_authorship_prefers_contacts_at_1_6() {
        let mut authorship = Authorship::legacy("Jane");
        authorship.set_contacts(vec![contact("Ann"), contact("Bo")]);
        assert!(matches!(
            authorship.for_version(SchemaVersion::V1_6),
            Some(AuthorshipView::Contacts(c)) if c.len() == 2
        ));
        assert_eq!(
            authorship.for_version(SchemaVersion::V1_5),
            Some(AuthorshipView::Legacy(Cow::Borrowed("Jane")))
        );
    }

    #[test]
    fn test_authorship_degrades_contacts_below_1_6() {
        let authorship = Authorship::contacts(vec![contact("Ann"), contact("Bo")]);
        assert_eq!(
            authorship.for_version(SchemaVersion::V1_4),
            Some(AuthorshipView::Legacy(Cow::Owned("Ann, Bo".to_string())))
        );
        assert_eq!(authorship.for_version(SchemaVersion::V1_1), None);
    }

    #[test]
    fn test_legacy_only_at_1_6() {
        let authorship = Authorship::legacy("Jane");
        assert_eq!(
            authorship.for_version(SchemaVersion::V1_6),
            Some(AuthorshipView::Legacy(Cow::Borrowed("Jane")))
        );
        assert_eq!(Authorship::default().for_version(SchemaVersion::V1_6), None);
    }

    #[test]
    fn test_component_type_gating() {
        assert!(ComponentType::Library.admitted_in(SchemaVersion::V1_0));
        assert!(!ComponentType::File.admitted_in(SchemaVersion::V1_0));
        assert!(!ComponentType::MachineLearningModel.admitted_in(SchemaVersion::V1_4));
        assert!(ComponentType::CryptographicAsset.admitted_in(SchemaVersion::V1_6));
        assert_eq!(
            ComponentType::from_wire("operating-system"),
            ComponentType::OperatingSystem
        );
    }

    #[test]
    fn test_purl_accessors() {
        let c = Component::new(ComponentType::Library, "serde")
            .with_purl("pkg:cargo/serde@1.0.200");
        assert_eq!(c.ecosystem().as_deref(), Some("cargo"));
        let broken = Component::new(ComponentType::Library, "x").with_purl("not a purl");
        assert!(broken.package_url().is_none());
    }

    #[test]
    fn test_iter_tree_is_depth_first() {
        let mut root = Component::new(ComponentType::Application, "root");
        let mut child = Component::new(ComponentType::Library, "a");
        child.components.push(Component::new(ComponentType::Library, "a1"));
        root.components.push(child);
        root.components.push(Component::new(ComponentType::Library, "b"));
        let names: Vec<_> = root.iter_tree().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_classifications_are_hashable() {
        let types: std::collections::HashSet<ComponentType> = [
            ComponentType::Library,
            ComponentType::from_wire("library"),
            ComponentType::Unknown("widget".into()),
        ]
        .into_iter()
        .collect();
        assert_eq!(types.len(), 2);
        let scopes: std::collections::HashSet<ComponentScope> =
            [ComponentScope::Required, ComponentScope::Required].into_iter().collect();
        assert_eq!(scopes.len(), 1);
    }
}
