//! Document metadata: timestamp, tools, lifecycles and parties.

use super::{Component, ComponentType, ExternalReference, Hash, LicenseChoice, Property, Service};
use crate::schema::{preferred_tools_form, SchemaVersion, ToolsForm};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Document-level metadata (1.2+).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    pub timestamp: Option<DateTime<Utc>>,
    pub lifecycles: Vec<Lifecycle>,
    pub tools: Tools,
    pub authors: Vec<OrganizationalContact>,
    /// The component the BOM describes
    pub component: Option<Component>,
    /// Deprecated in 1.6 in favour of `manufacturer`
    pub manufacture: Option<OrganizationalEntity>,
    pub manufacturer: Option<OrganizationalEntity>,
    pub supplier: Option<OrganizationalEntity>,
    pub licenses: Option<LicenseChoice>,
    pub properties: Vec<Property>,
}

impl Metadata {
    /// Metadata stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            timestamp: Some(Utc::now()),
            ..Self::default()
        }
    }
}

/// Tools used to produce the BOM.
///
/// Up to 1.4 tools are a flat list; 1.5 introduced an object that lists
/// tool components and services. Both are held so documents of either
/// shape survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tools {
    pub legacy: Vec<Tool>,
    pub components: Vec<Component>,
    pub services: Vec<Service>,
}

/// Tools as they should be written for one target version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolsView<'a> {
    /// Flat `tool` list
    Legacy(Vec<Cow<'a, Tool>>),
    /// Object form with tool components and services
    Structured {
        components: Vec<Cow<'a, Component>>,
        services: &'a [Service],
    },
}

impl Tools {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legacy.is_empty() && self.components.is_empty() && self.services.is_empty()
    }

    /// The shape to write for `target`, or `None` when there are no tools.
    ///
    /// The object form is used from 1.5 when tool components or services
    /// exist; legacy entries are then converted to components. Otherwise the
    /// flat list is written and components and services degrade to tools.
    #[must_use]
    pub fn for_version(&self, target: SchemaVersion) -> Option<ToolsView<'_>> {
        if self.is_empty() {
            return None;
        }
        let structured = preferred_tools_form(target) == ToolsForm::Structured
            && (!self.components.is_empty() || !self.services.is_empty());
        if structured {
            let components = self
                .components
                .iter()
                .map(Cow::Borrowed)
                .chain(self.legacy.iter().map(|t| Cow::Owned(t.to_component())))
                .collect();
            return Some(ToolsView::Structured {
                components,
                services: &self.services,
            });
        }
        let tools = self
            .legacy
            .iter()
            .map(Cow::Borrowed)
            .chain(self.components.iter().map(|c| Cow::Owned(Tool::from_component(c))))
            .chain(self.services.iter().map(|s| Cow::Owned(Tool::from_service(s))))
            .collect();
        Some(ToolsView::Legacy(tools))
    }
}

/// Legacy tool entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tool {
    pub vendor: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub hashes: Vec<Hash>,
    /// 1.4+
    pub external_references: Vec<ExternalReference>,
}

impl Tool {
    #[must_use]
    pub fn new(vendor: Option<&str>, name: &str, version: Option<&str>) -> Self {
        Self {
            vendor: vendor.map(str::to_string),
            name: Some(name.to_string()),
            version: version.map(str::to_string),
            ..Self::default()
        }
    }

    /// Tool entry describing a tool component. The group becomes the vendor.
    #[must_use]
    pub fn from_component(component: &Component) -> Self {
        Self {
            vendor: component.group.clone(),
            name: Some(component.name.clone()),
            version: component.version.clone(),
            hashes: component.hashes.clone(),
            external_references: component.external_references.clone(),
        }
    }

    /// Tool entry describing a tool service. The provider name becomes the vendor.
    #[must_use]
    pub fn from_service(service: &Service) -> Self {
        Self {
            vendor: service.provider.as_ref().and_then(|p| p.name.clone()),
            name: Some(service.name.clone()),
            version: service.version.clone(),
            hashes: Vec::new(),
            external_references: service.external_references.clone(),
        }
    }

    /// Application component equivalent of this tool.
    #[must_use]
    pub fn to_component(&self) -> Component {
        Component {
            component_type: ComponentType::Application,
            group: self.vendor.clone(),
            name: self.name.clone().unwrap_or_default(),
            version: self.version.clone(),
            hashes: self.hashes.clone(),
            external_references: self.external_references.clone(),
            ..Component::default()
        }
    }
}

/// Lifecycle phase the BOM was produced in (1.5+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Phase(LifecyclePhase),
    Custom {
        name: String,
        description: Option<String>,
    },
}

/// Pre-defined lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    Design,
    PreBuild,
    Build,
    PostBuild,
    Operations,
    Discovery,
    Decommission,
}

impl LifecyclePhase {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "design" => Some(Self::Design),
            "pre-build" => Some(Self::PreBuild),
            "build" => Some(Self::Build),
            "post-build" => Some(Self::PostBuild),
            "operations" => Some(Self::Operations),
            "discovery" => Some(Self::Discovery),
            "decommission" => Some(Self::Decommission),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::PreBuild => "pre-build",
            Self::Build => "build",
            Self::PostBuild => "post-build",
            Self::Operations => "operations",
            Self::Discovery => "discovery",
            Self::Decommission => "decommission",
        }
    }
}

/// Organization such as a supplier or manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrganizationalEntity {
    pub bom_ref: Option<String>,
    pub name: Option<String>,
    pub urls: Vec<String>,
    pub contacts: Vec<OrganizationalContact>,
}

impl OrganizationalEntity {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Person or role to contact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrganizationalContact {
    pub bom_ref: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl OrganizationalContact {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Name, falling back to email.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_tools_stay_flat_at_1_5() {
        let tools = Tools {
            legacy: vec![Tool::new(Some("Acme"), "scanner", Some("2.0"))],
            ..Tools::default()
        };
        match tools.for_version(SchemaVersion::V1_5) {
            Some(ToolsView::Legacy(list)) => assert_eq!(list.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_tool_components_degrade_below_1_5() {
        let mut component = Component::new(ComponentType::Application, "scanner");
        component.group = Some("Acme".into());
        let tools = Tools {
            components: vec![component],
            ..Tools::default()
        };
        match tools.for_version(SchemaVersion::V1_4) {
            Some(ToolsView::Legacy(list)) => {
                assert_eq!(list[0].vendor.as_deref(), Some("Acme"));
                assert_eq!(list[0].name.as_deref(), Some("scanner"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            tools.for_version(SchemaVersion::V1_6),
            Some(ToolsView::Structured { .. })
        ));
    }

    #[test]
    fn test_mixed_tools_fold_into_components() {
        let tools = Tools {
            legacy: vec![Tool::new(None, "old", None)],
            components: vec![Component::new(ComponentType::Application, "new")],
            services: Vec::new(),
        };
        match tools.for_version(SchemaVersion::V1_5) {
            Some(ToolsView::Structured { components, .. }) => {
                let names: Vec<_> = components.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, ["new", "old"]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(Tools::default().for_version(SchemaVersion::V1_6), None);
    }

    #[test]
    fn test_contact_display_name() {
        let contact = OrganizationalContact {
            email: Some("a@example.com".into()),
            ..OrganizationalContact::default()
        };
        assert_eq!(contact.display_name(), Some("a@example.com"));
        assert_eq!(OrganizationalContact::default().display_name(), None);
    }
}
