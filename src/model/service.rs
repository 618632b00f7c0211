//! Services (1.2+).

use super::{ExternalReference, LicenseChoice, OrganizationalEntity, Property};

/// An external or internal service the described system relies on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Service {
    pub bom_ref: Option<String>,
    pub provider: Option<OrganizationalEntity>,
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub endpoints: Vec<String>,
    pub authenticated: Option<bool>,
    pub x_trust_boundary: Option<bool>,
    /// 1.5+
    pub trust_zone: Option<String>,
    pub licenses: Option<LicenseChoice>,
    pub external_references: Vec<ExternalReference>,
    pub properties: Vec<Property>,
    /// Nested services
    pub services: Vec<Service>,
    pub tags: Vec<String>,
}

impl Service {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
