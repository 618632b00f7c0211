//! Version-gated field policy.
//!
//! Every model member whose presence depends on the target schema version
//! has an entry in [`Member::availability`]. The lookup is an exhaustive
//! `match`, so adding a member without deciding its availability does not
//! compile. Members that exist in every version of their owner are simply
//! not listed and are always emitted.
//!
//! Enum constants carry their own introduction version through
//! [`VersionGated`].

use super::SchemaVersion;

/// Core rule: a member tagged with `tag` is emitted for `target` when it has
/// no tag or was introduced at or before `target`.
#[must_use]
pub fn should_emit(tag: Option<SchemaVersion>, target: SchemaVersion) -> bool {
    tag.map_or(true, |since| since <= target)
}

/// Version window in which a member exists on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// First version carrying the member, `None` for "since the beginning"
    pub since: Option<SchemaVersion>,
    /// Last version carrying the member, `None` while still current
    pub until: Option<SchemaVersion>,
}

impl Availability {
    /// Present in every version.
    pub const ALWAYS: Self = Self {
        since: None,
        until: None,
    };

    /// Present from `version` onwards.
    #[must_use]
    pub const fn since(version: SchemaVersion) -> Self {
        Self {
            since: Some(version),
            until: None,
        }
    }

    /// Present from `since` up to and including `until`.
    #[must_use]
    pub const fn between(since: SchemaVersion, until: SchemaVersion) -> Self {
        Self {
            since: Some(since),
            until: Some(until),
        }
    }

    /// Whether the member may be written for `target`.
    #[must_use]
    pub fn admits(&self, target: SchemaVersion) -> bool {
        should_emit(self.since, target) && self.until.map_or(true, |last| target <= last)
    }
}

/// Members whose presence depends on the schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    BomSerialNumber,
    BomMetadata,
    BomServices,
    BomExternalReferences,
    BomDependencies,
    /// Dependencies in the core namespace rather than the `dg` extension
    BomDependenciesCore,
    BomProperties,

    MetadataTimestamp,
    MetadataLifecycles,
    MetadataTools,
    /// The `tools` object with `components`/`services`
    MetadataToolsObject,
    MetadataAuthors,
    MetadataComponent,
    MetadataManufacture,
    MetadataManufacturer,
    MetadataSupplier,
    MetadataLicenses,
    MetadataProperties,

    ComponentMimeType,
    ComponentBomRef,
    ComponentSupplier,
    ComponentManufacturer,
    ComponentAuthor,
    ComponentAuthors,
    ComponentOmniborId,
    ComponentSwhid,
    ComponentModified,
    ComponentPedigree,
    ComponentExternalReferences,
    ComponentProperties,
    ComponentTags,

    LicenseUrl,
    LicenseBomRef,
    LicenseAcknowledgement,
    LicenseProperties,
    LicenseExpression,
    ExpressionBomRef,
    ExpressionAcknowledgement,

    ExternalReferenceHashes,

    ServiceTrustZone,
    ServiceProperties,
    ServiceTags,

    ContactBomRef,
    EntityBomRef,

    ToolExternalReferences,
}

impl Member {
    /// Version window of this member.
    #[must_use]
    pub const fn availability(self) -> Availability {
        use SchemaVersion::{V1_0, V1_1, V1_2, V1_3, V1_4, V1_5, V1_6};
        match self {
            Self::BomSerialNumber | Self::BomExternalReferences | Self::BomDependencies => {
                Availability::since(V1_1)
            }
            Self::BomMetadata | Self::BomServices | Self::BomDependenciesCore => {
                Availability::since(V1_2)
            }
            Self::BomProperties => Availability::since(V1_5),

            Self::MetadataTimestamp
            | Self::MetadataTools
            | Self::MetadataAuthors
            | Self::MetadataComponent
            | Self::MetadataManufacture
            | Self::MetadataSupplier => Availability::since(V1_2),
            Self::MetadataLicenses | Self::MetadataProperties => Availability::since(V1_3),
            Self::MetadataLifecycles | Self::MetadataToolsObject => Availability::since(V1_5),
            Self::MetadataManufacturer => Availability::since(V1_6),

            Self::ComponentBomRef | Self::ComponentPedigree | Self::ComponentExternalReferences => {
                Availability::since(V1_1)
            }
            Self::ComponentMimeType | Self::ComponentSupplier | Self::ComponentAuthor => {
                Availability::since(V1_2)
            }
            Self::ComponentProperties => Availability::since(V1_3),
            Self::ComponentManufacturer
            | Self::ComponentAuthors
            | Self::ComponentOmniborId
            | Self::ComponentSwhid
            | Self::ComponentTags => Availability::since(V1_6),
            Self::ComponentModified => Availability::between(V1_0, V1_0),

            Self::LicenseUrl | Self::LicenseExpression => Availability::since(V1_1),
            Self::LicenseBomRef | Self::LicenseProperties | Self::ExpressionBomRef => {
                Availability::since(V1_5)
            }
            Self::LicenseAcknowledgement | Self::ExpressionAcknowledgement => {
                Availability::since(V1_6)
            }

            Self::ExternalReferenceHashes | Self::ServiceProperties => Availability::since(V1_3),
            Self::ServiceTrustZone | Self::ContactBomRef | Self::EntityBomRef => {
                Availability::since(V1_5)
            }
            Self::ServiceTags => Availability::since(V1_6),

            Self::ToolExternalReferences => Availability::since(V1_4),
        }
    }

    /// Whether this member may be written for `target`.
    #[must_use]
    pub fn admitted_in(self, target: SchemaVersion) -> bool {
        self.availability().admits(target)
    }
}

/// Enum constants introduced after the first schema version.
pub trait VersionGated {
    /// First version in which this value is valid.
    fn since(&self) -> SchemaVersion;

    /// Whether this value may be written for `target`.
    fn admitted_in(&self, target: SchemaVersion) -> bool {
        should_emit(Some(self.since()), target)
    }
}

/// Which of the `author`/`authors` pair a target version prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorshipForm {
    /// Single free-text `author`
    Legacy,
    /// List of contact objects under `authors`
    Contacts,
}

/// Preferred authorship representation for `target`.
#[must_use]
pub fn preferred_authorship(target: SchemaVersion) -> AuthorshipForm {
    if Member::ComponentAuthors.admitted_in(target) {
        AuthorshipForm::Contacts
    } else {
        AuthorshipForm::Legacy
    }
}

/// Shape of `metadata.tools` for a target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsForm {
    /// Array of `tool` entries
    Legacy,
    /// Object holding tool `components` and `services`
    Structured,
}

/// Preferred `metadata.tools` shape for `target`.
#[must_use]
pub fn preferred_tools_form(target: SchemaVersion) -> ToolsForm {
    if Member::MetadataToolsObject.admitted_in(target) {
        ToolsForm::Structured
    } else {
        ToolsForm::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_emit_core_rule() {
        for target in SchemaVersion::all() {
            assert!(should_emit(None, *target));
        }
        assert!(should_emit(Some(SchemaVersion::V1_2), SchemaVersion::V1_2));
        assert!(should_emit(Some(SchemaVersion::V1_2), SchemaVersion::V1_6));
        assert!(!should_emit(Some(SchemaVersion::V1_2), SchemaVersion::V1_1));
    }

    #[test]
    fn test_bounded_availability() {
        let modified = Member::ComponentModified.availability();
        assert!(modified.admits(SchemaVersion::V1_0));
        for target in &SchemaVersion::all()[1..] {
            assert!(!modified.admits(*target), "modified leaked into {target}");
        }
    }

    #[test]
    fn test_monotonic_for_open_windows() {
        let members = [
            Member::BomSerialNumber,
            Member::BomMetadata,
            Member::MetadataLifecycles,
            Member::ComponentAuthors,
            Member::ComponentProperties,
            Member::LicenseExpression,
            Member::ServiceTrustZone,
        ];
        for member in members {
            let since = member.availability().since.expect("gated member");
            for target in SchemaVersion::all() {
                assert_eq!(
                    member.admitted_in(*target),
                    *target >= since,
                    "{member:?} @ {target}"
                );
            }
        }
    }

    #[test]
    fn test_authorship_switches_at_1_6() {
        assert_eq!(preferred_authorship(SchemaVersion::V1_5), AuthorshipForm::Legacy);
        assert_eq!(preferred_authorship(SchemaVersion::V1_6), AuthorshipForm::Contacts);
    }

    #[test]
    fn test_tools_shape_switches_at_1_5() {
        assert_eq!(preferred_tools_form(SchemaVersion::V1_4), ToolsForm::Legacy);
        assert_eq!(preferred_tools_form(SchemaVersion::V1_5), ToolsForm::Structured);
    }
}
