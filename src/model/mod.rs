//! In-memory BOM document model.
//!
//! The model is independent of wire format and schema version: it holds the
//! union of what any supported version can express. Parsers fill it from a
//! document; generators project it onto one target version, dropping what
//! that version cannot carry.
//!
//! Version-dependent representations that need more than a presence check
//! expose a `for_version` accessor:
//!
//! ```ignore
//! match component.authorship.for_version(SchemaVersion::V1_4) {
//!     Some(AuthorshipView::Legacy(text)) => { /* write <author> */ }
//!     Some(AuthorshipView::Contacts(list)) => { /* write <authors> */ }
//!     None => {}
//! }
//! ```

mod bom;
mod bom_link;
mod component;
mod dependency;
mod hash;
mod license;
mod metadata;
mod reference;
mod service;

pub use bom::Bom;
pub use bom_link::{BomLink, BomLinkError};
pub use component::{Authorship, AuthorshipView, Component, ComponentScope, ComponentType, Pedigree};
pub use dependency::Dependency;
pub use hash::{Hash, HashAlgorithm};
pub use license::{
    AttachedText, License, LicenseAcknowledgement, LicenseChoice, LicenseExpression,
    LicenseIdentity,
};
pub use metadata::{
    Lifecycle, LifecyclePhase, Metadata, OrganizationalContact, OrganizationalEntity, Tool, Tools,
    ToolsView,
};
pub use reference::{ExternalReference, ExternalReferenceType, Property};
pub use service::Service;
