//! Schema registry and version policy.
//!
//! - [`SchemaVersion`] is the ordered registry of CycloneDX releases and
//!   their namespaces.
//! - [`policy`] decides, per member and per enum constant, whether a value
//!   exists in a target version.
//! - [`WireFormat`] names the two serializations.

mod format;
pub mod policy;
mod version;

pub use format::WireFormat;
pub use policy::{
    preferred_authorship, preferred_tools_form, should_emit, Availability, AuthorshipForm,
    Member, ToolsForm, VersionGated,
};
pub use version::{
    SchemaVersion, UnknownVersion, DEPENDENCY_GRAPH_NAMESPACE, DEPENDENCY_GRAPH_PREFIX,
};
