//! CycloneDX schema version registry.
//!
//! Every schema revision is bound to its XML namespace URI and its
//! `specVersion` string. The registry is a static table; lookups never
//! allocate and the ordering of [`SchemaVersion`] follows release order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace of the XML-only dependency graph extension used by 1.1 documents.
pub const DEPENDENCY_GRAPH_NAMESPACE: &str = "http://cyclonedx.org/schema/ext/dependency-graph/1.0";

/// Conventional prefix bound to [`DEPENDENCY_GRAPH_NAMESPACE`].
pub const DEPENDENCY_GRAPH_PREFIX: &str = "dg";

/// A released CycloneDX schema version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum SchemaVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
    #[serde(rename = "1.3")]
    V1_3,
    #[serde(rename = "1.4")]
    V1_4,
    #[serde(rename = "1.5")]
    V1_5,
    #[serde(rename = "1.6")]
    V1_6,
}

/// Error returned when a version string names no registered schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown CycloneDX schema version '{0}' (known: 1.0-1.6)")]
pub struct UnknownVersion(pub String);

const ALL: [SchemaVersion; 7] = [
    SchemaVersion::V1_0,
    SchemaVersion::V1_1,
    SchemaVersion::V1_2,
    SchemaVersion::V1_3,
    SchemaVersion::V1_4,
    SchemaVersion::V1_5,
    SchemaVersion::V1_6,
];

impl SchemaVersion {
    /// All registered versions, oldest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL
    }

    /// The newest registered version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1_6
    }

    /// The oldest registered version.
    #[must_use]
    pub const fn oldest() -> Self {
        Self::V1_0
    }

    /// Canonical XML namespace URI of this version.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::V1_0 => "http://cyclonedx.org/schema/bom/1.0",
            Self::V1_1 => "http://cyclonedx.org/schema/bom/1.1",
            Self::V1_2 => "http://cyclonedx.org/schema/bom/1.2",
            Self::V1_3 => "http://cyclonedx.org/schema/bom/1.3",
            Self::V1_4 => "http://cyclonedx.org/schema/bom/1.4",
            Self::V1_5 => "http://cyclonedx.org/schema/bom/1.5",
            Self::V1_6 => "http://cyclonedx.org/schema/bom/1.6",
        }
    }

    /// Version string as written in `specVersion`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
            Self::V1_5 => "1.5",
            Self::V1_6 => "1.6",
        }
    }

    /// Position in release order, starting at 0 for 1.0.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up the version declared by a namespace URI.
    ///
    /// Matching is exact; a trailing slash or different scheme is not a match.
    #[must_use]
    pub fn from_namespace(uri: &str) -> Option<Self> {
        ALL.iter().copied().find(|v| v.namespace() == uri)
    }

    /// Look up a version by its `specVersion` string.
    #[must_use]
    pub fn from_version_str(value: &str) -> Option<Self> {
        ALL.iter().copied().find(|v| v.as_str() == value.trim())
    }

    /// Whether JSON documents exist for this version (JSON arrived with 1.2).
    #[must_use]
    pub fn has_json_format(self) -> bool {
        self >= Self::V1_2
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_version_str(s).ok_or_else(|| UnknownVersion(s.to_string()))
    }
}
