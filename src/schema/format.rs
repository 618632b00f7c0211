//! Wire format identifiers.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Serialization of a BOM document on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// XML dialect, namespaced per schema version
    Xml,
    /// JSON dialect with `bomFormat`/`specVersion` markers
    Json,
}

impl WireFormat {
    /// Customary file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    /// Guess the format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xml" => Some(Self::Xml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "XML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            WireFormat::from_path(Path::new("bom.cdx.json")),
            Some(WireFormat::Json)
        );
        assert_eq!(
            WireFormat::from_path(Path::new("out/BOM.XML")),
            Some(WireFormat::Xml)
        );
        assert_eq!(WireFormat::from_path(Path::new("bom.yaml")), None);
        assert_eq!(WireFormat::from_path(Path::new("bom")), None);
    }
}
