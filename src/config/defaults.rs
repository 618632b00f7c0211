//! Default configurations and presets for bom-codec.
//!
//! Provides named presets for common use cases and default values.

use super::types::{BehaviorConfig, CodecConfig, OutputConfig, ParsingConfig};
use crate::schema::{SchemaVersion, WireFormat};

/// Nesting limit used by the strict preset.
pub const STRICT_MAX_DEPTH: usize = 32;

/// Version targeted by the interop preset; the newest one most consumers read.
pub const INTEROP_VERSION: SchemaVersion = SchemaVersion::V1_4;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Keep the input format and version
    Default,
    /// Require `bomFormat`, tighter nesting limit, fail on dropped values
    Strict,
    /// Pretty JSON 1.4 for consumers that lag behind the schema
    Interop,
    /// Pretty XML at the latest version
    Archive,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Interop => "interop",
            Self::Archive => "archive",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" => Some(Self::Strict),
            "interop" | "compat" => Some(Self::Interop),
            "archive" | "latest" => Some(Self::Archive),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Keep the input format and schema version",
            Self::Strict => "Require bomFormat, limit nesting to 32 and fail on dropped values",
            Self::Interop => "Pretty-printed JSON at CycloneDX 1.4",
            Self::Archive => "Pretty-printed XML at the latest CycloneDX version",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Interop, Self::Archive]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl CodecConfig {
    /// Create a `CodecConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Interop => Self::interop_preset(),
            ConfigPreset::Archive => Self::archive_preset(),
        }
    }

    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            output: OutputConfig::default(),
            parsing: ParsingConfig {
                max_depth: STRICT_MAX_DEPTH,
                namespace_rewrite: None,
                require_bom_format: true,
            },
            behavior: BehaviorConfig {
                quiet: false,
                fail_on_drop: true,
            },
        }
    }

    #[must_use]
    pub fn interop_preset() -> Self {
        Self {
            output: OutputConfig {
                format: Some(WireFormat::Json),
                version: Some(INTEROP_VERSION),
                pretty: true,
                file: None,
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn archive_preset() -> Self {
        Self {
            output: OutputConfig {
                format: Some(WireFormat::Xml),
                version: Some(SchemaVersion::latest()),
                pretty: true,
                file: None,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("LATEST"), Some(ConfigPreset::Archive));
        assert_eq!(ConfigPreset::from_name("bogus"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in ConfigPreset::all() {
            let config = CodecConfig::from_preset(*preset);
            assert!(config.is_valid(), "{preset} preset should validate");
        }
    }

    #[test]
    fn test_strict_preset() {
        let config = CodecConfig::from_preset(ConfigPreset::Strict);
        assert!(config.parsing.require_bom_format);
        assert!(config.behavior.fail_on_drop);
        assert_eq!(config.parsing.max_depth, STRICT_MAX_DEPTH);
    }
}
