//! Configuration validation for bom-codec.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{BehaviorConfig, CodecConfig, OutputConfig, ParsingConfig};
use crate::schema::{SchemaVersion, WireFormat};

/// Largest nesting limit accepted from configuration.
pub const MAX_CONFIGURABLE_DEPTH: usize = 4096;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with every validation error joined into one message.
    fn ensure_valid(&self) -> crate::error::Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Err(crate::error::CodecError::config(messages.join("; ")))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for CodecConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.parsing.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let (Some(WireFormat::Json), Some(version)) = (self.format, self.version) {
            if !version.has_json_format() {
                errors.push(ConfigError {
                    field: "output.version".to_string(),
                    message: format!(
                        "JSON output requires CycloneDX 1.2 or later, got {version}"
                    ),
                });
            }
        }

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for ParsingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.max_depth == 0 || self.max_depth > MAX_CONFIGURABLE_DEPTH {
            errors.push(ConfigError {
                field: "parsing.max_depth".to_string(),
                message: format!(
                    "max_depth must be between 1 and {MAX_CONFIGURABLE_DEPTH}, got {}",
                    self.max_depth
                ),
            });
        }

        if let Some(ref versions) = self.namespace_rewrite {
            if versions.contains(&SchemaVersion::latest()) {
                errors.push(ConfigError {
                    field: "parsing.namespace_rewrite".to_string(),
                    message: format!(
                        "{} is the rewrite target and cannot be listed",
                        SchemaVersion::latest()
                    ),
                });
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CodecConfig::default().is_valid());
    }

    #[test]
    fn test_json_below_1_2_is_rejected() {
        let config = CodecConfig::builder()
            .output_format(WireFormat::Json)
            .output_version(SchemaVersion::V1_1)
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.version");

        let config = CodecConfig::builder()
            .output_format(WireFormat::Xml)
            .output_version(SchemaVersion::V1_1)
            .build();
        assert!(config.is_valid());
    }

    #[test]
    fn test_depth_bounds() {
        let config = CodecConfig::builder().max_depth(0).build();
        assert_eq!(config.validate()[0].field, "parsing.max_depth");
        let config = CodecConfig::builder().max_depth(MAX_CONFIGURABLE_DEPTH + 1).build();
        assert!(!config.is_valid());
        let config = CodecConfig::builder().max_depth(1).build();
        assert!(config.is_valid());
    }

    #[test]
    fn test_latest_cannot_be_rewritten() {
        let config = CodecConfig::builder()
            .namespace_rewrite(vec![SchemaVersion::V1_5, SchemaVersion::latest()])
            .build();
        assert_eq!(config.validate()[0].field, "parsing.namespace_rewrite");
    }

    #[test]
    fn test_missing_output_directory() {
        let config = CodecConfig::builder()
            .output_file(Some(PathBuf::from("/nonexistent/dir/bom.xml")))
            .build();
        let errors = config.validate();
        assert_eq!(errors[0].field, "output.file");
        assert!(errors[0].to_string().starts_with("output.file: Parent directory"));
    }

    #[test]
    fn test_ensure_valid_joins_errors() {
        let config = CodecConfig::builder()
            .output_format(WireFormat::Json)
            .output_version(SchemaVersion::V1_0)
            .max_depth(0)
            .build();
        let err = config.ensure_valid().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid configuration: output.version"));
        assert!(message.contains("; parsing.max_depth"));
        assert!(CodecConfig::default().ensure_valid().is_ok());
    }
}
