//! Configuration types for bom-codec operations.

use crate::generators::RenderContext;
use crate::parsers::{NamespacePolicy, ParseOptions, DEFAULT_MAX_DEPTH};
use crate::schema::{SchemaVersion, WireFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a config file and/or CLI arguments
/// (CLI values override file values).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CodecConfig {
    /// Output format, version and layout
    pub output: OutputConfig,
    /// Reader limits and namespace handling
    pub parsing: ParsingConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl CodecConfig {
    /// Create a new `CodecConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `CodecConfig` builder.
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Reader options described by this configuration.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        let namespace_policy = match &self.parsing.namespace_rewrite {
            Some(versions) => NamespacePolicy::from_versions(versions.iter().copied()),
            None => NamespacePolicy::default(),
        };
        ParseOptions {
            max_depth: self.parsing.max_depth,
            namespace_policy,
            require_bom_format: self.parsing.require_bom_format,
        }
    }

    /// Render context for `target` using the output layout and depth limit.
    #[must_use]
    pub fn render_context(&self, target: SchemaVersion) -> RenderContext {
        RenderContext::new(target)
            .pretty(self.output.pretty)
            .with_max_depth(self.parsing.max_depth)
    }
}

// ============================================================================
// Builder for CodecConfig
// ============================================================================

/// Builder for constructing `CodecConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the output format.
    pub const fn output_format(mut self, format: WireFormat) -> Self {
        self.config.output.format = Some(format);
        self
    }

    /// Set the output schema version.
    pub const fn output_version(mut self, version: SchemaVersion) -> Self {
        self.config.output.version = Some(version);
        self
    }

    /// Indent the output.
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.output.pretty = pretty;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Set the nesting limit.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.parsing.max_depth = max_depth;
        self
    }

    /// Restrict the namespaces rewritten to the latest version.
    pub fn namespace_rewrite(mut self, versions: Vec<SchemaVersion>) -> Self {
        self.config.parsing.namespace_rewrite = Some(versions);
        self
    }

    /// Reject JSON documents without `bomFormat`.
    pub const fn require_bom_format(mut self, require: bool) -> Self {
        self.config.parsing.require_bom_format = require;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> CodecConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format; defaults to the input format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<WireFormat>,
    /// Output schema version; defaults to the input version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<SchemaVersion>,
    /// Indent the output
    pub pretty: bool,
    /// Output file path (stdout when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Reader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParsingConfig {
    /// Deepest element / object nesting accepted by readers and written by generators
    pub max_depth: usize,
    /// Versions whose XML namespace is rewritten to the latest; all older
    /// versions when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_rewrite: Option<Vec<SchemaVersion>>,
    /// Reject JSON documents without a `bomFormat` marker
    pub require_bom_format: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            namespace_rewrite: None,
            require_bom_format: false,
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Fail when values are dropped because the target version cannot carry them
    pub fail_on_drop: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = CodecConfig::builder()
            .output_format(WireFormat::Json)
            .output_version(SchemaVersion::V1_4)
            .pretty(true)
            .max_depth(16)
            .require_bom_format(true)
            .build();
        assert_eq!(config.output.format, Some(WireFormat::Json));
        assert_eq!(config.output.version, Some(SchemaVersion::V1_4));
        assert!(config.output.pretty);

        let options = config.parse_options();
        assert_eq!(options.max_depth, 16);
        assert!(options.require_bom_format);

        let ctx = config.render_context(SchemaVersion::V1_4);
        assert!(ctx.is_pretty());
        assert_eq!(ctx.max_depth(), 16);
    }

    #[test]
    fn test_namespace_rewrite_option() {
        let config = CodecConfig::builder()
            .namespace_rewrite(vec![SchemaVersion::V1_5])
            .build();
        let policy = config.parse_options().namespace_policy;
        assert_eq!(policy.eligible(), &[SchemaVersion::V1_5]);
        assert!(!policy.is_eligible(SchemaVersion::V1_0.namespace()));

        let policy = CodecConfig::default().parse_options().namespace_policy;
        assert!(policy.is_eligible(SchemaVersion::V1_0.namespace()));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = CodecConfig::builder()
            .output_version(SchemaVersion::V1_3)
            .build();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("version: '1.3'") || yaml.contains("version: \"1.3\""));
        let back: CodecConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
