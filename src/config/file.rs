//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::CodecConfig;
use crate::parsers::DEFAULT_MAX_DEPTH;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".bom-codec.yaml",
    ".bom-codec.yml",
    "bom-codec.yaml",
    "bom-codec.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/bom-codec/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(git_root) = find_git_root() {
        if let Some(path) = find_config_in_dir(&git_root) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("bom-codec")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load a `CodecConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<CodecConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: CodecConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (CodecConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (CodecConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (CodecConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl CodecConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Values in `other` that equal their defaults do not override.
    pub fn merge(&mut self, other: &Self) {
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.version.is_some() {
            self.output.version = other.output.version;
        }
        if other.output.pretty {
            self.output.pretty = true;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }

        if other.parsing.max_depth != DEFAULT_MAX_DEPTH {
            self.parsing.max_depth = other.parsing.max_depth;
        }
        if other.parsing.namespace_rewrite.is_some() {
            self.parsing
                .namespace_rewrite
                .clone_from(&other.parsing.namespace_rewrite);
        }
        if other.parsing.require_bom_format {
            self.parsing.require_bom_format = true;
        }

        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if other.behavior.fail_on_drop {
            self.behavior.fail_on_drop = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = CodecConfig::default();
    format!(
        r"# bom-codec configuration
# Place this file at .bom-codec.yaml in your project root or ~/.config/bom-codec/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# bom-codec Configuration File
# =============================
#
# Place it at:
#   - .bom-codec.yaml in your project root
#   - ~/.config/bom-codec/bom-codec.yaml for global config
#
# CLI arguments always override file settings.

# Output configuration
output:
  # Format: xml, json (omit to keep the input format)
  # format: json
  # CycloneDX version, quoted (omit to keep the input version)
  # version: "1.6"
  # Indent the output
  pretty: false
  # Output file path (omit for stdout)
  # file: bom.cdx.json

# Reader configuration
parsing:
  # Deepest component, service or dependency nesting accepted (1-4096)
  max_depth: 64
  # XML namespaces rewritten to the latest version (omit for all older ones)
  # namespace_rewrite: ["1.4", "1.5"]
  # Reject JSON without "bomFormat": "CycloneDX"
  require_bom_format: false

# Behavior flags
behavior:
  # Suppress non-essential output
  quiet: false
  # Exit non-zero when values are dropped for the target version
  fail_on_drop: false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaVersion, WireFormat};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".bom-codec.yaml");
        std::fs::write(&config_path, "output:\n  pretty: true\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r#"
output:
  format: json
  version: "1.5"
  pretty: true
parsing:
  max_depth: 20
  namespace_rewrite: ["1.3", "1.4"]
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.output.format, Some(WireFormat::Json));
        assert_eq!(config.output.version, Some(SchemaVersion::V1_5));
        assert!(config.output.pretty);
        assert_eq!(config.parsing.max_depth, 20);
        assert_eq!(
            config.parsing.namespace_rewrite,
            Some(vec![SchemaVersion::V1_3, SchemaVersion::V1_4])
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "output: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = CodecConfig::builder()
            .output_format(WireFormat::Xml)
            .max_depth(10)
            .build();
        let overrides = CodecConfig::builder()
            .output_format(WireFormat::Json)
            .output_version(SchemaVersion::V1_4)
            .build();

        base.merge(&overrides);

        assert_eq!(base.output.format, Some(WireFormat::Json));
        assert_eq!(base.output.version, Some(SchemaVersion::V1_4));
        assert_eq!(base.parsing.max_depth, 10);
    }

    #[test]
    fn test_generated_examples_parse() {
        let example = generate_example_config();
        assert!(example.contains("parsing:"));
        let parsed: CodecConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, CodecConfig::default());

        let full: CodecConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, CodecConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "behavior:\n  quiet: true").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
