//! Configuration module for bom-codec.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use bom_codec::config::{CodecConfig, ConfigPreset, Validatable};
//! use bom_codec::schema::{SchemaVersion, WireFormat};
//!
//! let config = CodecConfig::from_preset(ConfigPreset::Interop);
//! assert!(config.is_valid());
//!
//! let config = CodecConfig::builder()
//!     .output_format(WireFormat::Json)
//!     .output_version(SchemaVersion::V1_5)
//!     .pretty(true)
//!     .build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.bom-codec.yaml` file in your project root or `~/.config/bom-codec/`:
//!
//! ```yaml
//! output:
//!   format: json
//!   version: "1.5"
//! parsing:
//!   max_depth: 32
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, INTEROP_VERSION, STRICT_MAX_DEPTH};
pub use types::{BehaviorConfig, CodecConfig, CodecConfigBuilder, OutputConfig, ParsingConfig};
pub use validation::{ConfigError, Validatable, MAX_CONFIGURABLE_DEPTH};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `CodecConfig` configuration format.
///
/// The schema documents every option accepted in `.bom-codec.yaml` files and
/// can be used by editors for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(CodecConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
