//! **A version-aware codec for CycloneDX Bills of Materials.**
//!
//! `bom-codec` reads CycloneDX BOMs written in XML or JSON, for any schema
//! version from 1.0 to 1.6, into one in-memory model, and writes that model
//! back out for any target version and format. Fields and enumeration values
//! the target version does not know are dropped; required fields that are
//! missing are reported with the path to the offending element.
//!
//! ## Core Concepts & Modules
//!
//! - **[`schema`]**: The version registry ([`SchemaVersion`]), the wire
//!   formats ([`WireFormat`]) and the policy that decides which members and
//!   values each version admits.
//! - **[`model`]**: The format-independent [`Bom`] and its parts. The model is
//!   a superset of every schema version.
//! - **[`parsers`]**: Format and version detection, namespace normalization
//!   and the XML and JSON readers.
//! - **[`generators`]**: The XML and JSON writers. Both share one projection
//!   of the model, so the two formats always carry the same content.
//! - **[`config`]** and **[`pipeline`]**: YAML configuration and the
//!   parse → render → write steps used by the command-line tool.
//!
//! ## Getting Started
//!
//! ```
//! use bom_codec::{convert, SchemaVersion, WireFormat};
//!
//! let xml = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.0" version="1">
//!   <components>
//!     <component type="library"><name>acme</name><version>1.0</version></component>
//!   </components>
//! </bom>"#;
//!
//! let json = convert(xml.as_bytes(), WireFormat::Json, Some(SchemaVersion::V1_2))?;
//! assert!(json.contains(r#""specVersion":"1.2""#));
//! # Ok::<(), bom_codec::CodecError>(())
//! ```
//!
//! ### Building a BOM in code
//!
//! ```
//! use bom_codec::model::{Bom, Component, ComponentType};
//! use bom_codec::{render_bom, SchemaVersion, WireFormat};
//!
//! let mut bom = Bom::new();
//! bom.components.push(Component::new(ComponentType::Library, "acme"));
//!
//! let xml = render_bom(&bom, WireFormat::Xml, SchemaVersion::V1_1)?;
//! assert!(xml.contains("http://cyclonedx.org/schema/bom/1.1"));
//! # Ok::<(), bom_codec::generators::RenderError>(())
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `bom-codec` library crate. The `bom-codec`
//! binary wraps it with `convert` and `detect` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod generators;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod schema;
pub mod wire;

// Re-export main types for convenience
pub use config::{CodecConfig, CodecConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{CodecError, ErrorContext, OptionContext, Result};
pub use generators::{
    convert, convert_file, create_generator, render_bom, render_bom_to_writer, BomGenerator,
    RenderContext, RenderError,
};
pub use model::Bom;
pub use parsers::{
    create_parser, parse_bom, parse_bom_bytes, parse_bom_reader, parse_bom_str, BomParser,
    DetectionResult, FormatDetector, ParseError, ParseOptions,
};
pub use schema::{SchemaVersion, WireFormat};
