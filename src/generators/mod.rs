//! CycloneDX document generators.
//!
//! One [`Bom`] model, two generators behind [`BomGenerator`]. Both share a
//! projection step that applies the version policy, so the XML and JSON
//! output for one target version carry the same content.
//!
//! ```
//! use bom_codec::generators::{render_bom, RenderError};
//! use bom_codec::model::{Bom, Component, ComponentType};
//! use bom_codec::schema::{SchemaVersion, WireFormat};
//!
//! let mut bom = Bom::new();
//! bom.components.push(Component::new(ComponentType::Library, "acme"));
//! let json = render_bom(&bom, WireFormat::Json, SchemaVersion::V1_2)?;
//! assert_eq!(
//!     json,
//!     r#"{"bomFormat":"CycloneDX","specVersion":"1.2","components":[{"type":"library","name":"acme"}]}"#
//! );
//! # Ok::<(), RenderError>(())
//! ```

mod context;
mod json;
mod projection;
mod xml;

pub use context::RenderContext;
pub use json::JsonGenerator;
pub use xml::XmlGenerator;

use crate::error::{CodecError, ErrorContext, OptionContext, Result as CodecResult};
use crate::model::Bom;
use crate::parsers::{parse_bom_bytes_with, ParseOptions};
use crate::schema::{SchemaVersion, WireFormat};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a document
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{format} output is not available for CycloneDX {version}")]
    UnsupportedCombination {
        format: WireFormat,
        version: SchemaVersion,
    },

    #[error("required value missing at {path}")]
    MissingField { path: String },

    #[error("nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },

    #[error("XML writer error: {0}")]
    XmlWriter(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for document generators
pub trait BomGenerator {
    /// Render `bom` for the target version of `ctx`.
    fn generate(&self, bom: &Bom, ctx: &mut RenderContext) -> Result<String, RenderError>;

    /// Render `bom` into `writer`.
    fn write_to(
        &self,
        bom: &Bom,
        ctx: &mut RenderContext,
        writer: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let output = self.generate(bom, ctx)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    /// The format this generator produces
    fn format(&self) -> WireFormat;

    /// Whether this generator can write `version`.
    fn supports(&self, version: SchemaVersion) -> bool;
}

/// Generator for `format`.
#[must_use]
pub fn create_generator(format: WireFormat) -> Box<dyn BomGenerator> {
    match format {
        WireFormat::Xml => Box::new(XmlGenerator::new()),
        WireFormat::Json => Box::new(JsonGenerator::new()),
    }
}

/// Render `bom` as compact `format` output for `target`.
pub fn render_bom(
    bom: &Bom,
    format: WireFormat,
    target: SchemaVersion,
) -> Result<String, RenderError> {
    create_generator(format).generate(bom, &mut RenderContext::new(target))
}

/// Render `bom` into `writer` with explicit options.
pub fn render_bom_to_writer<W: Write>(
    bom: &Bom,
    format: WireFormat,
    ctx: &mut RenderContext,
    writer: &mut W,
) -> Result<(), RenderError> {
    create_generator(format).write_to(bom, ctx, writer)
}

/// Read a document in either format and write it as `format`.
///
/// Without an explicit `target` the version of the input is kept; inputs
/// without a recognisable version are written as the latest version.
pub fn convert(
    input: &[u8],
    format: WireFormat,
    target: Option<SchemaVersion>,
) -> CodecResult<String> {
    let bom =
        parse_bom_bytes_with(input, &ParseOptions::default()).context("reading input document")?;
    let target = target
        .or_else(|| bom.version())
        .unwrap_or_else(SchemaVersion::latest);
    render_bom(&bom, format, target)
        .with_context(|| format!("writing {format} for CycloneDX {target}"))
}

/// Convert the file at `input` into `output`.
///
/// The output format follows the extension of `output` (`.xml` or `.json`).
pub fn convert_file(
    input: &Path,
    output: &Path,
    target: Option<SchemaVersion>,
) -> CodecResult<()> {
    let format = WireFormat::from_path(output).with_context_none(|| {
        format!(
            "cannot infer output format from {}; use a .xml or .json extension",
            output.display()
        )
    })?;
    let content = std::fs::read(input).map_err(|e| CodecError::io(input, e))?;
    let rendered = convert(&content, format, target)
        .with_context(|| format!("converting {}", input.display()))?;
    std::fs::write(output, rendered).map_err(|e| CodecError::io(output, e))
}
