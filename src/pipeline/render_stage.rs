//! Rendering stage: choose the target and write the document.

use super::{ParsedBom, PipelineError};
use crate::config::OutputConfig;
use crate::generators::{create_generator, RenderContext, RenderError};
use crate::model::Bom;
use crate::schema::{SchemaVersion, WireFormat};

/// Format and version a document is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub format: WireFormat,
    pub version: SchemaVersion,
}

impl RenderTarget {
    /// Configured values win, then the output file's extension; otherwise the
    /// source document's format and version are kept. Unversioned sources are
    /// written as the latest version.
    #[must_use]
    pub fn resolve(parsed: &ParsedBom, output: &OutputConfig) -> Self {
        Self {
            format: output
                .format
                .or_else(|| output.file.as_deref().and_then(WireFormat::from_path))
                .unwrap_or_else(|| parsed.format()),
            version: output
                .version
                .or_else(|| parsed.version())
                .unwrap_or_else(SchemaVersion::latest),
        }
    }
}

/// Rendered output and what was lost on the way.
#[derive(Debug)]
pub struct RenderedBom {
    pub content: String,
    pub target: RenderTarget,
    /// Values the target version could not carry
    pub dropped: usize,
}

/// Render `bom` for `target` using the layout and limits in `ctx`.
pub fn render_document(
    bom: &Bom,
    target: RenderTarget,
    ctx: &mut RenderContext,
) -> Result<RenderedBom, PipelineError> {
    let generator = create_generator(target.format);
    if !generator.supports(target.version) {
        return Err(PipelineError::RenderFailed {
            source: RenderError::UnsupportedCombination {
                format: target.format,
                version: target.version,
            },
        });
    }

    let content = generator
        .generate(bom, ctx)
        .map_err(|source| PipelineError::RenderFailed { source })?;
    let dropped = ctx.dropped_count();
    if dropped > 0 {
        tracing::warn!(
            "{dropped} value(s) not representable in CycloneDX {} were dropped",
            target.version
        );
    }

    Ok(RenderedBom {
        content,
        target,
        dropped,
    })
}
