//! Pipeline orchestration for BOM conversion.
//!
//! Shared parse → render → write logic used by the CLI command handlers.

mod output;
mod parse;
mod render_stage;

pub use output::{write_output, OutputTarget};
pub use parse::{parse_bom_content, parse_bom_with_context, ParsedBom};
pub use render_stage::{render_document, RenderTarget, RenderedBom};

use crate::generators::RenderError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a BOM file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Rendering the target document failed
    #[error("Render failed: {source}")]
    RenderFailed {
        #[source]
        source: RenderError,
    },

    /// Values were dropped and the configuration forbids it
    #[error("{count} value(s) could not be represented in CycloneDX {version}")]
    ValuesDropped { count: usize, version: String },
}

impl PipelineError {
    /// Process exit code for this failure
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ValuesDropped { .. } => exit_codes::VALUES_DROPPED,
            Self::RenderFailed {
                source: RenderError::UnsupportedCombination { .. },
            } => exit_codes::UNSUPPORTED,
            Self::ParseFailed { .. } | Self::RenderFailed { .. } => exit_codes::ERROR,
        }
    }
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Values were dropped while `fail_on_drop` is set
    pub const VALUES_DROPPED: i32 = 1;
    /// The requested format is not available for the requested version
    pub const UNSUPPORTED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
