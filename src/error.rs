//! Unified error types for bom-codec.
//!
//! Parsers and generators report their own error enums ([`ParseError`],
//! [`RenderError`]). [`CodecError`] wraps them with a chain of context
//! strings for the pipeline and the CLI.

use crate::generators::RenderError;
use crate::parsers::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bom-codec operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CodecError {
    /// Errors while reading a document
    #[error("Failed to parse BOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// Errors while writing a document
    #[error("Failed to render BOM: {context}")]
    Render {
        context: String,
        #[source]
        source: RenderError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenient Result type for bom-codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a render error with context
    pub fn render(context: impl Into<String>, source: RenderError) -> Self {
        Self::Render {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<ParseError> for CodecError {
    fn from(err: ParseError) -> Self {
        Self::parse(String::new(), err)
    }
}

impl From<RenderError> for CodecError {
    fn from(err: RenderError) -> Self {
        Self::render(String::new(), err)
    }
}

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use bom_codec::error::ErrorContext;
///
/// let bytes = std::fs::read(path).context("reading BOM file")?;
/// let bom = parse_bom_bytes(&bytes)
///     .with_context(|| format!("parsing {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error, prepending it to any existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CodecError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: CodecError, new_ctx: &str) -> CodecError {
    match err {
        CodecError::Parse {
            context: existing,
            source,
        } => CodecError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CodecError::Render {
            context: existing,
            source,
        } => CodecError::Render {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CodecError::Io {
            path,
            message,
            source,
        } => CodecError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CodecError::Config(msg) => CodecError::Config(chain_context(new_ctx, &msg)),
        CodecError::Validation(msg) => CodecError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// "`new`: `existing`", or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a validation error with the given message.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to a validation error with a lazily built message.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| CodecError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| CodecError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::parse(
            "reading input",
            ParseError::UnsupportedFormat("leading byte 0x20".into()),
        );
        assert!(err.to_string().contains("reading input"));

        let err = CodecError::render(
            "",
            RenderError::MissingField {
                path: "components[0].name".into(),
            },
        );
        assert!(err.to_string().contains("render"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CodecError::io("/path/to/bom.xml", io_err);
        assert!(err.to_string().contains("/path/to/bom.xml"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(CodecError::parse(
                "base",
                ParseError::InvalidStructure("no root".into()),
            ))
        }
        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(CodecError::Parse { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_converts_with_context() {
        let result: std::result::Result<(), ParseError> =
            Err(ParseError::JsonError("EOF".into()));
        match result.context("parsing stdin") {
            Err(CodecError::Parse { context, source }) => {
                assert_eq!(context, "parsing stdin");
                assert!(matches!(source, ParseError::JsonError(_)));
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_is_lazy() {
        let mut called = false;
        let ok: Result<i32> = Ok(42);
        let _ = ok.with_context(|| {
            called = true;
            "unused"
        });
        assert!(!called);
    }

    #[test]
    fn test_option_context() {
        assert_eq!(Some(42).context_none("missing value").ok(), Some(42));
        match None::<i32>.context_none("missing value") {
            Err(CodecError::Validation(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
