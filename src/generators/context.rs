//! Per-call render state.

use super::RenderError;
use crate::parsers::DEFAULT_MAX_DEPTH;
use crate::schema::{Member, SchemaVersion, VersionGated};
use std::fmt::Display;

/// Target version and output options for one render call, plus the
/// bookkeeping the generators need while walking the model.
#[derive(Debug, Clone)]
pub struct RenderContext {
    target: SchemaVersion,
    pretty: bool,
    max_depth: usize,
    path: Vec<String>,
    dropped: usize,
}

impl RenderContext {
    /// Context rendering compact output for `target`.
    #[must_use]
    pub fn new(target: SchemaVersion) -> Self {
        Self {
            target,
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
            path: Vec::new(),
            dropped: 0,
        }
    }

    /// Indent the output.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Deepest component / service nesting that may be written.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn target(&self) -> SchemaVersion {
        self.target
    }

    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of values left out because the target version cannot carry them.
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Clear the walk state left by a previous call.
    pub(crate) fn reset(&mut self) {
        self.path.clear();
        self.dropped = 0;
    }

    /// Whether `member` exists in the target version. Present values that
    /// do not are counted as dropped.
    pub(crate) fn admits(&mut self, member: Member, present: bool) -> bool {
        let admitted = member.admitted_in(self.target);
        if !admitted && present {
            self.drop_value(format_args!("{member:?}"));
        }
        admitted
    }

    /// Whether an enumerated value exists in the target version.
    pub(crate) fn admits_value<T: VersionGated + Display>(&mut self, value: &T) -> bool {
        let admitted = value.admitted_in(self.target);
        if !admitted {
            self.drop_value(format_args!("value '{value}'"));
        }
        admitted
    }

    fn drop_value(&mut self, what: std::fmt::Arguments<'_>) {
        self.dropped += 1;
        tracing::debug!(
            target_version = %self.target,
            path = %self.location(),
            "dropping {what} not supported by the target version"
        );
    }

    /// Descend into a nested component, service or dependency.
    pub(crate) fn enter(&mut self, segment: impl Into<String>) -> Result<(), RenderError> {
        if self.path.len() >= self.max_depth {
            return Err(RenderError::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }
        self.path.push(segment.into());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Error for a required value that is absent at the current location.
    pub(crate) fn missing(&self, field: &str) -> RenderError {
        let location = self.location();
        let path = if location.is_empty() {
            field.to_string()
        } else {
            format!("{location}.{field}")
        };
        RenderError::MissingField { path }
    }

    fn location(&self) -> String {
        self.path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HashAlgorithm;

    #[test]
    fn test_missing_field_path() {
        let mut ctx = RenderContext::new(SchemaVersion::V1_4);
        assert!(matches!(
            ctx.missing("name"),
            RenderError::MissingField { ref path } if path == "name"
        ));
        ctx.enter("components[2]").unwrap();
        ctx.enter("components[0]").unwrap();
        match ctx.missing("name") {
            RenderError::MissingField { path } => {
                assert_eq!(path, "components[2].components[0].name");
            }
            other => panic!("unexpected {other:?}"),
        }
        ctx.leave();
        ctx.leave();
    }

    #[test]
    fn test_depth_limit() {
        let mut ctx = RenderContext::new(SchemaVersion::V1_6).with_max_depth(2);
        ctx.enter("a").unwrap();
        ctx.enter("b").unwrap();
        assert!(matches!(
            ctx.enter("c"),
            Err(RenderError::NestingTooDeep { max_depth: 2 })
        ));
    }

    #[test]
    fn test_drops_are_counted() {
        let mut ctx = RenderContext::new(SchemaVersion::V1_1);
        assert!(ctx.admits_value(&HashAlgorithm::Blake3));
        assert!(!ctx.admits_value(&HashAlgorithm::Unknown("K12".into())));
        assert!(ctx.admits_value(&HashAlgorithm::Sha256));
        assert!(!ctx.admits(Member::BomMetadata, true));
        assert!(!ctx.admits(Member::BomServices, false));
        assert_eq!(ctx.dropped_count(), 2);
        ctx.reset();
        assert_eq!(ctx.dropped_count(), 0);
    }
}
