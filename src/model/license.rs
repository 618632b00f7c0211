//! License data structures and SPDX identifier checks.
//!
//! A license slot holds either a list of individual licenses or a single
//! SPDX expression, never both. Uses the `spdx` crate to classify ids and
//! expressions; classification is informational and never rejects input.

use super::Property;
use std::fmt;

/// Contents of a `licenses` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseChoice {
    /// One or more individual licenses
    Licenses(Vec<License>),
    /// A single SPDX license expression (1.1+)
    Expression(LicenseExpression),
}

impl LicenseChoice {
    /// Build a choice from what a document carried.
    ///
    /// When both a list and an expression are present the list wins.
    /// Returns `None` when neither is present.
    #[must_use]
    pub fn from_parts(
        licenses: Vec<License>,
        expression: Option<LicenseExpression>,
    ) -> Option<Self> {
        if !licenses.is_empty() {
            Some(Self::Licenses(licenses))
        } else {
            expression.map(Self::Expression)
        }
    }

    /// Individual licenses, empty for an expression.
    #[must_use]
    pub fn licenses(&self) -> &[License] {
        match self {
            Self::Licenses(list) => list,
            Self::Expression(_) => &[],
        }
    }

    /// The expression, if this choice is one.
    #[must_use]
    pub fn expression(&self) -> Option<&LicenseExpression> {
        match self {
            Self::Licenses(_) => None,
            Self::Expression(expr) => Some(expr),
        }
    }

    /// Whether the slot carries nothing to write.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Licenses(list) => list.is_empty(),
            Self::Expression(expr) => expr.expression.trim().is_empty(),
        }
    }
}

/// Either an SPDX identifier or a free-form license name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LicenseIdentity {
    Id(String),
    Name(String),
}

impl LicenseIdentity {
    /// The identifier or name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(s) | Self::Name(s) => s,
        }
    }
}

/// How a license was established (1.6+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LicenseAcknowledgement {
    Declared,
    Concluded,
}

impl LicenseAcknowledgement {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "declared" => Some(Self::Declared),
            "concluded" => Some(Self::Concluded),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::Concluded => "concluded",
        }
    }
}

/// Text attached inline, such as a full license text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedText {
    pub content_type: Option<String>,
    /// `base64` when `content` is encoded
    pub encoding: Option<String>,
    pub content: String,
}

impl AttachedText {
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content_type: None,
            encoding: None,
            content: content.into(),
        }
    }
}

/// A single license entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub identity: LicenseIdentity,
    pub text: Option<AttachedText>,
    /// Link to the license text (1.1+)
    pub url: Option<String>,
    pub bom_ref: Option<String>,
    pub acknowledgement: Option<LicenseAcknowledgement>,
    pub properties: Vec<Property>,
}

impl License {
    /// License identified by an SPDX id.
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::with_identity(LicenseIdentity::Id(id.into()))
    }

    /// License identified by a free-form name.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::with_identity(LicenseIdentity::Name(name.into()))
    }

    fn with_identity(identity: LicenseIdentity) -> Self {
        Self {
            identity,
            text: None,
            url: None,
            bom_ref: None,
            acknowledgement: None,
            properties: Vec::new(),
        }
    }

    /// Whether the `id` names a license on the SPDX license list.
    ///
    /// Always `false` for name-identified licenses.
    #[must_use]
    pub fn is_spdx_listed(&self) -> bool {
        match &self.identity {
            LicenseIdentity::Id(id) => spdx::license_id(id).is_some(),
            LicenseIdentity::Name(_) => false,
        }
    }
}

/// SPDX license expression with its optional attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseExpression {
    /// The raw expression string
    pub expression: String,
    pub bom_ref: Option<String>,
    pub acknowledgement: Option<LicenseAcknowledgement>,
}

impl LicenseExpression {
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            bom_ref: None,
            acknowledgement: None,
        }
    }

    /// Whether the expression parses as SPDX.
    ///
    /// Lax parsing accepts common spellings such as `Apache2` or `/` for `OR`.
    #[must_use]
    pub fn is_valid_spdx(&self) -> bool {
        let expr = self.expression.trim();
        if expr.is_empty() || expr.contains("NOASSERTION") {
            return false;
        }
        spdx::Expression::parse_mode(expr, spdx::ParseMode::LAX).is_ok()
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_wins_over_expression() {
        let choice = LicenseChoice::from_parts(
            vec![License::id("MIT")],
            Some(LicenseExpression::new("Apache-2.0")),
        );
        assert_eq!(
            choice,
            Some(LicenseChoice::Licenses(vec![License::id("MIT")]))
        );
        assert_eq!(LicenseChoice::from_parts(Vec::new(), None), None);
        let expr = LicenseChoice::from_parts(Vec::new(), Some(LicenseExpression::new("MIT")));
        assert_eq!(
            expr.and_then(|c| c.expression().cloned()).map(|e| e.expression),
            Some("MIT".into())
        );
    }

    #[test]
    fn test_spdx_classification() {
        assert!(License::id("Apache-2.0").is_spdx_listed());
        assert!(!License::id("Acme-Proprietary").is_spdx_listed());
        assert!(!License::name("MIT").is_spdx_listed());
        assert!(LicenseExpression::new("MIT OR Apache-2.0").is_valid_spdx());
        assert!(!LicenseExpression::new("").is_valid_spdx());
    }
}
