//! Namespace normalization for XML input.
//!
//! Older CycloneDX namespaces are rewritten to the latest one while the
//! document is tokenized, so the element mapping only has to know one
//! namespace. Which versions are rewritten is an explicit
//! [`NamespacePolicy`]; namespaces that are not registered schema versions,
//! such as the dependency-graph extension, pass through untouched.

use super::traits::ParseError;
use crate::schema::SchemaVersion;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// Which registered namespaces are rewritten to the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePolicy {
    eligible: Vec<SchemaVersion>,
}

impl Default for NamespacePolicy {
    fn default() -> Self {
        Self::all_older()
    }
}

impl NamespacePolicy {
    /// Rewrite every registered version older than the latest.
    #[must_use]
    pub fn all_older() -> Self {
        Self::from_versions(SchemaVersion::all().iter().copied())
    }

    /// Rewrite nothing; only latest-namespace documents are understood.
    #[must_use]
    pub fn none() -> Self {
        Self {
            eligible: Vec::new(),
        }
    }

    /// Rewrite exactly the given versions. The latest version is ignored.
    #[must_use]
    pub fn from_versions(versions: impl IntoIterator<Item = SchemaVersion>) -> Self {
        let mut eligible: Vec<_> = versions
            .into_iter()
            .filter(|v| *v != SchemaVersion::latest())
            .collect();
        eligible.sort();
        eligible.dedup();
        Self { eligible }
    }

    /// Versions whose namespace is rewritten.
    #[must_use]
    pub fn eligible(&self) -> &[SchemaVersion] {
        &self.eligible
    }

    /// Whether `uri` is a namespace this policy rewrites.
    #[must_use]
    pub fn is_eligible(&self, uri: &str) -> bool {
        SchemaVersion::from_namespace(uri).is_some_and(|v| self.eligible.contains(&v))
    }

    /// The namespace `uri` is normalized to.
    #[must_use]
    pub fn rewrite<'a>(&self, uri: &'a str) -> &'a str {
        if self.is_eligible(uri) {
            SchemaVersion::latest().namespace()
        } else {
            uri
        }
    }
}

/// Attribute with its namespace resolved and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// `None` for unprefixed attributes
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// Namespace declaration carried by an element, value already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    /// `None` for the default namespace
    pub prefix: Option<String>,
    pub uri: String,
}

/// Opening tag with resolved names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// `None` when the element is in no namespace
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<XmlAttribute>,
    pub declarations: Vec<XmlDeclaration>,
}

/// Normalized XML token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    Start(XmlElement),
    End,
    Text(String),
}

/// Tokenizer that resolves and normalizes namespaces.
///
/// Self-closing elements are reported as a `Start` followed by an `End`.
/// Comments, processing instructions and declarations are skipped.
pub struct NamespaceNormalizer<'a> {
    reader: NsReader<&'a [u8]>,
    policy: NamespacePolicy,
    pending_end: bool,
}

impl<'a> NamespaceNormalizer<'a> {
    pub fn new(content: &'a str, policy: NamespacePolicy) -> Self {
        let mut reader = NsReader::from_str(content);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            policy,
            pending_end: false,
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<XmlToken>, ParseError> {
        if self.pending_end {
            self.pending_end = false;
            return Ok(Some(XmlToken::End));
        }
        loop {
            let (resolved, event) = self.reader.read_resolved_event()?;
            let namespace = normalize(&self.policy, resolved)?;
            match event {
                Event::Start(e) => {
                    return Ok(Some(XmlToken::Start(self.element(namespace, &e)?)));
                }
                Event::Empty(e) => {
                    self.pending_end = true;
                    return Ok(Some(XmlToken::Start(self.element(namespace, &e)?)));
                }
                Event::End(_) => return Ok(Some(XmlToken::End)),
                Event::Text(t) => {
                    let text = t.unescape()?;
                    if !text.is_empty() {
                        return Ok(Some(XmlToken::Text(text.into_owned())));
                    }
                }
                Event::CData(c) => {
                    let text = std::str::from_utf8(&c)
                        .map_err(|e| ParseError::XmlError(e.to_string()))?;
                    return Ok(Some(XmlToken::Text(text.to_string())));
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    fn element(
        &self,
        namespace: Option<String>,
        start: &BytesStart<'_>,
    ) -> Result<XmlElement, ParseError> {
        let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        let mut declarations = Vec::new();

        for attr in start.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?.into_owned();
            if let Some(ns) = attr.key.as_namespace_binding() {
                let prefix = match ns {
                    quick_xml::name::PrefixDeclaration::Default => None,
                    quick_xml::name::PrefixDeclaration::Named(p) => {
                        Some(String::from_utf8_lossy(p).into_owned())
                    }
                };
                declarations.push(XmlDeclaration {
                    prefix,
                    uri: self.policy.rewrite(value.trim()).to_string(),
                });
                continue;
            }
            let (resolved, local) = self.reader.resolve_attribute(attr.key);
            let attr_namespace = normalize(&self.policy, resolved)?;
            attributes.push(XmlAttribute {
                namespace: attr_namespace,
                local_name: String::from_utf8_lossy(local.as_ref()).into_owned(),
                value,
            });
        }

        Ok(XmlElement {
            namespace,
            local_name,
            attributes,
            declarations,
        })
    }
}

/// Namespace URI of a resolved name after policy rewriting.
fn normalize(
    policy: &NamespacePolicy,
    resolved: ResolveResult<'_>,
) -> Result<Option<String>, ParseError> {
    match resolved {
        ResolveResult::Bound(ns) => {
            let uri = std::str::from_utf8(ns.as_ref())
                .map_err(|e| ParseError::XmlError(e.to_string()))?;
            Ok(Some(policy.rewrite(uri).to_string()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::XmlError(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}
