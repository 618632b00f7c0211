//! Owned XML element tree built from normalized tokens.

use super::namespace::{NamespaceNormalizer, XmlAttribute, XmlToken};
use super::traits::ParseError;
use crate::schema::{SchemaVersion, DEPENDENCY_GRAPH_NAMESPACE};

/// Elements that each add one level of model nesting.
const NESTED_ELEMENTS: [&str; 3] = ["component", "service", "dependency"];

/// Element depth allowed for a document whose model nests `max_depth` levels.
///
/// Each model level takes at most three elements (`component`, `pedigree`,
/// `ancestors`), plus the document prefix and the deepest leaf values.
#[must_use]
pub fn element_limit(max_depth: usize) -> usize {
    max_depth.saturating_mul(3).saturating_add(8)
}

/// Element with resolved names, attributes, children and text content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
    /// Concatenated text content
    pub text: String,
}

impl XmlNode {
    /// Build the tree of the document's root element.
    ///
    /// `max_depth` bounds model nesting: the number of `component`, `service`
    /// and `dependency` elements on any path. Raw element depth is bounded
    /// by [`element_limit`] for the same `max_depth`. Construction is
    /// iterative, so these limits are the only bound on input depth.
    pub fn build(
        mut tokens: NamespaceNormalizer<'_>,
        max_depth: usize,
    ) -> Result<Self, ParseError> {
        let elements = element_limit(max_depth);
        let mut stack: Vec<(XmlNode, usize)> = Vec::new();
        let mut root = None;

        while let Some(token) = tokens.next_token()? {
            match token {
                XmlToken::Start(element) => {
                    if root.is_some() {
                        return Err(ParseError::XmlError(
                            "content after the root element".to_string(),
                        ));
                    }
                    let nesting = stack.last().map_or(0, |(_, n)| *n)
                        + usize::from(NESTED_ELEMENTS.contains(&element.local_name.as_str()));
                    if stack.len() >= elements || nesting > max_depth {
                        return Err(ParseError::NestingTooDeep { max_depth });
                    }
                    let node = XmlNode {
                        namespace: element.namespace,
                        name: element.local_name,
                        attributes: element.attributes,
                        children: Vec::new(),
                        text: String::new(),
                    };
                    stack.push((node, nesting));
                }
                XmlToken::End => {
                    let (node, _) = stack.pop().ok_or_else(|| {
                        ParseError::XmlError("unbalanced closing tag".to_string())
                    })?;
                    match stack.last_mut() {
                        Some((parent, _)) => parent.children.push(node),
                        None => root = Some(node),
                    }
                }
                XmlToken::Text(text) => match stack.last_mut() {
                    Some((node, _)) => node.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::XmlError(
                            "text outside the root element".to_string(),
                        ))
                    }
                },
            }
        }

        if !stack.is_empty() {
            return Err(ParseError::XmlError("unexpected end of document".to_string()));
        }
        root.ok_or_else(|| ParseError::InvalidStructure("document has no root element".to_string()))
    }

    /// Whether the element is in the core namespace. Elements in no
    /// namespace are treated as core.
    #[must_use]
    pub fn is_core(&self) -> bool {
        self.namespace
            .as_deref()
            .map_or(true, |ns| ns == SchemaVersion::latest().namespace())
    }

    /// Whether the element is in the dependency-graph extension namespace.
    #[must_use]
    pub fn is_dependency_graph(&self) -> bool {
        self.namespace.as_deref() == Some(DEPENDENCY_GRAPH_NAMESPACE)
    }

    /// Value of an unqualified attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.local_name == name)
            .map(|a| a.value.as_str())
    }

    /// Unqualified attribute, trimmed, `None` when empty.
    #[must_use]
    pub fn attr_string(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// First core child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.is_core() && c.name == name)
    }

    /// All core children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.is_core() && c.name == name)
    }

    /// Trimmed text of the first core child named `name`, `None` when absent or empty.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(XmlNode::text_value)
    }

    /// Trimmed text content, `None` when empty.
    #[must_use]
    pub fn text_value(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Trimmed text content, empty when the element has none.
    #[must_use]
    pub fn trimmed_text(&self) -> String {
        self.text.trim().to_string()
    }

    /// Trimmed text of every core grandchild `item` under the core child
    /// `wrapper`. Empty items are kept.
    #[must_use]
    pub fn wrapped_texts(&self, wrapper: &str, item: &str) -> Vec<String> {
        self.child(wrapper)
            .map(|w| w.children_named(item).map(XmlNode::trimmed_text).collect())
            .unwrap_or_default()
    }

    /// Move every element in namespace `from` into the latest core namespace.
    pub fn adopt_namespace(&mut self, from: &str) {
        let latest = SchemaVersion::latest().namespace();
        let mut pending: Vec<&mut XmlNode> = vec![self];
        while let Some(node) = pending.pop() {
            if node.namespace.as_deref() == Some(from) {
                node.namespace = Some(latest.to_string());
            }
            pending.extend(node.children.iter_mut());
        }
    }
}
