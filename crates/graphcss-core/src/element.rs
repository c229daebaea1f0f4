//! Element kinds and the read-only element view used for style matching.
//!
//! The style engine never owns diagram elements. It reads them through the
//! [`Element`] trait, which exposes exactly what selectors and style
//! functions need:
//!
//! - the element's [`ElementKind`]
//! - its style classes and optional id
//! - its immediate parent (the element that contains it)
//! - its named attributes, such as the `label` text
//!
//! [`DiagramElement`] is a small owned implementation for callers that do not
//! already have a diagram model of their own.
//!
//! # Example
//!
//! ```
//! use graphcss_core::element::{AttributeValue, DiagramElement, Element, ElementKind};
//!
//! let graph = DiagramElement::builder(ElementKind::Graph).build();
//! let vertex = DiagramElement::builder(ElementKind::Vertex)
//!     .parent(&graph)
//!     .attribute("label", AttributeValue::from("Server"))
//!     .build();
//!
//! assert_eq!(vertex.label(), Some("Server"));
//! assert_eq!(vertex.parent().map(|p| p.kind()), Some(ElementKind::Graph));
//! ```

use std::{
    collections::BTreeMap,
    fmt,
    str::FromStr,
    sync::{Arc, Weak},
};

use serde::Deserialize;

use crate::class::ClassName;

/// Name of the attribute holding an element's label text.
pub const LABEL_ATTRIBUTE: &str = "label";

/// The closed set of element kinds that selectors can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A graph or subgraph (cluster).
    Graph,
    /// A node.
    Vertex,
    /// An edge between two vertices.
    Edge,
    /// A label table.
    Table,
    /// A row of a label table.
    Row,
    /// A cell of a label table row.
    Cell,
}

impl ElementKind {
    /// All element kinds, in declaration order.
    pub const ALL: [ElementKind; 6] = [
        Self::Graph,
        Self::Vertex,
        Self::Edge,
        Self::Table,
        Self::Row,
        Self::Cell,
    ];

    /// Returns the lowercase name used in configuration and output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Vertex => "vertex",
            Self::Edge => "edge",
            Self::Table => "table",
            Self::Row => "row",
            Self::Cell => "cell",
        }
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid element kind `{s}`, valid values: graph, vertex, edge, table, row, cell"
                )
            })
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named attribute value of a diagram element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean attribute.
    Flag(bool),
    /// A numeric attribute.
    Number(f64),
    /// A textual attribute.
    Text(String),
}

impl AttributeValue {
    /// Returns the text of a [`AttributeValue::Text`] attribute.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` for empty text; numbers and flags are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for AttributeValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<bool> for AttributeValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Read-only view of a diagram element.
///
/// Implementations must be cheap to query: selectors call these methods for
/// every rule of a cascade set. Elements are shared across threads while
/// styles are resolved, hence the `Send + Sync` bound.
pub trait Element: fmt::Debug + Send + Sync {
    /// The kind of this element.
    fn kind(&self) -> ElementKind;

    /// The style classes assigned to this element.
    fn style_classes(&self) -> &[ClassName];

    /// The element's id label, if any.
    fn id(&self) -> Option<&str> {
        None
    }

    /// The immediately enclosing element, if it still exists.
    fn parent(&self) -> Option<Arc<dyn Element>>;

    /// Looks up a named attribute.
    fn attribute(&self, name: &str) -> Option<&AttributeValue>;

    /// Returns `true` if `class` is one of this element's style classes.
    fn has_style_class(&self, class: ClassName) -> bool {
        self.style_classes().contains(&class)
    }

    /// The element's label text, read from the [`LABEL_ATTRIBUTE`] attribute.
    fn label(&self) -> Option<&str> {
        self.attribute(LABEL_ATTRIBUTE)
            .and_then(AttributeValue::as_text)
    }
}

/// An owned diagram element with a weak link to its parent.
///
/// Parents must be kept alive by the caller; a child whose parent has been
/// dropped behaves like a root element.
#[derive(Debug)]
pub struct DiagramElement {
    kind: ElementKind,
    classes: Vec<ClassName>,
    id: Option<String>,
    parent: Option<Weak<DiagramElement>>,
    attributes: BTreeMap<String, AttributeValue>,
}

impl DiagramElement {
    /// Starts building an element of the given kind.
    pub fn builder(kind: ElementKind) -> DiagramElementBuilder {
        DiagramElementBuilder {
            element: DiagramElement {
                kind,
                classes: Vec::new(),
                id: None,
                parent: None,
                attributes: BTreeMap::new(),
            },
        }
    }

    /// Returns an iterator over the element's attributes, sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Element for DiagramElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn style_classes(&self) -> &[ClassName] {
        &self.classes
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn parent(&self) -> Option<Arc<dyn Element>> {
        let parent = self.parent.as_ref()?.upgrade()?;
        Some(parent)
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// Builder for [`DiagramElement`].
#[derive(Debug)]
pub struct DiagramElementBuilder {
    element: DiagramElement,
}

impl DiagramElementBuilder {
    /// Adds a style class. Duplicates are ignored.
    pub fn class(mut self, class: ClassName) -> Self {
        if !self.element.classes.contains(&class) {
            self.element.classes.push(class);
        }
        self
    }

    /// Sets the element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element.id = Some(id.into());
        self
    }

    /// Sets the enclosing element.
    pub fn parent(mut self, parent: &Arc<DiagramElement>) -> Self {
        self.element.parent = Some(Arc::downgrade(parent));
        self
    }

    /// Sets a named attribute, replacing any previous value.
    pub fn attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.element.attributes.insert(name.into(), value);
        self
    }

    /// Sets the [`LABEL_ATTRIBUTE`] text.
    pub fn label(self, label: impl Into<String>) -> Self {
        self.attribute(LABEL_ATTRIBUTE, AttributeValue::Text(label.into()))
    }

    /// Finishes the element.
    pub fn build(self) -> Arc<DiagramElement> {
        Arc::new(self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_from_str() {
        assert_eq!("vertex".parse::<ElementKind>().unwrap(), ElementKind::Vertex);
        assert_eq!("cell".parse::<ElementKind>().unwrap(), ElementKind::Cell);

        let err = "node".parse::<ElementKind>().unwrap_err();
        assert!(err.contains("invalid element kind `node`"));
    }

    #[test]
    fn test_element_kind_display_matches_from_str() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.to_string().parse::<ElementKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_attribute_value_is_empty() {
        assert!(AttributeValue::from("").is_empty());
        assert!(!AttributeValue::from("x").is_empty());
        assert!(!AttributeValue::from(0.0).is_empty());
        assert!(!AttributeValue::from(false).is_empty());
    }

    #[test]
    fn test_diagram_element_parent_link() {
        let graph = DiagramElement::builder(ElementKind::Graph).build();
        let vertex = DiagramElement::builder(ElementKind::Vertex)
            .parent(&graph)
            .build();
        let table = DiagramElement::builder(ElementKind::Table)
            .parent(&vertex)
            .build();

        let parent = table.parent().expect("table has a parent");
        assert_eq!(parent.kind(), ElementKind::Vertex);
        let grandparent = parent.parent().expect("vertex has a parent");
        assert_eq!(grandparent.kind(), ElementKind::Graph);
        assert!(grandparent.parent().is_none());
    }

    #[test]
    fn test_dropped_parent_is_absent() {
        let vertex = {
            let graph = DiagramElement::builder(ElementKind::Graph).build();
            DiagramElement::builder(ElementKind::Vertex)
                .parent(&graph)
                .build()
        };
        assert!(vertex.parent().is_none());
    }

    #[test]
    fn test_diagram_element_classes_and_attributes() {
        let containment = ClassName::new("Containment").unwrap();
        let edge = DiagramElement::builder(ElementKind::Edge)
            .class(containment)
            .class(containment)
            .id("e1")
            .label("owns")
            .attribute("weight", AttributeValue::from(2.0))
            .build();

        assert_eq!(edge.style_classes(), &[containment]);
        assert!(edge.has_style_class(containment));
        assert_eq!(edge.id(), Some("e1"));
        assert_eq!(edge.label(), Some("owns"));
        assert_eq!(edge.attribute("weight"), Some(&AttributeValue::Number(2.0)));
        assert_eq!(edge.attributes().count(), 2);
    }

    #[test]
    fn test_label_requires_text() {
        let vertex = DiagramElement::builder(ElementKind::Vertex)
            .attribute(LABEL_ATTRIBUTE, AttributeValue::from(3.0))
            .build();
        assert_eq!(vertex.label(), None);
    }
}
