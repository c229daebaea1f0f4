//! Selectors: predicates deciding which elements a rule applies to.
//!
//! A [`Selector`] is an immutable tree. Leaves test a single element (its
//! kind, one of its style classes, or its id); [`Selector::And`] and
//! [`Selector::Or`] combine selectors; [`Selector::Parent`] tests the
//! element's immediate parent.
//!
//! # Specificity
//!
//! Matching yields a specificity score used to rank rules:
//!
//! | Selector | Weight |
//! |----------|--------|
//! | `Any` | 0 |
//! | `Kind` | 1 |
//! | `Class` | 2 |
//! | `Id` | 3 |
//! | `And(a, b)` | `a + b` |
//! | `Or(a, b)` | minimum over the branches that matched |
//! | `Parent(a)` | `a + 1` |
//!
//! A kind qualifier on `Class` or `Id` narrows the match without adding to
//! the weight.

use std::fmt;

use graphcss_core::{
    class::ClassName,
    element::{Element, ElementKind},
};

use crate::{
    rule::Rule,
    style_set::{Style, StyleSet},
};

/// A predicate over an element and its parent chain.
///
/// Selectors compare structurally.
///
/// # Examples
///
/// ```
/// use graphcss::Selector;
/// use graphcss::class::ClassName;
/// use graphcss::element::{DiagramElement, ElementKind};
///
/// let label = ClassName::new("Label").unwrap();
/// let selector = Selector::class(ElementKind::Table, label).with_parent(Selector::graph());
///
/// let graph = DiagramElement::builder(ElementKind::Graph).build();
/// let table = DiagramElement::builder(ElementKind::Table)
///     .class(label)
///     .parent(&graph)
///     .build();
///
/// assert_eq!(selector.match_specificity(table.as_ref()), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches every element.
    Any,
    /// Matches elements of one kind.
    Kind(ElementKind),
    /// Matches elements carrying a style class, optionally of one kind.
    Class {
        kind: Option<ElementKind>,
        class: ClassName,
    },
    /// Matches the element with the given id, optionally of one kind.
    Id {
        kind: Option<ElementKind>,
        id: String,
    },
    /// Matches when both selectors match.
    And(Box<Selector>, Box<Selector>),
    /// Matches when either selector matches.
    Or(Box<Selector>, Box<Selector>),
    /// Matches when the element's immediate parent matches.
    Parent(Box<Selector>),
}

impl Selector {
    pub fn element(kind: ElementKind) -> Self {
        Self::Kind(kind)
    }

    pub fn graph() -> Self {
        Self::Kind(ElementKind::Graph)
    }

    pub fn vertex() -> Self {
        Self::Kind(ElementKind::Vertex)
    }

    pub fn edge() -> Self {
        Self::Kind(ElementKind::Edge)
    }

    pub fn table() -> Self {
        Self::Kind(ElementKind::Table)
    }

    pub fn row() -> Self {
        Self::Kind(ElementKind::Row)
    }

    pub fn cell() -> Self {
        Self::Kind(ElementKind::Cell)
    }

    /// Matches elements of `kind` carrying `class`.
    pub fn class(kind: ElementKind, class: ClassName) -> Self {
        Self::Class {
            kind: Some(kind),
            class,
        }
    }

    /// Matches elements of any kind carrying `class`.
    pub fn any_class(class: ClassName) -> Self {
        Self::Class { kind: None, class }
    }

    /// Matches elements whose id is `id`, of `kind` if given.
    pub fn id(kind: Option<ElementKind>, id: impl Into<String>) -> Self {
        Self::Id {
            kind,
            id: id.into(),
        }
    }

    pub fn and(self, other: Selector) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Selector) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Matches elements whose immediate parent matches `inner`.
    pub fn parent(inner: Selector) -> Self {
        Self::Parent(Box::new(inner))
    }

    /// Narrows this selector to elements whose immediate parent matches
    /// `parent`.
    pub fn with_parent(self, parent: Selector) -> Self {
        self.and(Self::parent(parent))
    }

    /// Returns `true` if this selector matches `element`.
    pub fn matches(&self, element: &dyn Element) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(kind) => element.kind() == *kind,
            Self::Class { kind, class } => {
                kind_matches(*kind, element) && element.has_style_class(*class)
            }
            Self::Id { kind, id } => {
                kind_matches(*kind, element) && element.id() == Some(id.as_str())
            }
            Self::And(left, right) => left.matches(element) && right.matches(element),
            Self::Or(left, right) => left.matches(element) || right.matches(element),
            Self::Parent(inner) => element
                .parent()
                .is_some_and(|parent| inner.matches(parent.as_ref())),
        }
    }

    /// Matches `element` and scores the match in one pass.
    ///
    /// Returns `None` if the selector does not match, otherwise the
    /// specificity of the match.
    pub fn match_specificity(&self, element: &dyn Element) -> Option<u32> {
        match self {
            Self::Any => Some(0),
            Self::Kind(kind) => (element.kind() == *kind).then_some(1),
            Self::Class { kind, class } => {
                (kind_matches(*kind, element) && element.has_style_class(*class)).then_some(2)
            }
            Self::Id { kind, id } => {
                (kind_matches(*kind, element) && element.id() == Some(id.as_str())).then_some(3)
            }
            Self::And(left, right) => {
                let left = left.match_specificity(element)?;
                let right = right.match_specificity(element)?;
                Some(left.saturating_add(right))
            }
            Self::Or(left, right) => {
                match (left.match_specificity(element), right.match_specificity(element)) {
                    (Some(left), Some(right)) => Some(left.min(right)),
                    (left, right) => left.or(right),
                }
            }
            Self::Parent(inner) => {
                let parent = element.parent()?;
                inner
                    .match_specificity(parent.as_ref())
                    .map(|weight| weight.saturating_add(1))
            }
        }
    }

    /// Creates a rule applying `styles` to the elements this selector
    /// matches.
    pub fn with_styles(self, styles: impl IntoIterator<Item = Style>) -> Rule {
        Rule::new(self, styles.into_iter().collect())
    }

    /// Creates a rule applying `styles` to the elements this selector
    /// matches.
    pub fn with_style_set(self, styles: StyleSet) -> Rule {
        Rule::new(self, styles)
    }
}

fn kind_matches(kind: Option<ElementKind>, element: &dyn Element) -> bool {
    kind.is_none_or(|kind| element.kind() == kind)
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Class { kind, class } => {
                if let Some(kind) = kind {
                    write!(f, "{kind}")?;
                }
                write!(f, ".{class}")
            }
            Self::Id { kind, id } => {
                if let Some(kind) = kind {
                    write!(f, "{kind}")?;
                }
                write!(f, "#{id}")
            }
            Self::And(left, right) => write!(f, "({left} & {right})"),
            Self::Or(left, right) => write!(f, "({left} | {right})"),
            Self::Parent(inner) => write!(f, "parent({inner})"),
        }
    }
}
