//! Style values: literals and deferred functions.
//!
//! A [`StyleValue`] is either a [`Value`] fixed when the rule was written, or
//! a [`StyleFunction`] computed from the element when the renderer asks for
//! it. Cascade resolution moves style values around without looking inside;
//! only [`StyleValue::evaluate`] runs functions.

use std::{fmt, sync::Arc};

use log::warn;

use graphcss_core::{
    color::Color,
    draw::{Alignment, Arrow, EdgeDirection, LineBrush, NodeShape, VerticalAlignment},
    element::Element,
};

use crate::{label::LabelFormat, property::ValueDomain};

/// A concrete, typed style value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Color(Color),
    Text(String),
    Number(f64),
    Flag(bool),
    Shape(NodeShape),
    LineBrush(LineBrush),
    Arrow(Arrow),
    Direction(EdgeDirection),
    Alignment(Alignment),
    VerticalAlignment(VerticalAlignment),
    LabelFormat(LabelFormat),
}

impl Value {
    /// Returns the domain this value belongs to.
    pub fn domain(&self) -> ValueDomain {
        match self {
            Self::Color(_) => ValueDomain::Color,
            Self::Text(_) => ValueDomain::Text,
            Self::Number(_) => ValueDomain::Number,
            Self::Flag(_) => ValueDomain::Flag,
            Self::Shape(_) => ValueDomain::Shape,
            Self::LineBrush(_) => ValueDomain::LineBrush,
            Self::Arrow(_) => ValueDomain::Arrow,
            Self::Direction(_) => ValueDomain::Direction,
            Self::Alignment(_) => ValueDomain::Alignment,
            Self::VerticalAlignment(_) => ValueDomain::VerticalAlignment,
            Self::LabelFormat(_) => ValueDomain::LabelFormat,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => f.write_str(&color.to_hex()),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Shape(shape) => write!(f, "{shape}"),
            Self::LineBrush(brush) => write!(f, "{brush}"),
            Self::Arrow(arrow) => write!(f, "{arrow}"),
            Self::Direction(direction) => write!(f, "{direction}"),
            Self::Alignment(align) => write!(f, "{align}"),
            Self::VerticalAlignment(align) => write!(f, "{align}"),
            Self::LabelFormat(format) => write!(f, "{format}"),
        }
    }
}

type Evaluator = dyn Fn(&dyn Element) -> Option<Value> + Send + Sync;

/// A pure function computing a style value from an element.
///
/// Functions declare the [`ValueDomain`] they produce so that they can be
/// checked against a property like any literal. Two functions are equal only
/// if they share the same evaluator.
///
/// # Examples
///
/// ```
/// use graphcss::{StyleFunction, Value, ValueDomain};
/// use graphcss::element::{DiagramElement, Element, ElementKind};
///
/// let has_label = StyleFunction::new("hasLabel", ValueDomain::Flag, |element| {
///     Some(Value::Flag(element.label().is_some()))
/// });
///
/// let vertex = DiagramElement::builder(ElementKind::Vertex).label("a").build();
/// assert_eq!(has_label.evaluate(vertex.as_ref()), Some(Value::Flag(true)));
/// ```
#[derive(Clone)]
pub struct StyleFunction {
    name: Arc<str>,
    domain: ValueDomain,
    evaluator: Arc<Evaluator>,
}

impl StyleFunction {
    /// Creates a function producing values of `domain`.
    ///
    /// `evaluator` must only read the element it is given. Returning `None`
    /// means the value is absent for that element.
    pub fn new<F>(name: &str, domain: ValueDomain, evaluator: F) -> Self
    where
        F: Fn(&dyn Element) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            domain,
            evaluator: Arc::new(evaluator),
        }
    }

    /// Returns the function's name, used for diagnostics and display.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the domain of the values this function produces.
    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    /// Runs the function against `element`.
    ///
    /// A result outside the declared domain is a bug in the evaluator. Debug
    /// builds panic on it; release builds log it and treat the value as
    /// absent.
    pub fn evaluate(&self, element: &dyn Element) -> Option<Value> {
        let value = (self.evaluator)(element)?;
        debug_assert_eq!(
            value.domain(),
            self.domain,
            "style function `{}` produced a value outside its domain",
            self.name
        );
        if value.domain() != self.domain {
            warn!(
                function = self.name.as_ref(),
                expected:% = self.domain,
                found:% = value.domain();
                "Style function produced a value outside its domain"
            );
            return None;
        }
        Some(value)
    }
}

impl PartialEq for StyleFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.evaluator, &other.evaluator)
    }
}

impl fmt::Debug for StyleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleFunction")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for StyleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}()", self.name)
    }
}

/// A style value as stored in a [`StyleSet`](crate::StyleSet).
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A value fixed at rule-definition time.
    Literal(Value),
    /// A value computed from the element at evaluation time.
    Function(StyleFunction),
}

impl StyleValue {
    /// Returns the domain of the value, or of the values the function produces.
    pub fn domain(&self) -> ValueDomain {
        match self {
            Self::Literal(value) => value.domain(),
            Self::Function(function) => function.domain(),
        }
    }

    /// Produces the concrete value for `element`, or `None` if absent.
    pub fn evaluate(&self, element: &dyn Element) -> Option<Value> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Function(function) => function.evaluate(element),
        }
    }

    /// Returns `true` for deferred values.
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }
}

impl From<Value> for StyleValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<StyleFunction> for StyleValue {
    fn from(function: StyleFunction) -> Self {
        Self::Function(function)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}
