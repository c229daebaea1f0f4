//! Style sets: property-keyed collections of style values.
//!
//! A [`StyleSet`] maps each [`StyleKey`] to at most one [`StyleValue`]. Sets
//! are built by value: every builder method consumes the set and returns the
//! extended one, so a set that has been placed in a rule is never changed
//! afterwards.
//!
//! A [`ComputedStyle`] is what a renderer ultimately reads: the result of
//! evaluating every value of a resolved set against one element.

use std::fmt;

use indexmap::IndexMap;
use log::trace;

use graphcss_core::{
    color::Color,
    draw::{Alignment, Arrow, EdgeDirection, LineBrush, NodeShape, VerticalAlignment},
    element::Element,
};

use crate::{
    error::StyleError,
    label::LabelFormat,
    property::StyleKey,
    value::{StyleValue, Value},
};

/// A single property setting: a key paired with a value of the key's domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    key: StyleKey,
    value: StyleValue,
}

impl Style {
    /// Pairs `key` with `value` after checking the value's domain.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DomainMismatch`] if `value` does not belong to
    /// the domain of `key`.
    pub fn try_new(key: StyleKey, value: impl Into<StyleValue>) -> Result<Self, StyleError> {
        let value = value.into();
        if value.domain() != key.domain() {
            return Err(StyleError::DomainMismatch {
                key,
                expected: key.domain(),
                found: value.domain(),
            });
        }
        Ok(Self { key, value })
    }

    /// Pairs `key` with `value` whose domain is known to match.
    pub(crate) fn new_unchecked(key: StyleKey, value: StyleValue) -> Self {
        debug_assert_eq!(
            key.domain(),
            value.domain(),
            "value domain must match `{key}`"
        );
        Self { key, value }
    }

    pub fn key(&self) -> StyleKey {
        self.key
    }

    pub fn value(&self) -> &StyleValue {
        &self.value
    }
}

/// An ordered mapping from style properties to values.
///
/// # Examples
///
/// ```
/// use graphcss::{StyleFactory, StyleKey, StyleSet};
/// use graphcss::draw::NodeShape;
///
/// let styles = StyleFactory::new();
/// let set = StyleSet::new()
///     .with(styles.shape(NodeShape::Rectangle))
///     .with(styles.font_size(8.0))
///     .with(styles.font_size(9.0));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains_key(StyleKey::Shape));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSet {
    styles: IndexMap<StyleKey, StyleValue>,
}

impl StyleSet {
    /// Creates an empty style set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set extended with `style`, replacing any earlier value
    /// for the same key.
    pub fn with(mut self, style: Style) -> Self {
        self.styles.insert(style.key, style.value);
        self
    }

    /// Returns the set extended with `key` set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DomainMismatch`] if `value` does not belong to
    /// the domain of `key`.
    pub fn try_with(self, key: StyleKey, value: impl Into<StyleValue>) -> Result<Self, StyleError> {
        Ok(self.with(Style::try_new(key, value)?))
    }

    /// Returns the set with every entry of `other` applied on top.
    pub fn extended(mut self, other: &StyleSet) -> Self {
        self.apply(other);
        self
    }

    /// Overwrites this set's values with those of `other`, key by key.
    pub(crate) fn apply(&mut self, other: &StyleSet) {
        for (key, value) in &other.styles {
            self.styles.insert(*key, value.clone());
        }
    }

    pub fn get(&self, key: StyleKey) -> Option<&StyleValue> {
        self.styles.get(&key)
    }

    pub fn contains_key(&self, key: StyleKey) -> bool {
        self.styles.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = StyleKey> + '_ {
        self.styles.keys().copied()
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &StyleValue)> {
        self.styles.iter().map(|(key, value)| (*key, value))
    }

    /// Evaluates every value against `element`.
    ///
    /// Absent values are left out of the result so that renderers fall
    /// back to their own defaults for them.
    pub fn evaluate(&self, element: &dyn Element) -> ComputedStyle {
        let mut values = IndexMap::with_capacity(self.styles.len());
        for (key, style_value) in &self.styles {
            match style_value.evaluate(element) {
                Some(value) => {
                    values.insert(*key, value);
                }
                None => trace!(key:% = key; "Style value absent"),
            }
        }
        ComputedStyle { values }
    }
}

impl FromIterator<Style> for StyleSet {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.styles.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Fully evaluated styles for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    values: IndexMap<StyleKey, Value>,
}

impl ComputedStyle {
    pub fn get(&self, key: StyleKey) -> Option<&Value> {
        self.values.get(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &Value)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn color(&self, key: StyleKey) -> Option<Color> {
        match self.get(key)? {
            Value::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn text(&self, key: StyleKey) -> Option<&str> {
        match self.get(key)? {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn number(&self, key: StyleKey) -> Option<f64> {
        match self.get(key)? {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn flag(&self, key: StyleKey) -> Option<bool> {
        match self.get(key)? {
            Value::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn shape(&self) -> Option<NodeShape> {
        match self.get(StyleKey::Shape)? {
            Value::Shape(shape) => Some(*shape),
            _ => None,
        }
    }

    pub fn line_brush(&self, key: StyleKey) -> Option<LineBrush> {
        match self.get(key)? {
            Value::LineBrush(brush) => Some(*brush),
            _ => None,
        }
    }

    pub fn arrow(&self, key: StyleKey) -> Option<Arrow> {
        match self.get(key)? {
            Value::Arrow(arrow) => Some(*arrow),
            _ => None,
        }
    }

    pub fn direction(&self) -> Option<EdgeDirection> {
        match self.get(StyleKey::Direction)? {
            Value::Direction(direction) => Some(*direction),
            _ => None,
        }
    }

    pub fn align(&self) -> Option<Alignment> {
        match self.get(StyleKey::Align)? {
            Value::Alignment(align) => Some(*align),
            _ => None,
        }
    }

    pub fn vertical_align(&self) -> Option<VerticalAlignment> {
        match self.get(StyleKey::VerticalAlign)? {
            Value::VerticalAlignment(align) => Some(*align),
            _ => None,
        }
    }

    pub fn label_format(&self) -> Option<&LabelFormat> {
        match self.get(StyleKey::LabelFormat)? {
            Value::LabelFormat(format) => Some(format),
            _ => None,
        }
    }
}

impl fmt::Display for ComputedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.values {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use graphcss_core::element::{DiagramElement, ElementKind};

    use super::*;
    use crate::{factory::StyleFactory, property::ValueDomain};

    #[test]
    fn test_with_replaces_existing_key() {
        let styles = StyleFactory::new();
        let set = StyleSet::new()
            .with(styles.arrow_tail(Arrow::None))
            .with(styles.direction(EdgeDirection::Forward))
            .with(styles.arrow_tail(Arrow::Diamond));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get(StyleKey::ArrowTail),
            Some(&StyleValue::Literal(Value::Arrow(Arrow::Diamond)))
        );
        // Replacing keeps the original position.
        assert_eq!(
            set.keys().collect::<Vec<_>>(),
            vec![StyleKey::ArrowTail, StyleKey::Direction]
        );
    }

    #[test]
    fn test_try_with_checks_domain() {
        let result = StyleSet::new().try_with(StyleKey::Color, Value::Arrow(Arrow::Vee));
        assert_eq!(
            result,
            Err(StyleError::DomainMismatch {
                key: StyleKey::Color,
                expected: ValueDomain::Color,
                found: ValueDomain::Arrow,
            })
        );

        let set = StyleSet::new()
            .try_with(StyleKey::FontSize, Value::Number(7.0))
            .unwrap();
        assert!(set.contains_key(StyleKey::FontSize));
    }

    #[test]
    fn test_extended_overrides_and_keeps() {
        let styles = StyleFactory::new();
        let base = StyleSet::new()
            .with(styles.font_size(8.0))
            .with(styles.font_family("Verdana"));
        let top = StyleSet::new()
            .with(styles.font_size(12.0))
            .with(styles.compound(true));

        let merged = base.extended(&top);
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.get(StyleKey::FontSize),
            Some(&StyleValue::Literal(Value::Number(12.0)))
        );
        assert!(merged.contains_key(StyleKey::FontFamily));
        assert!(merged.contains_key(StyleKey::Compound));
    }

    #[test]
    fn test_evaluate_drops_absent_values() {
        let styles = StyleFactory::new();
        let functions = crate::factory::FunctionFactory::new();
        let set = StyleSet::new()
            .with(styles.tooltip_fn(functions.label()).unwrap())
            .with(styles.border_width(0.0));

        let unlabeled = DiagramElement::builder(ElementKind::Table).build();
        let computed = set.evaluate(unlabeled.as_ref());
        assert_eq!(computed.len(), 1);
        assert_eq!(computed.number(StyleKey::BorderWidth), Some(0.0));
        assert_eq!(computed.text(StyleKey::Tooltip), None);

        let labeled = DiagramElement::builder(ElementKind::Table).label("T").build();
        let computed = set.evaluate(labeled.as_ref());
        assert_eq!(computed.text(StyleKey::Tooltip), Some("T"));
    }

    #[test]
    fn test_computed_style_display() {
        let styles = StyleFactory::new();
        let set = StyleSet::new()
            .with(styles.arrow_head(Arrow::Vee))
            .with(styles.arrow_scale(0.5));
        let edge = DiagramElement::builder(ElementKind::Edge).build();
        assert_eq!(
            set.evaluate(edge.as_ref()).to_string(),
            "arrowHead = vee\narrowScale = 0.5\n"
        );
    }
}
