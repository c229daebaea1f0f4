//! Cascade sets: ordered rules resolved against elements.
//!
//! A [`GraphCss`] is built once through a [`GraphCssBuilder`] and shared
//! read-only afterwards; clones share the same rules.
//!
//! # Resolution
//!
//! [`GraphCss::resolve`] keeps the rules whose selector matches the element,
//! sorts them by layer, then specificity, then insertion order, and folds
//! their style sets into one, so that the last rule to set a property wins.
//! Function values are left unevaluated.
//!
//! # Merging
//!
//! [`GraphCss::merge`] stacks one cascade set on top of another. Every rule
//! of the upper set is placed in a later layer than every rule of the lower
//! one, so for any element the merged set resolves to the lower set's result
//! overridden key by key by the upper set's result.

use std::{fmt, sync::Arc};

use log::{debug, trace};

use graphcss_core::element::Element;

use crate::{rule::Rule, style_set::StyleSet};

/// An immutable, ordered collection of rules.
///
/// # Examples
///
/// ```
/// use graphcss::{GraphCss, Selector, StyleFactory, StyleKey};
/// use graphcss::color::Color;
/// use graphcss::draw::NodeShape;
/// use graphcss::element::{DiagramElement, ElementKind};
///
/// let styles = StyleFactory::new();
/// let blue = Color::new("blue").unwrap();
/// let rules = GraphCss::builder()
///     .add_rule(Selector::vertex().with_styles([
///         styles.color(blue),
///         styles.shape(NodeShape::Rectangle),
///     ]))
///     .build();
///
/// let vertex = DiagramElement::builder(ElementKind::Vertex).build();
/// let resolved = rules.resolve(vertex.as_ref());
/// assert_eq!(resolved.len(), 2);
/// assert!(resolved.contains_key(StyleKey::Shape));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphCss {
    rules: Arc<[Rule]>,
}

impl GraphCss {
    pub fn builder() -> GraphCssBuilder {
        GraphCssBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rules in order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    fn next_layer(&self) -> u32 {
        self.rules.iter().map(|rule| rule.layer() + 1).max().unwrap_or(0)
    }

    fn next_order(&self) -> u32 {
        self.rules.last().map_or(0, |rule| rule.order() + 1)
    }

    /// Returns a cascade set with `other`'s rules stacked on top of this
    /// set's rules.
    pub fn merge(&self, other: &GraphCss) -> GraphCss {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let layer_offset = self.next_layer();
        let order_offset = self.next_order();
        let rules: Arc<[Rule]> = self
            .rules
            .iter()
            .cloned()
            .chain(other.rules.iter().map(|rule| {
                let layer = rule.layer() + layer_offset;
                let order = rule.order() + order_offset;
                rule.clone().with_position(layer, order)
            }))
            .collect();

        debug!(
            lower = self.len(),
            upper = other.len(),
            layers = layer_offset + other.next_layer();
            "Cascade sets merged"
        );
        GraphCss { rules }
    }

    /// Computes the styles that apply to `element`.
    ///
    /// Never fails: an element no rule matches resolves to an empty set.
    pub fn resolve(&self, element: &dyn Element) -> StyleSet {
        let mut matched: Vec<(u32, &Rule)> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let specificity = rule.selector().match_specificity(element)?;
                Some((specificity, rule))
            })
            .collect();
        matched.sort_by_key(|(specificity, rule)| (rule.layer(), *specificity, rule.order()));

        let mut resolved = StyleSet::new();
        for (_, rule) in &matched {
            resolved.apply(rule.styles());
        }

        trace!(
            kind:% = element.kind(),
            matched = matched.len(),
            styles = resolved.len();
            "Element styles resolved"
        );
        resolved
    }
}

impl FromIterator<Rule> for GraphCss {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        GraphCssBuilder::default().add_rules(iter).build()
    }
}

impl fmt::Display for GraphCss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules.iter() {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// Builder for [`GraphCss`]: rules can only be appended.
#[derive(Debug, Default)]
pub struct GraphCssBuilder {
    rules: Vec<Rule>,
    next_order: u32,
}

impl GraphCssBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rule`, ordering it after every rule added so far.
    ///
    /// The rule keeps its layer, so rules taken from a merged set still
    /// override the layers below them.
    pub fn add_rule(mut self, rule: Rule) -> Self {
        let order = self.next_order;
        self.next_order = self.next_order.saturating_add(1);
        let layer = rule.layer();
        self.rules.push(rule.with_position(layer, order));
        self
    }

    /// Appends `rules` in iteration order.
    pub fn add_rules(self, rules: impl IntoIterator<Item = Rule>) -> Self {
        rules.into_iter().fold(self, Self::add_rule)
    }

    pub fn build(self) -> GraphCss {
        debug!(rules = self.rules.len(); "Cascade set built");
        GraphCss {
            rules: self.rules.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use graphcss_core::{
        class::ClassName,
        color::Color,
        draw::{Arrow, EdgeDirection, NodeShape},
        element::{DiagramElement, ElementKind},
    };

    use super::*;
    use crate::{
        factory::{FunctionFactory, StyleFactory},
        property::StyleKey,
        selector::Selector,
        value::{StyleValue, Value},
    };

    fn class(name: &str) -> ClassName {
        ClassName::new(name).unwrap()
    }

    fn literal(set: &StyleSet, key: StyleKey) -> Option<Value> {
        match set.get(key)? {
            StyleValue::Literal(value) => Some(value.clone()),
            StyleValue::Function(_) => None,
        }
    }

    #[test]
    fn test_bare_vertex_gets_kind_rule() {
        let styles = StyleFactory::new();
        let blue = Color::new("blue").unwrap();
        let rules = GraphCss::builder()
            .add_rule(Selector::vertex().with_styles([
                styles.color(blue),
                styles.shape(NodeShape::Rectangle),
            ]))
            .build();

        let vertex = DiagramElement::builder(ElementKind::Vertex).build();
        let resolved = rules.resolve(vertex.as_ref());
        assert_eq!(resolved.len(), 2);
        assert_eq!(literal(&resolved, StyleKey::Color), Some(Value::Color(blue)));
        assert_eq!(
            literal(&resolved, StyleKey::Shape),
            Some(Value::Shape(NodeShape::Rectangle))
        );
    }

    #[test]
    fn test_class_rule_beats_kind_rule() {
        let styles = StyleFactory::new();
        let containment = class("Containment");
        let kind_rule = Selector::edge().with_styles([
            styles.arrow_tail(Arrow::None),
            styles.arrow_head(Arrow::Vee),
        ]);
        let class_rule = Selector::class(ElementKind::Edge, containment).with_styles([
            styles.arrow_tail(Arrow::Diamond),
            styles.direction(EdgeDirection::Both),
        ]);
        let edge = DiagramElement::builder(ElementKind::Edge)
            .class(containment)
            .build();

        // Insertion order does not matter across specificities.
        for rules in [
            GraphCss::from_iter([kind_rule.clone(), class_rule.clone()]),
            GraphCss::from_iter([class_rule, kind_rule]),
        ] {
            let resolved = rules.resolve(edge.as_ref());
            assert_eq!(
                literal(&resolved, StyleKey::ArrowTail),
                Some(Value::Arrow(Arrow::Diamond))
            );
            assert_eq!(
                literal(&resolved, StyleKey::Direction),
                Some(Value::Direction(EdgeDirection::Both))
            );
            assert_eq!(
                literal(&resolved, StyleKey::ArrowHead),
                Some(Value::Arrow(Arrow::Vee))
            );
        }
    }

    #[test]
    fn test_later_rule_wins_tie() {
        let styles = StyleFactory::new();
        let rules = GraphCss::builder()
            .add_rule(Selector::vertex().with_styles([styles.font_size(8.0)]))
            .add_rule(Selector::vertex().with_styles([styles.font_size(10.0)]))
            .build();
        let vertex = DiagramElement::builder(ElementKind::Vertex).build();
        assert_eq!(
            literal(&rules.resolve(vertex.as_ref()), StyleKey::FontSize),
            Some(Value::Number(10.0))
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let styles = StyleFactory::new();
        let rules = GraphCss::from_iter([Selector::edge().with_styles([styles.arrow_scale(0.5)])]);
        let vertex = DiagramElement::builder(ElementKind::Vertex).build();
        assert!(rules.resolve(vertex.as_ref()).is_empty());
        assert!(GraphCss::default().resolve(vertex.as_ref()).is_empty());
    }

    #[test]
    fn test_resolve_keeps_functions_deferred() {
        let styles = StyleFactory::new();
        let functions = FunctionFactory::new();
        let rules = GraphCss::from_iter([Selector::table()
            .with_styles([styles.rendered_fn(functions.not_empty_label()).unwrap()])]);

        let empty = DiagramElement::builder(ElementKind::Table).label("").build();
        let labeled = DiagramElement::builder(ElementKind::Table).label("X").build();

        let resolved = rules.resolve(empty.as_ref());
        let rendered = resolved.get(StyleKey::Rendered).unwrap();
        assert!(rendered.is_function());
        assert_eq!(rendered.evaluate(empty.as_ref()), Some(Value::Flag(false)));

        let resolved = rules.resolve(labeled.as_ref());
        let rendered = resolved.get(StyleKey::Rendered).unwrap();
        assert_eq!(rendered.evaluate(labeled.as_ref()), Some(Value::Flag(true)));
    }

    #[test]
    fn test_merge_upper_overrides_more_specific_lower() {
        let styles = StyleFactory::new();
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        let reference = class("Reference");

        let lower = GraphCss::from_iter([Selector::class(ElementKind::Vertex, reference)
            .with_styles([styles.color(blue), styles.font_size(8.0)])]);
        let upper = GraphCss::from_iter([Selector::vertex().with_styles([styles.color(red)])]);
        let merged = lower.merge(&upper);

        let vertex = DiagramElement::builder(ElementKind::Vertex)
            .class(reference)
            .build();
        let resolved = merged.resolve(vertex.as_ref());
        assert_eq!(literal(&resolved, StyleKey::Color), Some(Value::Color(red)));
        assert_eq!(literal(&resolved, StyleKey::FontSize), Some(Value::Number(8.0)));
    }

    #[test]
    fn test_merge_renumbers_orders() {
        let styles = StyleFactory::new();
        let a = GraphCss::from_iter([
            Selector::vertex().with_styles([styles.font_size(1.0)]),
            Selector::edge().with_styles([styles.font_size(2.0)]),
        ]);
        let b = GraphCss::from_iter([Selector::graph().with_styles([styles.font_size(3.0)])]);
        let c = GraphCss::from_iter([Selector::cell().with_styles([styles.font_size(4.0)])]);

        let merged = a.merge(&b).merge(&c);
        let positions: Vec<_> = merged.rules().map(|r| (r.layer(), r.order())).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 2), (2, 3)]);

        assert_eq!(a.merge(&GraphCss::default()).len(), 2);
        assert_eq!(GraphCss::default().merge(&b).len(), 1);
    }

    #[test]
    fn test_rebuilt_merged_set_keeps_layers() {
        let styles = StyleFactory::new();
        let reference = class("Reference");
        let lower = GraphCss::from_iter([
            Selector::class(ElementKind::Vertex, reference).with_styles([styles.font_size(1.0)])
        ]);
        let upper = GraphCss::from_iter([Selector::vertex().with_styles([styles.font_size(2.0)])]);
        let merged = lower.merge(&upper);
        let rebuilt: GraphCss = merged.rules().cloned().collect();

        let vertex = DiagramElement::builder(ElementKind::Vertex)
            .class(reference)
            .build();
        assert_eq!(
            literal(&merged.resolve(vertex.as_ref()), StyleKey::FontSize),
            Some(Value::Number(2.0))
        );
        assert_eq!(rebuilt.resolve(vertex.as_ref()), merged.resolve(vertex.as_ref()));

        // Merging on top of a rebuilt set still stacks above every layer.
        let top = GraphCss::from_iter([Selector::Any.with_styles([styles.font_size(3.0)])]);
        assert_eq!(
            literal(&rebuilt.merge(&top).resolve(vertex.as_ref()), StyleKey::FontSize),
            Some(Value::Number(3.0))
        );
    }

    #[test]
    fn test_clones_share_rules() {
        let rules = GraphCss::from_iter([Selector::Any.with_style_set(StyleSet::new())]);
        let clone = rules.clone();
        assert!(Arc::ptr_eq(&rules.rules, &clone.rules));
    }
}

#[cfg(test)]
mod proptest_tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use graphcss_core::{
        class::ClassName,
        element::{DiagramElement, ElementKind},
    };

    use super::*;
    use crate::{
        property::StyleKey,
        selector::Selector,
        style_set::Style,
        value::Value,
    };

    // ===================
    // Strategies
    // ===================

    const CLASS_NAMES: [&str; 2] = ["Containment", "Reference"];
    const NUMBER_KEYS: [StyleKey; 4] = [
        StyleKey::FontSize,
        StyleKey::ArrowScale,
        StyleKey::CellPadding,
        StyleKey::BorderWidth,
    ];

    fn kind_strategy() -> impl Strategy<Value = ElementKind> {
        proptest::sample::select(ElementKind::ALL.to_vec())
    }

    fn class_strategy() -> impl Strategy<Value = ClassName> {
        proptest::sample::select(CLASS_NAMES.to_vec()).prop_map(|name| ClassName::new(name).unwrap())
    }

    fn selector_strategy() -> impl Strategy<Value = Selector> {
        let leaf = prop_oneof![
            Just(Selector::Any),
            kind_strategy().prop_map(Selector::Kind),
            (kind_strategy(), class_strategy())
                .prop_map(|(kind, class)| Selector::class(kind, class)),
        ];
        leaf.prop_recursive(2, 8, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(b)),
                inner.prop_map(Selector::parent),
            ]
        })
    }

    fn style_strategy() -> impl Strategy<Value = Style> {
        (proptest::sample::select(NUMBER_KEYS.to_vec()), 0u8..20).prop_map(|(key, n)| {
            Style::try_new(key, Value::Number(f64::from(n))).unwrap()
        })
    }

    fn rule_strategy() -> impl Strategy<Value = Rule> {
        (
            selector_strategy(),
            proptest::collection::vec(style_strategy(), 0..3),
        )
            .prop_map(|(selector, styles)| selector.with_styles(styles))
    }

    fn cascade_strategy() -> impl Strategy<Value = GraphCss> {
        proptest::collection::vec(rule_strategy(), 0..6).prop_map(GraphCss::from_iter)
    }

    fn element_strategy() -> impl Strategy<Value = (Arc<DiagramElement>, Arc<DiagramElement>)> {
        (
            kind_strategy(),
            kind_strategy(),
            proptest::collection::vec(class_strategy(), 0..2),
        )
            .prop_map(|(parent_kind, kind, classes)| {
                let parent = DiagramElement::builder(parent_kind).build();
                let mut builder = DiagramElement::builder(kind).parent(&parent);
                for class in classes {
                    builder = builder.class(class);
                }
                let child = builder.build();
                (parent, child)
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The resolved keys are exactly the keys set by matching rules.
    fn check_coverage(rules: &GraphCss, element: &dyn Element) -> Result<(), TestCaseError> {
        let resolved = rules.resolve(element);
        let mut expected: Vec<StyleKey> = rules
            .rules()
            .filter(|rule| rule.selector().matches(element))
            .flat_map(|rule| rule.styles().keys())
            .collect();
        expected.sort_by_key(|key| key.as_str());
        expected.dedup();

        let mut actual: Vec<StyleKey> = resolved.keys().collect();
        actual.sort_by_key(|key| key.as_str());
        prop_assert_eq!(actual, expected);
        Ok(())
    }

    /// Resolving a merged set equals overriding the lower result with the
    /// upper one.
    fn check_merge_precedence(
        lower: &GraphCss,
        upper: &GraphCss,
        element: &dyn Element,
    ) -> Result<(), TestCaseError> {
        let merged = lower.merge(upper).resolve(element);
        let folded = lower.resolve(element).extended(&upper.resolve(element));
        prop_assert_eq!(merged, folded);
        Ok(())
    }

    /// Resolution is deterministic.
    fn check_resolve_is_repeatable(
        rules: &GraphCss,
        element: &dyn Element,
    ) -> Result<(), TestCaseError> {
        prop_assert_eq!(rules.resolve(element), rules.resolve(element));
        Ok(())
    }

    proptest! {
        #[test]
        fn resolve_covers_matching_rules(
            rules in cascade_strategy(),
            (_parent, element) in element_strategy(),
        ) {
            check_coverage(&rules, element.as_ref())?;
        }

        #[test]
        fn merge_precedence_is_layered(
            lower in cascade_strategy(),
            upper in cascade_strategy(),
            (_parent, element) in element_strategy(),
        ) {
            check_merge_precedence(&lower, &upper, element.as_ref())?;
        }

        #[test]
        fn resolve_is_repeatable(
            rules in cascade_strategy(),
            (_parent, element) in element_strategy(),
        ) {
            check_resolve_is_repeatable(&rules, element.as_ref())?;
        }
    }
}
