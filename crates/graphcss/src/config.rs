//! Configuration: theme selection and override rules.
//!
//! [`AppConfig`] is deserialized with serde, typically from TOML:
//!
//! ```toml
//! theme = "default"
//!
//! [[rules]]
//! select = { kind = "vertex" }
//! styles = { color = "#ff0000", fontSize = 10 }
//!
//! [[rules]]
//! select = { kind = "edge", class = "Containment", parent = { kind = "graph" } }
//! styles = { arrowTail = "odiamond", lineBrush = "dashed 1.0" }
//! ```
//!
//! A `select` table combines its `kind`, `class`, `id` and `parent` parts
//! with `And`; `any_of` adds a list of alternatives combined with `Or`. An
//! empty table selects every element.
//!
//! Style values are checked against their property when the rules are
//! built. Text values of `labelFormat` and `tooltip` may contain `{label}`,
//! which is replaced with the element label.

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use graphcss_core::{
    draw::{Alignment, Arrow, EdgeDirection, LineBrush, NodeShape, VerticalAlignment},
    element::ElementKind,
};

use crate::{
    cascade::GraphCss,
    error::StyleError,
    factory::{FunctionFactory, LABEL_PLACEHOLDER, parse_class_name, parse_color},
    label::{LabelFormat, LabelText},
    property::{StyleKey, ValueDomain},
    rule::Rule,
    selector::Selector,
    style_set::{Style, StyleSet},
    theme::{DEFAULT_THEME_NAME, StyleTheme, theme_by_name},
    value::{StyleValue, Value},
};

/// Styling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Name of the theme to start from.
    pub theme: String,
    /// Rules applied on top of the theme, in order.
    pub rules: Vec<RuleConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME_NAME.to_string(),
            rules: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Looks up the configured theme.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownTheme`] if the theme does not exist.
    pub fn theme(&self) -> Result<Arc<dyn StyleTheme>, StyleError> {
        theme_by_name(&self.theme)
    }

    /// Builds the configured rules into a cascade set.
    ///
    /// # Errors
    ///
    /// Returns an error for the first selector or style that is invalid.
    pub fn override_rules(&self) -> Result<GraphCss, StyleError> {
        let functions = FunctionFactory::new();
        let rules = self
            .rules
            .iter()
            .map(|rule| rule.to_rule(&functions))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rules = rules.len(); "Override rules loaded");
        Ok(GraphCss::builder().add_rules(rules).build())
    }
}

/// A configured rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    #[serde(default)]
    pub select: SelectorConfig,
    pub styles: IndexMap<String, ConfigValue>,
}

impl RuleConfig {
    fn to_rule(&self, functions: &FunctionFactory) -> Result<Rule, StyleError> {
        let selector = self.select.to_selector()?;
        let styles = self
            .styles
            .iter()
            .map(|(name, value)| {
                let key = name.parse::<StyleKey>()?;
                Style::try_new(key, parse_value(key, value, functions)?)
            })
            .collect::<Result<StyleSet, _>>()?;
        Ok(selector.with_style_set(styles))
    }
}

/// A configured selector.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorConfig {
    pub kind: Option<ElementKind>,
    pub class: Option<String>,
    pub id: Option<String>,
    pub parent: Option<Box<SelectorConfig>>,
    pub any_of: Option<Vec<SelectorConfig>>,
}

impl SelectorConfig {
    /// Builds the selector this table describes.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid class name or an empty `any_of` list.
    pub fn to_selector(&self) -> Result<Selector, StyleError> {
        let mut parts = Vec::new();

        let class = self.class.as_deref().map(parse_class_name).transpose()?;
        match (class, &self.id) {
            (Some(class), Some(id)) => {
                parts.push(Selector::Class {
                    kind: self.kind,
                    class,
                });
                parts.push(Selector::id(None, id.as_str()));
            }
            (Some(class), None) => parts.push(Selector::Class {
                kind: self.kind,
                class,
            }),
            (None, Some(id)) => parts.push(Selector::id(self.kind, id.as_str())),
            (None, None) => parts.extend(self.kind.map(Selector::Kind)),
        }

        if let Some(parent) = &self.parent {
            parts.push(Selector::parent(parent.to_selector()?));
        }

        if let Some(alternatives) = &self.any_of {
            let alternative = alternatives
                .iter()
                .map(SelectorConfig::to_selector)
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .reduce(Selector::or)
                .ok_or_else(|| {
                    StyleError::InvalidSelector("`any_of` must list at least one selector".into())
                })?;
            parts.push(alternative);
        }

        Ok(parts.into_iter().reduce(Selector::and).unwrap_or(Selector::Any))
    }
}

/// A raw configured style value, interpreted according to its property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    fn describe(&self) -> &'static str {
        match self {
            Self::Flag(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

fn invalid(key: StyleKey, reason: impl Into<String>) -> StyleError {
    StyleError::InvalidValue {
        key,
        reason: reason.into(),
    }
}

fn parse_keyword<T>(key: StyleKey, text: &str) -> Result<T, StyleError>
where
    T: std::str::FromStr<Err = String>,
{
    text.parse::<T>().map_err(|reason| invalid(key, reason))
}

/// Text that may refer to the element label.
fn label_text(text: &str, functions: &FunctionFactory) -> LabelText {
    if text.contains(LABEL_PLACEHOLDER) {
        LabelText::Function(functions.label_template(text))
    } else {
        LabelText::Literal(text.to_string())
    }
}

fn parse_value(
    key: StyleKey,
    value: &ConfigValue,
    functions: &FunctionFactory,
) -> Result<StyleValue, StyleError> {
    let value = match (key.domain(), value) {
        (ValueDomain::Color, ConfigValue::Text(text)) => Value::Color(parse_color(text)?),
        (ValueDomain::Text, ConfigValue::Text(text)) => match label_text(text, functions) {
            LabelText::Function(function) => return Ok(StyleValue::Function(function)),
            LabelText::Literal(text) => Value::Text(text),
        },
        (ValueDomain::Number, ConfigValue::Number(number)) => {
            if !number.is_finite() || *number < 0.0 {
                return Err(invalid(
                    key,
                    format!("expected a non-negative number, found {number}"),
                ));
            }
            Value::Number(*number)
        }
        (ValueDomain::Flag, ConfigValue::Flag(flag)) => Value::Flag(*flag),
        (ValueDomain::Shape, ConfigValue::Text(text)) => {
            Value::Shape(parse_keyword::<NodeShape>(key, text)?)
        }
        (ValueDomain::LineBrush, ConfigValue::Text(text)) => {
            Value::LineBrush(parse_keyword::<LineBrush>(key, text)?)
        }
        (ValueDomain::Arrow, ConfigValue::Text(text)) => {
            Value::Arrow(parse_keyword::<Arrow>(key, text)?)
        }
        (ValueDomain::Direction, ConfigValue::Text(text)) => {
            Value::Direction(parse_keyword::<EdgeDirection>(key, text)?)
        }
        (ValueDomain::Alignment, ConfigValue::Text(text)) => {
            Value::Alignment(parse_keyword::<Alignment>(key, text)?)
        }
        (ValueDomain::VerticalAlignment, ConfigValue::Text(text)) => {
            Value::VerticalAlignment(parse_keyword::<VerticalAlignment>(key, text)?)
        }
        (ValueDomain::LabelFormat, ConfigValue::Text(text)) => {
            Value::LabelFormat(LabelFormat::Template(label_text(text, functions)))
        }
        (domain, value) => {
            return Err(invalid(
                key,
                format!("expected a {domain} value, found a {}", value.describe()),
            ));
        }
    };
    Ok(StyleValue::Literal(value))
}

#[cfg(test)]
mod tests {
    use graphcss_core::{
        class::ClassName,
        draw::LineType,
        element::DiagramElement,
    };

    use super::*;

    fn parse(source: &str) -> AppConfig {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.theme, "default");
        assert!(config.rules.is_empty());
        assert!(config.override_rules().unwrap().is_empty());
        assert_eq!(config.theme().unwrap().name(), "default");
    }

    #[test]
    fn test_rules_parse_typed_values() {
        let config = parse(
            r##"
            [[rules]]
            select = { kind = "vertex" }
            styles = { color = "#ff0000", fontSize = 10, shape = "ellipse", compound = false }

            [[rules]]
            select = { kind = "edge", class = "Containment" }
            styles = { arrowTail = "odiamond", lineBrush = "dashed 1.5 round-caps" }
            "##,
        );
        let rules = config.override_rules().unwrap();
        assert_eq!(rules.len(), 2);

        let vertex = DiagramElement::builder(ElementKind::Vertex).build();
        let computed = rules.resolve(vertex.as_ref()).evaluate(vertex.as_ref());
        assert_eq!(
            computed.color(StyleKey::Color).map(|c| c.to_hex()).as_deref(),
            Some("#ff0000")
        );
        assert_eq!(computed.number(StyleKey::FontSize), Some(10.0));
        assert_eq!(computed.shape(), Some(NodeShape::Ellipse));
        assert_eq!(computed.flag(StyleKey::Compound), Some(false));

        let edge = DiagramElement::builder(ElementKind::Edge)
            .class(ClassName::new("Containment").unwrap())
            .build();
        let computed = rules.resolve(edge.as_ref()).evaluate(edge.as_ref());
        assert_eq!(computed.arrow(StyleKey::ArrowTail), Some(Arrow::ODiamond));
        let brush = computed.line_brush(StyleKey::LineBrush).unwrap();
        assert_eq!(brush.line_type(), LineType::Dashed);
        assert_eq!(brush.width(), 1.5);
        assert!(brush.rounded_caps());
    }

    #[test]
    fn test_selector_tables() {
        let config = parse(
            r#"
            [[rules]]
            select = { kind = "table", class = "Label", parent = { kind = "graph" } }
            styles = { fontSize = 14 }

            [[rules]]
            select = { any_of = [{ kind = "row" }, { kind = "cell" }] }
            styles = { verticalAlign = "middle" }

            [[rules]]
            select = { id = "main" }
            styles = { tooltip = "Main" }

            [[rules]]
            styles = { fontFamily = "Helvetica" }
            "#,
        );
        let selectors: Vec<Selector> = config
            .override_rules()
            .unwrap()
            .rules()
            .map(|rule| rule.selector().clone())
            .collect();

        let label = ClassName::new("Label").unwrap();
        assert_eq!(
            selectors,
            vec![
                Selector::class(ElementKind::Table, label).with_parent(Selector::graph()),
                Selector::row().or(Selector::cell()),
                Selector::id(None, "main"),
                Selector::Any,
            ]
        );
    }

    #[test]
    fn test_label_templates_become_functions() {
        let config = parse(
            r#"
            [[rules]]
            select = { kind = "edge" }
            styles = { labelFormat = "[{label}]", tooltip = "{label}" }
            "#,
        );
        let rules = config.override_rules().unwrap();
        let edge = DiagramElement::builder(ElementKind::Edge).label("uses").build();
        let resolved = rules.resolve(edge.as_ref());
        assert!(resolved.get(StyleKey::Tooltip).unwrap().is_function());

        let computed = resolved.evaluate(edge.as_ref());
        assert_eq!(computed.text(StyleKey::Tooltip), Some("uses"));
        let format = computed.label_format().unwrap();
        assert_eq!(format.plain_text(edge.as_ref()).as_deref(), Some("[uses]"));
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let config = parse(
            r#"
            [[rules]]
            styles = { fontColour = "red" }
            "#,
        );
        assert_eq!(
            config.override_rules().unwrap_err(),
            StyleError::UnknownProperty("fontColour".to_string())
        );
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        let config = parse(
            r#"
            [[rules]]
            styles = { fontSize = "large" }
            "#,
        );
        let err = config.override_rules().unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidValue {
                key: StyleKey::FontSize,
                reason: "expected a number value, found a string".to_string(),
            }
        );

        let config = parse(
            r#"
            [[rules]]
            styles = { arrowHead = "harpoon" }
            "#,
        );
        assert!(matches!(
            config.override_rules(),
            Err(StyleError::InvalidValue { key: StyleKey::ArrowHead, .. })
        ));

        let config = parse(
            r#"
            [[rules]]
            styles = { color = "not-a-color" }
            "#,
        );
        assert!(matches!(
            config.override_rules(),
            Err(StyleError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_invalid_selectors_are_rejected() {
        let config = parse(
            r#"
            [[rules]]
            select = { any_of = [] }
            styles = { fontSize = 1 }
            "#,
        );
        assert!(matches!(
            config.override_rules(),
            Err(StyleError::InvalidSelector(_))
        ));

        let config = parse(
            r#"
            [[rules]]
            select = { class = "two words" }
            styles = { fontSize = 1 }
            "#,
        );
        assert!(matches!(
            config.override_rules(),
            Err(StyleError::InvalidClassName(_))
        ));

        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [[rules]]
            select = { kind = "node" }
            styles = {}
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_theme() {
        let config = parse(r#"theme = "midnight""#);
        assert_eq!(
            config.theme().unwrap_err(),
            StyleError::UnknownTheme("midnight".to_string())
        );
    }
}
