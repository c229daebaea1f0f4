//! GraphCSS - Cascading style rules for graph diagram elements.
//!
//! Resolves, for each element of a graph diagram (a graph or subgraph, a
//! vertex, an edge, or a table, row or cell of a label), the style
//! properties a renderer needs: colors, shapes, fonts, line and arrow styles
//! and label layout.
//!
//! Styles come from [`Rule`]s. A rule pairs a [`Selector`] with a
//! [`StyleSet`]; rules are collected into [`GraphCss`] cascade sets, and
//! resolving an element against a cascade set merges the styles of every
//! matching rule, the more specific and the later rules winning. Values may
//! be deferred [`StyleFunction`]s computed from the element only when
//! evaluated.
//!
//! [`Stylist`] ties it together: a theme's rules, configured overrides and
//! caller overrides, stacked in that order.

pub mod config;

mod cascade;
mod error;
mod factory;
mod label;
mod property;
mod rule;
mod selector;
mod style_set;
mod theme;
mod value;

pub use graphcss_core::{class, color, draw, element};

pub use cascade::{GraphCss, GraphCssBuilder};
pub use error::StyleError;
pub use factory::{FunctionFactory, LABEL_PLACEHOLDER, StyleFactory};
pub use label::{
    LabelCell, LabelElement, LabelFormat, LabelRow, LabelTable, LabelText, LabelTree,
    LabelTreeCell, LabelTreeRow,
};
pub use property::{StyleKey, ValueDomain};
pub use rule::Rule;
pub use selector::Selector;
pub use style_set::{ComputedStyle, Style, StyleSet};
pub use theme::{
    COLOR_DARK_GREY, COLOR_LIGHT_GREY, COLOR_LIGHT_GREY_BLUE, COLOR_MID_BLUE, COLOR_MID_GREY,
    COLOR_WHITE, DEFAULT_THEME_NAME, DefaultStyleTheme, LABEL_CELL_CLASS, LABEL_ROW_CLASS,
    LABEL_TABLE_CLASS, StyleTheme, THEME_EDGE_CONTAINMENT, THEME_EDGE_REFERENCE, theme_by_name,
    theme_names,
};
pub use value::{StyleFunction, StyleValue, Value};

use std::sync::Arc;

use log::{debug, info, trace};

use config::AppConfig;
use element::Element;

/// Resolves element styles from a theme and its overrides.
///
/// The cascade is built once and stacks, from lowest to highest priority:
/// the theme's default rules, the theme's instance rules, the configured
/// override rules, and any rules added with [`Stylist::with_overrides`].
///
/// # Examples
///
/// ```
/// use graphcss::{Stylist, StyleKey, config::AppConfig};
/// use graphcss::element::{DiagramElement, ElementKind};
///
/// let stylist = Stylist::new(&AppConfig::default()).unwrap();
/// let vertex = DiagramElement::builder(ElementKind::Vertex).label("api").build();
///
/// let styles = stylist.compute(vertex.as_ref());
/// assert_eq!(styles.text(StyleKey::FontFamily), Some("Verdana"));
/// ```
#[derive(Debug, Clone)]
pub struct Stylist {
    theme: String,
    rules: GraphCss,
}

impl Stylist {
    /// Creates a stylist for the configured theme and override rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme is unknown or a configured rule is
    /// invalid.
    pub fn new(config: &AppConfig) -> Result<Self, StyleError> {
        let theme = config.theme()?;
        let stylist = Self::with_theme(theme.as_ref())?.with_overrides(&config.override_rules()?);
        info!(
            theme = stylist.theme.as_str(),
            rules = stylist.rules.len();
            "Stylist ready"
        );
        Ok(stylist)
    }

    /// Creates a stylist for `theme` alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme's rules cannot be built.
    pub fn with_theme(theme: &dyn StyleTheme) -> Result<Self, StyleError> {
        Ok(Self {
            theme: theme.name().to_string(),
            rules: theme.rules()?,
        })
    }

    /// Stacks `overrides` on top of the current rules.
    pub fn with_overrides(mut self, overrides: &GraphCss) -> Self {
        debug!(rules = overrides.len(); "Adding override rules");
        self.rules = self.rules.merge(overrides);
        self
    }

    /// Returns the name of the theme this stylist started from.
    pub fn theme_name(&self) -> &str {
        &self.theme
    }

    /// Returns the complete cascade set.
    pub fn cascade(&self) -> &GraphCss {
        &self.rules
    }

    /// Resolves the styles of `element` without evaluating them.
    pub fn resolve(&self, element: &dyn Element) -> StyleSet {
        self.rules.resolve(element)
    }

    /// Resolves and evaluates the styles of `element`.
    pub fn compute(&self, element: &dyn Element) -> ComputedStyle {
        let computed = self.resolve(element).evaluate(element);
        trace!(kind:% = element.kind(), styles = computed.len(); "Element styles computed");
        computed
    }

    /// Lays out the label of `owner` according to its `labelFormat`.
    ///
    /// Table labels are expanded into table, row and cell elements, each
    /// styled through the cascade like any other element. Returns `None` if
    /// no label format applies to `owner`.
    pub fn compute_label(&self, owner: Arc<dyn Element>) -> Option<ComputedLabel> {
        let styles = self.compute(owner.as_ref());
        let label = match styles.label_format()? {
            LabelFormat::Template(text) => ComputedLabel::Text(text.evaluate(owner.as_ref())),
            LabelFormat::Table(table) => {
                let tree = table.instantiate(owner.clone());
                ComputedLabel::Table(self.compute_label_table(&tree))
            }
        };
        Some(label)
    }

    fn compute_label_table(&self, tree: &LabelTree) -> ComputedLabelTable {
        let rows = tree
            .rows
            .iter()
            .map(|row| ComputedLabelRow {
                styles: self.compute(row.element.as_ref()),
                cells: row
                    .cells
                    .iter()
                    .map(|cell| ComputedLabelCell {
                        styles: self.compute(cell.element.as_ref()),
                        text: cell.text.clone(),
                    })
                    .collect(),
            })
            .collect();
        ComputedLabelTable {
            styles: self.compute(tree.element.as_ref()),
            rows,
        }
    }
}

/// A label laid out and styled for one element.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedLabel {
    /// Plain text, absent if the element has nothing to show.
    Text(Option<String>),
    Table(ComputedLabelTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLabelTable {
    pub styles: ComputedStyle,
    pub rows: Vec<ComputedLabelRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLabelRow {
    pub styles: ComputedStyle,
    pub cells: Vec<ComputedLabelCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLabelCell {
    pub styles: ComputedStyle,
    pub text: Option<String>,
}

impl ComputedLabelTable {
    /// Returns `true` unless the table's `rendered` style is `false`.
    pub fn is_rendered(&self) -> bool {
        self.styles.flag(StyleKey::Rendered).unwrap_or(true)
    }
}
