//! Style themes: named bundles of rules.
//!
//! A theme exposes two cascade sets. The default rules give every kind of
//! element its general look; the instance rules refine it with class
//! specific rules and label conventions. [`StyleTheme::rules`] stacks the
//! instance rules on top of the default rules.
//!
//! Both sets are built on first access and shared afterwards.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use log::debug;

use graphcss_core::{
    draw::{Alignment, Arrow, EdgeDirection, LineType, NodeShape, VerticalAlignment},
    element::ElementKind,
};

use crate::{
    cascade::GraphCss,
    error::StyleError,
    factory::{FunctionFactory, StyleFactory, parse_class_name, parse_color},
    label::LabelText,
    selector::Selector,
    style_set::StyleSet,
};

/// Name of the built-in theme.
pub const DEFAULT_THEME_NAME: &str = "default";

/// Style class for edges from a container to its contents.
pub const THEME_EDGE_CONTAINMENT: &str = "Containment";
/// Style class for edges referring to another element.
pub const THEME_EDGE_REFERENCE: &str = "Reference";

pub const COLOR_LIGHT_GREY: &str = "#cccccc";
pub const COLOR_MID_GREY: &str = "#b3b3b3";
pub const COLOR_DARK_GREY: &str = "#929292";
pub const COLOR_MID_BLUE: &str = "#2180c7";
pub const COLOR_LIGHT_GREY_BLUE: &str = "#77a7c2";
pub const COLOR_WHITE: &str = "#ffffff";

/// Style class of the table, row and cell making up a label.
pub const LABEL_TABLE_CLASS: &str = "Label";
pub const LABEL_ROW_CLASS: &str = "LabelRow";
pub const LABEL_CELL_CLASS: &str = "LabelCell";

/// A named bundle of rules.
pub trait StyleTheme: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Rules giving each kind of element its general look.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme's rules cannot be built.
    fn default_rules(&self) -> Result<&GraphCss, StyleError>;

    /// Rules refining the default rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme's rules cannot be built.
    fn instance_rules(&self) -> Result<&GraphCss, StyleError>;

    /// The instance rules stacked on top of the default rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme's rules cannot be built.
    fn rules(&self) -> Result<GraphCss, StyleError> {
        Ok(self.default_rules()?.merge(self.instance_rules()?))
    }
}

/// The built-in theme: blue vertices, grey edges, and table labels.
pub struct DefaultStyleTheme {
    styles: StyleFactory,
    functions: FunctionFactory,
    default_rules: OnceLock<Result<GraphCss, StyleError>>,
    instance_rules: OnceLock<Result<GraphCss, StyleError>>,
}

impl DefaultStyleTheme {
    pub fn new(styles: StyleFactory, functions: FunctionFactory) -> Self {
        Self {
            styles,
            functions,
            default_rules: OnceLock::new(),
            instance_rules: OnceLock::new(),
        }
    }

    fn build_default_rules(&self) -> Result<GraphCss, StyleError> {
        let styles = &self.styles;
        let rules = GraphCss::builder()
            .add_rule(Selector::graph().with_styles([
                styles.shape_brush(LineType::Dotted, 0.5, false, false),
                styles.line_color(parse_color(COLOR_LIGHT_GREY_BLUE)?),
            ]))
            .add_rule(Selector::vertex().with_styles([
                styles.color(parse_color(COLOR_MID_BLUE)?),
                styles.fill_color(parse_color(COLOR_WHITE)?),
                styles.line_color(parse_color(COLOR_MID_GREY)?),
                styles.font_family("Verdana"),
                styles.font_size(8.0),
                styles.shape(NodeShape::Rectangle),
                styles.shape_brush(LineType::Solid, 0.5, true, true),
            ]))
            .add_rule(Selector::edge().with_styles([
                styles.color(parse_color(COLOR_DARK_GREY)?),
                styles.line_color(parse_color(COLOR_MID_GREY)?),
                styles.font_family("Verdana"),
                styles.font_size(7.0),
                styles.line_brush(LineType::Solid, 0.5, false, false),
                styles.arrow_head(Arrow::Vee),
                styles.arrow_tail(Arrow::None),
                styles.direction(EdgeDirection::Forward),
                styles.arrow_scale(0.5),
            ]))
            .build();

        debug!(theme = self.name(), rules = rules.len(); "Default rules built");
        Ok(rules)
    }

    fn build_instance_rules(&self) -> Result<GraphCss, StyleError> {
        let styles = &self.styles;
        let functions = &self.functions;

        // One row with one cell holding the element label.
        let table_label = StyleSet::new().with(styles.label_format(styles.label_table(
            parse_class_name(LABEL_TABLE_CLASS)?,
            vec![styles.label_row(
                parse_class_name(LABEL_ROW_CLASS)?,
                vec![styles.label_cell(
                    parse_class_name(LABEL_CELL_CLASS)?,
                    LabelText::Function(functions.label()),
                )],
            )],
        )));
        let plain_label = StyleSet::new().with(styles.label_format(
            styles.label_string_template(LabelText::Function(functions.label())),
        ));

        let graph_label = Selector::class(ElementKind::Table, parse_class_name(LABEL_TABLE_CLASS)?)
            .with_parent(Selector::graph());

        let rules = GraphCss::builder()
            .add_rule(Selector::vertex().with_style_set(table_label.clone()))
            .add_rule(Selector::edge().with_style_set(plain_label))
            .add_rule(Selector::graph().with_style_set(table_label))
            .add_rule(graph_label.with_styles([
                styles.font_family("Verdana"),
                styles.font_size(12.0),
                styles.color(parse_color(COLOR_DARK_GREY)?),
            ]))
            // Empty labels are not rendered, so they leave no bordered or
            // filled area behind.
            .add_rule(Selector::table().with_styles([
                styles.rendered_fn(functions.not_empty_label())?,
                styles.cell_padding(0.0),
                styles.cell_border_width(0.0),
                styles.cell_spacing(0.0),
                styles.border_width(0.0),
            ]))
            .add_rule(Selector::cell().with_styles([
                styles.vertical_align(VerticalAlignment::Bottom),
            ]))
            .add_rule(Selector::graph().with_styles([styles.compound(true)]))
            .add_rule(Selector::graph().with_styles([
                styles.align(Alignment::Left),
                styles.vertical_align(VerticalAlignment::Top),
            ]))
            .add_rule(
                Selector::class(ElementKind::Edge, parse_class_name(THEME_EDGE_CONTAINMENT)?)
                    .with_styles([
                        styles.direction(EdgeDirection::Both),
                        styles.arrow_tail(Arrow::Diamond),
                    ]),
            )
            .build();

        debug!(theme = self.name(), rules = rules.len(); "Instance rules built");
        Ok(rules)
    }
}

impl Default for DefaultStyleTheme {
    fn default() -> Self {
        Self::new(StyleFactory::new(), FunctionFactory::new())
    }
}

impl fmt::Debug for DefaultStyleTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultStyleTheme")
            .field("default_rules_built", &self.default_rules.get().is_some())
            .field("instance_rules_built", &self.instance_rules.get().is_some())
            .finish_non_exhaustive()
    }
}

impl StyleTheme for DefaultStyleTheme {
    fn name(&self) -> &str {
        DEFAULT_THEME_NAME
    }

    fn default_rules(&self) -> Result<&GraphCss, StyleError> {
        self.default_rules
            .get_or_init(|| self.build_default_rules())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn instance_rules(&self) -> Result<&GraphCss, StyleError> {
        self.instance_rules
            .get_or_init(|| self.build_instance_rules())
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Names of the built-in themes.
pub fn theme_names() -> &'static [&'static str] {
    &[DEFAULT_THEME_NAME]
}

/// Looks up a built-in theme.
///
/// Each theme is created once per process and shared by every caller.
///
/// # Errors
///
/// Returns [`StyleError::UnknownTheme`] if no theme is called `name`.
pub fn theme_by_name(name: &str) -> Result<Arc<dyn StyleTheme>, StyleError> {
    static DEFAULT_THEME: OnceLock<Arc<DefaultStyleTheme>> = OnceLock::new();

    match name {
        DEFAULT_THEME_NAME => {
            let theme = DEFAULT_THEME.get_or_init(|| Arc::new(DefaultStyleTheme::default()));
            Ok(theme.clone())
        }
        _ => Err(StyleError::UnknownTheme(name.to_string())),
    }
}
