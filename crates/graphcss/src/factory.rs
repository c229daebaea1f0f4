//! Typed constructors for styles and style functions.
//!
//! [`StyleFactory`] builds one [`Style`] per property with the value type the
//! property expects, so rules written through it cannot mix up domains.
//! [`FunctionFactory`] builds the per-element functions used for deferred
//! values such as "the element's label".

use graphcss_core::{
    class::ClassName,
    color::Color,
    draw::{Alignment, Arrow, EdgeDirection, LineBrush, LineType, NodeShape, VerticalAlignment},
    element::Element,
};

use crate::{
    error::StyleError,
    label::{LabelCell, LabelFormat, LabelRow, LabelTable, LabelText},
    property::{StyleKey, ValueDomain},
    style_set::Style,
    value::{StyleFunction, StyleValue, Value},
};

/// Placeholder replaced with the element label in label templates.
pub const LABEL_PLACEHOLDER: &str = "{label}";

/// Parses a color for a style rule.
pub(crate) fn parse_color(color: &str) -> Result<Color, StyleError> {
    Color::new(color).map_err(StyleError::InvalidColor)
}

/// Interns a style class name for a style rule.
pub(crate) fn parse_class_name(name: &str) -> Result<ClassName, StyleError> {
    ClassName::new(name).map_err(StyleError::InvalidClassName)
}

/// Builds literal styles for every property.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleFactory;

impl StyleFactory {
    pub fn new() -> Self {
        Self
    }

    fn literal(&self, key: StyleKey, value: Value) -> Style {
        Style::new_unchecked(key, StyleValue::Literal(value))
    }

    pub fn color(&self, color: Color) -> Style {
        self.literal(StyleKey::Color, Value::Color(color))
    }

    pub fn fill_color(&self, color: Color) -> Style {
        self.literal(StyleKey::FillColor, Value::Color(color))
    }

    pub fn line_color(&self, color: Color) -> Style {
        self.literal(StyleKey::LineColor, Value::Color(color))
    }

    pub fn font_family(&self, family: &str) -> Style {
        self.literal(StyleKey::FontFamily, Value::Text(family.to_string()))
    }

    pub fn font_size(&self, size: f64) -> Style {
        self.literal(StyleKey::FontSize, Value::Number(size))
    }

    pub fn shape(&self, shape: NodeShape) -> Style {
        self.literal(StyleKey::Shape, Value::Shape(shape))
    }

    /// Builds the brush used for shape outlines.
    pub fn shape_brush(
        &self,
        line_type: LineType,
        width: f32,
        rounded_caps: bool,
        rounded_joins: bool,
    ) -> Style {
        let brush = LineBrush::new(line_type, width)
            .with_rounded_caps(rounded_caps)
            .with_rounded_joins(rounded_joins);
        self.literal(StyleKey::ShapeBrush, Value::LineBrush(brush))
    }

    /// Builds the brush used for edge lines.
    pub fn line_brush(
        &self,
        line_type: LineType,
        width: f32,
        rounded_caps: bool,
        rounded_joins: bool,
    ) -> Style {
        let brush = LineBrush::new(line_type, width)
            .with_rounded_caps(rounded_caps)
            .with_rounded_joins(rounded_joins);
        self.literal(StyleKey::LineBrush, Value::LineBrush(brush))
    }

    pub fn arrow_head(&self, arrow: Arrow) -> Style {
        self.literal(StyleKey::ArrowHead, Value::Arrow(arrow))
    }

    pub fn arrow_tail(&self, arrow: Arrow) -> Style {
        self.literal(StyleKey::ArrowTail, Value::Arrow(arrow))
    }

    pub fn arrow_scale(&self, scale: f64) -> Style {
        self.literal(StyleKey::ArrowScale, Value::Number(scale))
    }

    pub fn direction(&self, direction: EdgeDirection) -> Style {
        self.literal(StyleKey::Direction, Value::Direction(direction))
    }

    pub fn align(&self, align: Alignment) -> Style {
        self.literal(StyleKey::Align, Value::Alignment(align))
    }

    pub fn vertical_align(&self, align: VerticalAlignment) -> Style {
        self.literal(StyleKey::VerticalAlign, Value::VerticalAlignment(align))
    }

    pub fn compound(&self, compound: bool) -> Style {
        self.literal(StyleKey::Compound, Value::Flag(compound))
    }

    pub fn rendered(&self, rendered: bool) -> Style {
        self.literal(StyleKey::Rendered, Value::Flag(rendered))
    }

    /// Decides per element whether it is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DomainMismatch`] unless `function` produces flags.
    pub fn rendered_fn(&self, function: StyleFunction) -> Result<Style, StyleError> {
        Style::try_new(StyleKey::Rendered, function)
    }

    pub fn cell_padding(&self, padding: f64) -> Style {
        self.literal(StyleKey::CellPadding, Value::Number(padding))
    }

    pub fn cell_spacing(&self, spacing: f64) -> Style {
        self.literal(StyleKey::CellSpacing, Value::Number(spacing))
    }

    pub fn cell_border_width(&self, width: f64) -> Style {
        self.literal(StyleKey::CellBorderWidth, Value::Number(width))
    }

    pub fn border_width(&self, width: f64) -> Style {
        self.literal(StyleKey::BorderWidth, Value::Number(width))
    }

    pub fn tooltip(&self, tooltip: &str) -> Style {
        self.literal(StyleKey::Tooltip, Value::Text(tooltip.to_string()))
    }

    /// Computes the tooltip per element.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DomainMismatch`] unless `function` produces text.
    pub fn tooltip_fn(&self, function: StyleFunction) -> Result<Style, StyleError> {
        Style::try_new(StyleKey::Tooltip, function)
    }

    pub fn label_format(&self, format: LabelFormat) -> Style {
        self.literal(StyleKey::LabelFormat, Value::LabelFormat(format))
    }

    /// Builds a table label format from its rows.
    pub fn label_table(&self, class: ClassName, rows: Vec<LabelRow>) -> LabelFormat {
        LabelFormat::Table(LabelTable::new(class, rows))
    }

    pub fn label_row(&self, class: ClassName, cells: Vec<LabelCell>) -> LabelRow {
        LabelRow::new(class, cells)
    }

    pub fn label_cell(&self, class: ClassName, content: LabelText) -> LabelCell {
        LabelCell::new(class, content)
    }

    /// Builds a plain text label format.
    pub fn label_string_template(&self, content: LabelText) -> LabelFormat {
        LabelFormat::Template(content)
    }
}

/// Builds the per-element functions behind deferred style values.
///
/// The label functions are created once per factory, so every style built
/// from the same factory shares them.
#[derive(Debug, Clone)]
pub struct FunctionFactory {
    label: StyleFunction,
    not_empty_label: StyleFunction,
}

impl FunctionFactory {
    pub fn new() -> Self {
        Self {
            label: StyleFunction::new("label", ValueDomain::Text, |element| {
                element.label().map(|label| Value::Text(label.to_string()))
            }),
            not_empty_label: StyleFunction::new("notEmptyLabel", ValueDomain::Flag, |element| {
                Some(Value::Flag(element.label().is_some_and(|l| !l.is_empty())))
            }),
        }
    }

    /// The element's label text, absent if the element has none.
    pub fn label(&self) -> StyleFunction {
        self.label.clone()
    }

    /// `true` iff the element has a non-empty label.
    pub fn not_empty_label(&self) -> StyleFunction {
        self.not_empty_label.clone()
    }

    /// The named attribute rendered as text, absent if the element lacks it.
    pub fn attribute(&self, name: &str) -> StyleFunction {
        let attribute = name.to_string();
        StyleFunction::new(
            &format!("attribute[{name}]"),
            ValueDomain::Text,
            move |element| {
                element
                    .attribute(&attribute)
                    .map(|value| Value::Text(value.to_string()))
            },
        )
    }

    /// `true` iff the element has the named attribute and it is not empty
    /// text.
    pub fn not_empty_attribute(&self, name: &str) -> StyleFunction {
        let attribute = name.to_string();
        StyleFunction::new(
            &format!("notEmptyAttribute[{name}]"),
            ValueDomain::Flag,
            move |element| {
                let present = element
                    .attribute(&attribute)
                    .is_some_and(|value| !value.is_empty());
                Some(Value::Flag(present))
            },
        )
    }

    /// The element id, absent if the element has none.
    pub fn id(&self) -> StyleFunction {
        StyleFunction::new("id", ValueDomain::Text, |element| {
            element.id().map(|id| Value::Text(id.to_string()))
        })
    }

    /// The same text for every element.
    pub fn literal_string(&self, text: &str) -> StyleFunction {
        let text = text.to_string();
        StyleFunction::new("literal", ValueDomain::Text, move |_| {
            Some(Value::Text(text.clone()))
        })
    }

    /// `template` with every [`LABEL_PLACEHOLDER`] replaced by the element
    /// label.
    ///
    /// Absent when the template refers to the label and the element has
    /// none.
    pub fn label_template(&self, template: &str) -> StyleFunction {
        let template = template.to_string();
        StyleFunction::new("labelTemplate", ValueDomain::Text, move |element| {
            expand_label_template(&template, element).map(Value::Text)
        })
    }
}

impl Default for FunctionFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn expand_label_template(template: &str, element: &dyn Element) -> Option<String> {
    if !template.contains(LABEL_PLACEHOLDER) {
        return Some(template.to_string());
    }
    let label = element.label()?;
    Some(template.replace(LABEL_PLACEHOLDER, label))
}
