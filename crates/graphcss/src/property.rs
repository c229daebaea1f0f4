//! The closed vocabulary of style properties.
//!
//! Every [`StyleKey`] accepts values from exactly one [`ValueDomain`]. The
//! pairing is checked whenever a style is built from an untyped key and value
//! (see [`Style::try_new`](crate::Style::try_new)), so a cascade set can
//! never hold, say, an arrow where a color is expected.
//!
//! | Key | Domain |
//! |-----|--------|
//! | `color`, `fillColor`, `lineColor` | color |
//! | `fontFamily`, `tooltip` | text |
//! | `fontSize`, `arrowScale`, `cellPadding`, `cellSpacing`, `cellBorderWidth`, `borderWidth` | number |
//! | `shape` | node shape |
//! | `shapeBrush`, `lineBrush` | line brush |
//! | `arrowHead`, `arrowTail` | arrow |
//! | `direction` | edge direction |
//! | `align` | alignment |
//! | `verticalAlign` | vertical alignment |
//! | `compound`, `rendered` | flag |
//! | `labelFormat` | label format |

use std::{fmt, str::FromStr};

use crate::error::StyleError;

/// The kind of value a style property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDomain {
    Color,
    Text,
    Number,
    Flag,
    Shape,
    LineBrush,
    Arrow,
    Direction,
    Alignment,
    VerticalAlignment,
    LabelFormat,
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Color => "color",
            Self::Text => "text",
            Self::Number => "number",
            Self::Flag => "flag",
            Self::Shape => "node shape",
            Self::LineBrush => "line brush",
            Self::Arrow => "arrow",
            Self::Direction => "edge direction",
            Self::Alignment => "alignment",
            Self::VerticalAlignment => "vertical alignment",
            Self::LabelFormat => "label format",
        };
        f.write_str(name)
    }
}

/// A recognized style property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Color,
    FillColor,
    LineColor,
    FontFamily,
    FontSize,
    Shape,
    ShapeBrush,
    LineBrush,
    ArrowHead,
    ArrowTail,
    ArrowScale,
    Direction,
    LabelFormat,
    Align,
    VerticalAlign,
    Compound,
    Rendered,
    CellPadding,
    CellSpacing,
    CellBorderWidth,
    BorderWidth,
    Tooltip,
}

impl StyleKey {
    /// Every key, in declaration order.
    pub const ALL: [StyleKey; 22] = [
        Self::Color,
        Self::FillColor,
        Self::LineColor,
        Self::FontFamily,
        Self::FontSize,
        Self::Shape,
        Self::ShapeBrush,
        Self::LineBrush,
        Self::ArrowHead,
        Self::ArrowTail,
        Self::ArrowScale,
        Self::Direction,
        Self::LabelFormat,
        Self::Align,
        Self::VerticalAlign,
        Self::Compound,
        Self::Rendered,
        Self::CellPadding,
        Self::CellSpacing,
        Self::CellBorderWidth,
        Self::BorderWidth,
        Self::Tooltip,
    ];

    /// Returns the camelCase property name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::FillColor => "fillColor",
            Self::LineColor => "lineColor",
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::Shape => "shape",
            Self::ShapeBrush => "shapeBrush",
            Self::LineBrush => "lineBrush",
            Self::ArrowHead => "arrowHead",
            Self::ArrowTail => "arrowTail",
            Self::ArrowScale => "arrowScale",
            Self::Direction => "direction",
            Self::LabelFormat => "labelFormat",
            Self::Align => "align",
            Self::VerticalAlign => "verticalAlign",
            Self::Compound => "compound",
            Self::Rendered => "rendered",
            Self::CellPadding => "cellPadding",
            Self::CellSpacing => "cellSpacing",
            Self::CellBorderWidth => "cellBorderWidth",
            Self::BorderWidth => "borderWidth",
            Self::Tooltip => "tooltip",
        }
    }

    /// Returns the domain of values this property accepts.
    pub fn domain(self) -> ValueDomain {
        match self {
            Self::Color | Self::FillColor | Self::LineColor => ValueDomain::Color,
            Self::FontFamily | Self::Tooltip => ValueDomain::Text,
            Self::FontSize
            | Self::ArrowScale
            | Self::CellPadding
            | Self::CellSpacing
            | Self::CellBorderWidth
            | Self::BorderWidth => ValueDomain::Number,
            Self::Shape => ValueDomain::Shape,
            Self::ShapeBrush | Self::LineBrush => ValueDomain::LineBrush,
            Self::ArrowHead | Self::ArrowTail => ValueDomain::Arrow,
            Self::Direction => ValueDomain::Direction,
            Self::LabelFormat => ValueDomain::LabelFormat,
            Self::Align => ValueDomain::Alignment,
            Self::VerticalAlign => ValueDomain::VerticalAlignment,
            Self::Compound | Self::Rendered => ValueDomain::Flag,
        }
    }
}

impl FromStr for StyleKey {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StyleError::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
