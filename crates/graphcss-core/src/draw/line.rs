//! Line brushes for edges and shape outlines.
//!
//! A [`LineBrush`] bundles everything a renderer needs to draw a line: the
//! [`LineType`] pattern, the width, and whether caps and joins are rounded.
//!
//! # Text Form
//!
//! Brushes parse from and display as a space separated list: the line type,
//! an optional width, and the optional flags `round-caps` and `round-joins`.
//!
//! ```
//! use graphcss_core::draw::{LineBrush, LineType};
//!
//! let brush: LineBrush = "dotted 0.5".parse().unwrap();
//! assert_eq!(brush.line_type(), LineType::Dotted);
//! assert_eq!(brush.width(), 0.5);
//! assert!(!brush.rounded_caps());
//!
//! let brush = LineBrush::solid(0.5).with_rounded_caps(true).with_rounded_joins(true);
//! assert_eq!(brush.to_string(), "solid 0.5 round-caps round-joins");
//! ```

use std::{fmt, str::FromStr};

keyword_enum! {
    /// The pattern of a line.
    #[derive(Default)]
    pub enum LineType: "line type" {
        /// Solid continuous line (default)
        #[default]
        Solid => "solid",
        /// Dashed line
        Dashed => "dashed",
        /// Dotted line
        Dotted => "dotted",
        /// Heavy solid line
        Bold => "bold",
        /// Line is not drawn but still takes part in layout
        Invisible => "invis",
    }
}

/// A brush used to draw lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBrush {
    line_type: LineType,
    width: f32,
    rounded_caps: bool,
    rounded_joins: bool,
}

impl LineBrush {
    /// Creates a brush with the given pattern and width, with square caps
    /// and mitered joins.
    pub fn new(line_type: LineType, width: f32) -> Self {
        Self {
            line_type,
            width,
            rounded_caps: false,
            rounded_joins: false,
        }
    }

    /// Creates a solid brush.
    pub fn solid(width: f32) -> Self {
        Self::new(LineType::Solid, width)
    }

    /// Creates a dashed brush.
    pub fn dashed(width: f32) -> Self {
        Self::new(LineType::Dashed, width)
    }

    /// Creates a dotted brush.
    pub fn dotted(width: f32) -> Self {
        Self::new(LineType::Dotted, width)
    }

    /// Returns a copy with rounded caps switched on or off.
    pub fn with_rounded_caps(mut self, rounded: bool) -> Self {
        self.rounded_caps = rounded;
        self
    }

    /// Returns a copy with rounded joins switched on or off.
    pub fn with_rounded_joins(mut self, rounded: bool) -> Self {
        self.rounded_joins = rounded;
        self
    }

    /// Returns the line pattern.
    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Returns the line width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns `true` if line ends are rounded.
    pub fn rounded_caps(&self) -> bool {
        self.rounded_caps
    }

    /// Returns `true` if line corners are rounded.
    pub fn rounded_joins(&self) -> bool {
        self.rounded_joins
    }
}

impl Default for LineBrush {
    fn default() -> Self {
        Self::solid(1.0)
    }
}

impl FromStr for LineBrush {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let line_type = parts
            .next()
            .ok_or_else(|| "line brush must start with a line type".to_string())?
            .parse::<LineType>()?;

        let mut brush = Self::new(line_type, Self::default().width);
        for part in parts {
            match part {
                "round-caps" => brush.rounded_caps = true,
                "round-joins" => brush.rounded_joins = true,
                width => {
                    let width = width.parse::<f32>().map_err(|_| {
                        format!("invalid line brush part `{width}` in `{s}`, expected a width, round-caps or round-joins")
                    })?;
                    if !width.is_finite() || width < 0.0 {
                        return Err(format!("invalid line width `{width}` in `{s}`"));
                    }
                    brush.width = width;
                }
            }
        }

        Ok(brush)
    }
}

impl fmt::Display for LineBrush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.line_type, self.width)?;
        if self.rounded_caps {
            f.write_str(" round-caps")?;
        }
        if self.rounded_joins {
            f.write_str(" round-joins")?;
        }
        Ok(())
    }
}
