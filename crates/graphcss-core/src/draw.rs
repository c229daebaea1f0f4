//! Typed value domains for diagram style properties.
//!
//! Every style property of a graph element draws its value from one of the
//! domains defined here (or from [`Color`](crate::color::Color), text,
//! numbers and flags). The names accepted by `FromStr` and produced by
//! `Display` follow Graphviz attribute values, which is what the renderers
//! built on top of the engine emit.
//!
//! # Overview
//!
//! - [`LineBrush`] and [`LineType`]: line pattern, width, caps and joins
//! - [`Arrow`] and [`EdgeDirection`]: edge end decorations
//! - [`NodeShape`]: vertex outline shapes
//! - [`Alignment`] and [`VerticalAlignment`]: label placement

/// Declares a fieldless enum whose variants map one-to-one onto keywords.
///
/// Generates `as_str`, `ALL`, `FromStr` (with an error listing the valid
/// keywords) and `Display`.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $what:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $keyword:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Returns the keyword for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($keyword => Ok(Self::$variant),)+
                    _ => Err(format!(
                        concat!("invalid ", $what, " `{}`, valid values: {}"),
                        s,
                        [$($keyword),+].join(", ")
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod align;
mod arrow;
mod line;
mod shape;

pub use align::{Alignment, VerticalAlignment};
pub use arrow::{Arrow, EdgeDirection};
pub use line::{LineBrush, LineType};
pub use shape::NodeShape;
