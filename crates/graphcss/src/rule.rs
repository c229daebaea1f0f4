//! Rules: a selector paired with the styles it applies.

use std::fmt;

use crate::{selector::Selector, style_set::StyleSet};

/// A single cascade rule.
///
/// The order is the rule's position in its cascade set. It is assigned when
/// the rule is added to a [`GraphCssBuilder`](crate::GraphCssBuilder) and
/// breaks ties between rules of equal specificity: the later rule wins.
///
/// The layer records which merged cascade set the rule came from. Rules of
/// a later layer override earlier layers whatever their specificity.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    selector: Selector,
    styles: StyleSet,
    layer: u32,
    order: u32,
}

impl Rule {
    pub fn new(selector: Selector, styles: StyleSet) -> Self {
        Self {
            selector,
            styles,
            layer: 0,
            order: 0,
        }
    }

    pub(crate) fn with_position(mut self, layer: u32, order: u32) -> Self {
        self.layer = layer;
        self.order = order;
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.selector, self.styles)
    }
}
