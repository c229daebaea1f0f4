//! Arrow heads, arrow tails and edge direction.

keyword_enum! {
    /// The decoration drawn at an end of an edge.
    pub enum Arrow: "arrow" {
        /// A filled triangle.
        Normal => "normal",
        /// An inverted filled triangle.
        Inv => "inv",
        /// A filled circle.
        Dot => "dot",
        /// An inverted triangle followed by a filled circle.
        InvDot => "invdot",
        /// An open circle.
        ODot => "odot",
        /// An inverted triangle followed by an open circle.
        InvODot => "invodot",
        /// No decoration.
        None => "none",
        /// A bar perpendicular to the edge.
        Tee => "tee",
        /// An open triangle.
        Empty => "empty",
        /// An inverted open triangle.
        InvEmpty => "invempty",
        /// A filled diamond.
        Diamond => "diamond",
        /// An open diamond.
        ODiamond => "odiamond",
        /// A diamond with a line through it.
        EDiamond => "ediamond",
        /// A crow's foot.
        Crow => "crow",
        /// A filled box.
        Box => "box",
        /// An open box.
        OBox => "obox",
        /// An open arrow head.
        Open => "open",
        /// Half of an open arrow head.
        HalfOpen => "halfopen",
        /// A vee shaped head.
        Vee => "vee",
    }
}

keyword_enum! {
    /// Which ends of an edge carry arrows.
    pub enum EdgeDirection: "edge direction" {
        /// Arrow head at the target.
        Forward => "forward",
        /// Arrow head at the source.
        Back => "back",
        /// Decorations at both ends.
        Both => "both",
        /// No decorations.
        None => "none",
    }
}

impl EdgeDirection {
    /// Returns `true` if the head decoration is drawn.
    pub fn draws_head(self) -> bool {
        matches!(self, Self::Forward | Self::Both)
    }

    /// Returns `true` if the tail decoration is drawn.
    pub fn draws_tail(self) -> bool {
        matches!(self, Self::Back | Self::Both)
    }
}
