//! Horizontal and vertical label alignment.

keyword_enum! {
    /// Horizontal alignment of a label within its container.
    pub enum Alignment: "alignment" {
        /// Flush left.
        Left => "left",
        /// Centered (Graphviz default).
        Center => "center",
        /// Flush right.
        Right => "right",
    }
}

keyword_enum! {
    /// Vertical alignment of a label within its container.
    pub enum VerticalAlignment: "vertical alignment" {
        /// Top edge.
        Top => "top",
        /// Vertically centered (Graphviz default).
        Middle => "middle",
        /// Bottom edge.
        Bottom => "bottom",
    }
}
