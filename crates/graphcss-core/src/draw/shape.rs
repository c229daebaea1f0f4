//! Vertex outline shapes.

keyword_enum! {
    /// The outline shape of a vertex.
    pub enum NodeShape: "node shape" {
        /// A rectangle.
        Rectangle => "rectangle",
        /// A box (Graphviz default).
        Box => "box",
        /// An ellipse.
        Ellipse => "ellipse",
        /// An oval.
        Oval => "oval",
        /// A circle.
        Circle => "circle",
        /// Two concentric circles.
        DoubleCircle => "doublecircle",
        /// A small filled circle.
        Point => "point",
        /// An egg shape.
        Egg => "egg",
        /// A triangle.
        Triangle => "triangle",
        /// An inverted triangle.
        InvTriangle => "invtriangle",
        /// A diamond.
        Diamond => "diamond",
        /// A trapezium.
        Trapezium => "trapezium",
        /// A parallelogram.
        Parallelogram => "parallelogram",
        /// A house.
        House => "house",
        /// A pentagon.
        Pentagon => "pentagon",
        /// A hexagon.
        Hexagon => "hexagon",
        /// An octagon.
        Octagon => "octagon",
        /// A note with a folded corner.
        Note => "note",
        /// A folder tab.
        Tab => "tab",
        /// A folder.
        Folder => "folder",
        /// A box with depth.
        Box3d => "box3d",
        /// A UML component.
        Component => "component",
        /// Text only, no outline.
        PlainText => "plaintext",
        /// No shape at all; only the label is drawn.
        None => "none",
    }
}

impl NodeShape {
    /// Returns `true` for shapes that draw no outline.
    pub fn is_outline_free(self) -> bool {
        matches!(self, Self::PlainText | Self::None)
    }
}
