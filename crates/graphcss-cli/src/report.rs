//! Plain-text rendering of computed styles.
//!
//! Each element is listed under a header naming its kind, classes and id,
//! followed by its computed styles as `key = value` lines. Label tables are
//! expanded below their owner with their rows and cells:
//!
//! ```text
//! api (vertex .Service)
//!   color = #2180c7
//!   shape = rectangle
//!   label: table
//!     cellPadding = 0
//!     row
//!       cell "api"
//!         verticalAlign = bottom
//! ```

use std::{
    fmt::{self, Write},
    sync::Arc,
};

use graphcss::{
    ComputedLabel, ComputedLabelTable, ComputedStyle, Stylist,
    element::{DiagramElement, Element},
};

use crate::diagram::Diagram;

const INDENT: &str = "  ";

/// Renders the computed styles of every element of `diagram`.
pub fn render(stylist: &Stylist, diagram: &Diagram) -> String {
    let mut out = String::new();
    for (name, element) in diagram.iter() {
        write_element(&mut out, stylist, name, element)
            .expect("Writing to String buffer is infallible");
    }
    out
}

fn write_element(
    out: &mut String,
    stylist: &Stylist,
    name: &str,
    element: &Arc<DiagramElement>,
) -> fmt::Result {
    write!(out, "{name} ({}", element.kind())?;
    for class in element.style_classes() {
        write!(out, " .{class}")?;
    }
    if let Some(id) = element.id() {
        write!(out, " #{id}")?;
    }
    writeln!(out, ")")?;

    write_styles(out, &stylist.compute(element.as_ref()), 1)?;

    let owner: Arc<dyn Element> = element.clone();
    match stylist.compute_label(owner) {
        Some(ComputedLabel::Text(Some(text))) => writeln!(out, "{INDENT}label: {text:?}")?,
        Some(ComputedLabel::Text(None)) => writeln!(out, "{INDENT}label: none")?,
        Some(ComputedLabel::Table(table)) => write_table(out, &table)?,
        None => {}
    }
    writeln!(out)
}

fn write_table(out: &mut String, table: &ComputedLabelTable) -> fmt::Result {
    if !table.is_rendered() {
        return writeln!(out, "{INDENT}label: hidden table");
    }
    writeln!(out, "{INDENT}label: table")?;
    write_styles(out, &table.styles, 2)?;
    for row in &table.rows {
        writeln!(out, "{}row", INDENT.repeat(2))?;
        write_styles(out, &row.styles, 3)?;
        for cell in &row.cells {
            match &cell.text {
                Some(text) => writeln!(out, "{}cell {text:?}", INDENT.repeat(3))?,
                None => writeln!(out, "{}cell", INDENT.repeat(3))?,
            }
            write_styles(out, &cell.styles, 4)?;
        }
    }
    Ok(())
}

fn write_styles(out: &mut String, styles: &ComputedStyle, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    for (key, value) in styles.iter() {
        writeln!(out, "{indent}{key} = {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use graphcss::config::AppConfig;

    use super::*;

    fn render_src(src: &str) -> String {
        let diagram = Diagram::parse(Path::new("test.toml"), src).unwrap();
        let stylist = Stylist::new(&AppConfig::default()).unwrap();
        render(&stylist, &diagram)
    }

    #[test]
    fn test_render_vertex() {
        let report = render_src(
            r#"
            [[element]]
            name = "api"
            kind = "vertex"
            classes = ["Service"]
            id = "api"
            label = "API"
            "#,
        );

        assert!(report.starts_with("api (vertex .Service #api)\n"));
        assert!(report.contains("  shape = rectangle\n"));
        assert!(report.contains("  label: table\n"));
        assert!(report.contains("      cell \"API\"\n"));
        assert!(report.contains("        verticalAlign = bottom\n"));
    }

    #[test]
    fn test_render_edge_label_and_hidden_table() {
        let report = render_src(
            r#"
            [[element]]
            name = "calls"
            kind = "edge"
            label = "calls"

            [[element]]
            name = "anonymous"
            kind = "vertex"
            label = ""
            "#,
        );

        assert!(report.contains("calls (edge)\n"));
        assert!(report.contains("  label: \"calls\"\n"));
        assert!(report.contains("anonymous (vertex)\n"));
        assert!(report.contains("  label: hidden table\n"));
    }
}
