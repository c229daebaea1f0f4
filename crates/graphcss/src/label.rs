//! Label formats and the label elements they expand into.
//!
//! A `labelFormat` style describes how an element's label is laid out:
//! either a plain text template, or a table of rows of cells in the manner
//! of Graphviz HTML-like labels. Tables, rows and cells are elements in
//! their own right (kinds `table`, `row` and `cell`), so rules can target
//! them: `table.Label` whose parent is a `graph`, every `cell`, and so on.
//!
//! [`LabelTable::instantiate`] turns a table format into [`LabelElement`]s
//! parented to the labeled element. Each label element carries the owner's
//! label attribute so that functions such as "label is not empty" give the
//! same answer on the table as on its owner.

use std::{fmt, sync::Arc};

use graphcss_core::{
    class::ClassName,
    element::{AttributeValue, Element, ElementKind, LABEL_ATTRIBUTE},
};

use crate::value::{StyleFunction, Value};

/// Text carried by a label: fixed, or computed from the labeled element.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelText {
    Literal(String),
    Function(StyleFunction),
}

impl LabelText {
    /// Produces the text for `element`, or `None` if absent.
    pub fn evaluate(&self, element: &dyn Element) -> Option<String> {
        match self {
            Self::Literal(text) => Some(text.clone()),
            Self::Function(function) => match function.evaluate(element)? {
                Value::Text(text) => Some(text),
                other => Some(other.to_string()),
            },
        }
    }
}

impl fmt::Display for LabelText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text:?}"),
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}

/// A cell of a label table row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCell {
    class: ClassName,
    content: LabelText,
}

impl LabelCell {
    pub fn new(class: ClassName, content: LabelText) -> Self {
        Self { class, content }
    }

    pub fn class(&self) -> ClassName {
        self.class
    }

    pub fn content(&self) -> &LabelText {
        &self.content
    }
}

/// A row of a label table.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    class: ClassName,
    cells: Vec<LabelCell>,
}

impl LabelRow {
    pub fn new(class: ClassName, cells: Vec<LabelCell>) -> Self {
        Self { class, cells }
    }

    pub fn class(&self) -> ClassName {
        self.class
    }

    pub fn cells(&self) -> &[LabelCell] {
        &self.cells
    }
}

/// A label table: rows of cells, each with its own style class.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    class: ClassName,
    rows: Vec<LabelRow>,
}

impl LabelTable {
    pub fn new(class: ClassName, rows: Vec<LabelRow>) -> Self {
        Self { class, rows }
    }

    pub fn class(&self) -> ClassName {
        self.class
    }

    pub fn rows(&self) -> &[LabelRow] {
        &self.rows
    }

    /// Expands this table into label elements under `owner`.
    ///
    /// The table's parent is `owner`, each row's parent is the table, and
    /// each cell's parent is its row. Cell texts are evaluated against
    /// `owner`.
    pub fn instantiate(&self, owner: Arc<dyn Element>) -> LabelTree {
        let label = owner.attribute(LABEL_ATTRIBUTE).cloned();
        let table = LabelElement::new(ElementKind::Table, self.class, owner.clone(), label.clone());

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let row_element =
                    LabelElement::new(ElementKind::Row, row.class, table.clone(), label.clone());
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| LabelTreeCell {
                        element: LabelElement::new(
                            ElementKind::Cell,
                            cell.class,
                            row_element.clone(),
                            label.clone(),
                        ),
                        text: cell.content.evaluate(owner.as_ref()),
                    })
                    .collect();
                LabelTreeRow {
                    element: row_element,
                    cells,
                }
            })
            .collect();

        LabelTree {
            element: table,
            rows,
        }
    }
}

/// How an element's label is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelFormat {
    /// Plain text.
    Template(LabelText),
    /// A table of rows of cells.
    Table(LabelTable),
}

impl LabelFormat {
    /// Returns the label's plain text for `element`.
    ///
    /// Table cells are joined with a space and rows with a newline. Returns
    /// `None` if no text is present at all.
    pub fn plain_text(&self, element: &dyn Element) -> Option<String> {
        match self {
            Self::Template(text) => text.evaluate(element),
            Self::Table(table) => {
                let lines: Vec<String> = table
                    .rows
                    .iter()
                    .map(|row| {
                        row.cells
                            .iter()
                            .filter_map(|cell| cell.content.evaluate(element))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                if lines.iter().all(String::is_empty) {
                    None
                } else {
                    Some(lines.join("\n"))
                }
            }
        }
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(text) => write!(f, "template({text})"),
            Self::Table(table) => {
                write!(f, "table.{}(", table.class)?;
                for (i, row) in table.rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "row.{}(", row.class)?;
                    for (j, cell) in row.cells.iter().enumerate() {
                        if j > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "cell.{}({})", cell.class, cell.content)?;
                    }
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A table, row or cell element produced by [`LabelTable::instantiate`].
#[derive(Debug)]
pub struct LabelElement {
    kind: ElementKind,
    classes: [ClassName; 1],
    parent: Arc<dyn Element>,
    label: Option<AttributeValue>,
}

impl LabelElement {
    fn new(
        kind: ElementKind,
        class: ClassName,
        parent: Arc<dyn Element>,
        label: Option<AttributeValue>,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            classes: [class],
            parent,
            label,
        })
    }
}

impl Element for LabelElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn style_classes(&self) -> &[ClassName] {
        &self.classes
    }

    fn parent(&self) -> Option<Arc<dyn Element>> {
        Some(self.parent.clone())
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        if name == LABEL_ATTRIBUTE {
            self.label.as_ref()
        } else {
            None
        }
    }
}

/// The element tree of an instantiated label table.
#[derive(Debug)]
pub struct LabelTree {
    pub element: Arc<LabelElement>,
    pub rows: Vec<LabelTreeRow>,
}

#[derive(Debug)]
pub struct LabelTreeRow {
    pub element: Arc<LabelElement>,
    pub cells: Vec<LabelTreeCell>,
}

#[derive(Debug)]
pub struct LabelTreeCell {
    pub element: Arc<LabelElement>,
    /// The cell text evaluated against the labeled element.
    pub text: Option<String>,
}
