//! Diagram description files.
//!
//! A diagram file lists the elements to style as `[[element]]` tables:
//!
//! ```toml
//! [[element]]
//! name = "system"
//! kind = "graph"
//! label = "System"
//!
//! [[element]]
//! name = "api"
//! kind = "vertex"
//! parent = "system"
//! classes = ["Service"]
//! attributes = { owner = "platform" }
//! ```
//!
//! A `parent` must name an element declared earlier in the file, so the
//! element tree is built in a single pass.

use std::{path::Path, sync::Arc};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use toml::Spanned;

use graphcss::{
    class::ClassName,
    element::{AttributeValue, DiagramElement, ElementKind},
};

use crate::error::{CliError, SourceError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiagramFile {
    #[serde(default)]
    element: Vec<ElementEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    name: Spanned<String>,
    kind: ElementKind,
    #[serde(default)]
    parent: Option<Spanned<String>>,
    #[serde(default)]
    classes: Vec<Spanned<String>>,
    #[serde(default)]
    id: Option<String>,
    /// Shorthand for the `label` attribute.
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    attributes: IndexMap<String, AttributeValue>,
}

/// The elements of a diagram file, keyed by name in declaration order.
#[derive(Debug, Default)]
pub struct Diagram {
    elements: IndexMap<String, Arc<DiagramElement>>,
}

impl Diagram {
    /// Parses the diagram file `src` read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Toml`] if `src` is not a valid diagram file, and
    /// [`CliError::Diagram`] for duplicate names, unknown parents and invalid
    /// class names.
    pub fn parse(path: &Path, src: &str) -> Result<Self, CliError> {
        let file: DiagramFile =
            toml::from_str(src).map_err(|err| CliError::toml(path, src, &err))?;
        let invalid = |message: String, span| {
            CliError::Diagram(SourceError::new(path, src, message).with_span(span))
        };

        let mut elements: IndexMap<String, Arc<DiagramElement>> = IndexMap::new();
        for entry in file.element {
            let name = entry.name.get_ref();
            if elements.contains_key(name.as_str()) {
                return Err(invalid(
                    format!("duplicate element name `{name}`"),
                    entry.name.span(),
                ));
            }

            let mut builder = DiagramElement::builder(entry.kind);
            if let Some(parent) = &entry.parent {
                let Some(parent_element) = elements.get(parent.get_ref().as_str()) else {
                    let message = format!("unknown parent `{}`", parent.get_ref());
                    return Err(CliError::Diagram(
                        SourceError::new(path, src, message)
                            .with_span(parent.span())
                            .with_help("a parent must be declared before its children"),
                    ));
                };
                builder = builder.parent(parent_element);
            }
            for class in &entry.classes {
                let class_name = ClassName::new(class.get_ref())
                    .map_err(|reason| invalid(reason, class.span()))?;
                builder = builder.class(class_name);
            }
            if let Some(id) = entry.id {
                builder = builder.id(id);
            }
            for (attribute, value) in entry.attributes {
                builder = builder.attribute(attribute, value);
            }
            if let Some(label) = entry.label {
                builder = builder.label(label);
            }

            elements.insert(entry.name.into_inner(), builder.build());
        }

        debug!(elements = elements.len(); "Diagram parsed");
        Ok(Self { elements })
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by name.
    pub fn get(&self, name: &str) -> Option<&Arc<DiagramElement>> {
        self.elements.get(name)
    }

    /// Iterates over named elements in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<DiagramElement>)> {
        self.elements
            .iter()
            .map(|(name, element)| (name.as_str(), element))
    }
}
