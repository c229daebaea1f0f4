//! Error types for the GraphCSS CLI.

use std::{ops::Range, path::PathBuf};

use thiserror::Error;

use graphcss::StyleError;

/// Errors raised while resolving the styles of a diagram file.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing configuration file: {0}")]
    MissingConfig(PathBuf),

    /// A TOML file could not be parsed.
    #[error("Failed to parse {}: {}", .0.path.display(), .0.message)]
    Toml(SourceError),

    /// A diagram file parsed but describes an invalid element tree.
    #[error("Invalid diagram {}: {}", .0.path.display(), .0.message)]
    Diagram(SourceError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),
}

/// An error located in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub path: PathBuf,
    pub src: String,
    pub message: String,
    pub span: Option<Range<usize>>,
    pub help: Option<String>,
}

impl SourceError {
    pub fn new(path: impl Into<PathBuf>, src: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            src: src.into(),
            message: message.into(),
            span: None,
            help: None,
        }
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl CliError {
    /// Wraps a TOML deserialization error of the file at `path`.
    pub fn toml(path: impl Into<PathBuf>, src: &str, err: &toml::de::Error) -> Self {
        let mut error = SourceError::new(path, src, err.message());
        if let Some(span) = err.span() {
            error = error.with_span(span);
        }
        Self::Toml(error)
    }
}
