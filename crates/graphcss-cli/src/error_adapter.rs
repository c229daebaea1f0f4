//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error types and
//! miette's rich diagnostic formatting. Errors located in a TOML file are
//! rendered with a snippet of that file.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use graphcss::StyleError;

use crate::error::{CliError, SourceError};

/// Adapter for an error located in a source file.
pub struct SourceAdapter<'a> {
    /// The wrapped error
    error: &'a SourceError,
    /// Diagnostic code
    code: &'static str,
}

impl<'a> SourceAdapter<'a> {
    /// Create a new source adapter.
    pub fn new(error: &'a SourceError, code: &'static str) -> Self {
        Self { error, code }
    }
}

impl fmt::Debug for SourceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceAdapter")
            .field("error", &self.error)
            .field("code", &self.code)
            .finish()
    }
}

impl fmt::Display for SourceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.path.display(), self.error.message)
    }
}

impl std::error::Error for SourceAdapter<'_> {}

impl MietteDiagnostic for SourceAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error
            .help
            .as_deref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.error.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.error.span.clone()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`CliError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "graphcss::io",
            CliError::MissingConfig(_) => "graphcss::config",
            CliError::Toml(_) => "graphcss::toml",
            CliError::Diagram(_) => "graphcss::diagram",
            CliError::Style(_) => "graphcss::style",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CliError::MissingConfig(_) => "check the path given with --config",
            CliError::Style(StyleError::UnknownTheme(_)) => "the built-in theme is `default`",
            CliError::Style(StyleError::UnknownProperty(_)) => {
                "property names are camelCase, such as `fillColor` or `lineBrush`"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error with a snippet of the file it was found in.
    Source(SourceAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Source(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Source(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Source(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Source(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Source(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Source(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Toml(source) => vec![Reportable::Source(SourceAdapter::new(
            source,
            "graphcss::toml",
        ))],
        CliError::Diagram(source) => vec![Reportable::Source(SourceAdapter::new(
            source,
            "graphcss::diagram",
        ))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_source_error_is_labeled() {
        let source = SourceError::new("diagram.toml", "name = 1", "invalid type")
            .with_span(7..8)
            .with_help("names are strings");
        let err = CliError::Toml(source);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "diagram.toml: invalid type");
        assert_eq!(reportables[0].code().unwrap().to_string(), "graphcss::toml");
        assert_eq!(
            reportables[0].help().unwrap().to_string(),
            "names are strings"
        );

        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 7);
    }

    #[test]
    fn test_source_error_without_span() {
        let source = SourceError::new("diagram.toml", "", "empty");
        let err = CliError::Diagram(source);

        let reportables = to_reportables(&err);
        assert!(reportables[0].labels().is_none());
        assert_eq!(
            reportables[0].code().unwrap().to_string(),
            "graphcss::diagram"
        );
    }

    #[test]
    fn test_non_source_error() {
        let err = CliError::MissingConfig(PathBuf::from("missing.toml"));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Missing configuration file: missing.toml");
                assert_eq!(e.code().unwrap().to_string(), "graphcss::config");
                assert!(e.help().is_some());
            }
            Reportable::Source(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_style_error_code() {
        let err = CliError::Style(StyleError::UnknownTheme("dark".to_string()));

        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].code().unwrap().to_string(), "graphcss::style");
        assert_eq!(
            reportables[0].help().unwrap().to_string(),
            "the built-in theme is `default`"
        );
    }
}
