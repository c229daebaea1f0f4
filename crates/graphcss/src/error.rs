//! Error types for GraphCSS operations.
//!
//! Only construction can fail. Once a [`GraphCss`](crate::GraphCss) has been
//! built, resolving and evaluating styles are total functions: missing data
//! shows up as absent values, never as errors.

use thiserror::Error;

use crate::property::{StyleKey, ValueDomain};

/// The error type for building selectors, style sets, rules and themes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("Invalid class name: {0}")]
    InvalidClassName(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown style property `{0}`")]
    UnknownProperty(String),

    #[error("Style property `{key}` expects a {expected} value, found a {found} value")]
    DomainMismatch {
        key: StyleKey,
        expected: ValueDomain,
        found: ValueDomain,
    },

    #[error("Invalid value for style property `{key}`: {reason}")]
    InvalidValue { key: StyleKey, reason: String },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Unknown theme `{0}`")]
    UnknownTheme(String),
}
