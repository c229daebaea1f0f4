//! Style class names using string interning
//!
//! Selectors compare class names once per rule per element, so class names
//! are interned into a process-wide table and compared as symbols.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock},
};

use log::warn;
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for class names.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner. The lock
/// is only taken when a class name is created or displayed, never while
/// matching.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| {
            warn!("Class name interner lock was poisoned, recovering");
            poisoned.into_inner()
        })
}

/// An interned style class name such as `Containment` or `Label`.
///
/// # Examples
///
/// ```
/// use graphcss_core::class::ClassName;
///
/// let containment = ClassName::new("Containment").unwrap();
/// assert_eq!(containment, ClassName::new("Containment").unwrap());
/// assert_eq!(containment.to_string(), "Containment");
///
/// assert!(ClassName::new("").is_err());
/// assert!(ClassName::new("two words").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassName(DefaultSymbol);

impl ClassName {
    /// Creates a `ClassName`, interning `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or contains whitespace.
    pub fn new(name: &str) -> Result<Self, String> {
        if name.is_empty() {
            return Err("class name must not be empty".to_string());
        }
        if name.chars().any(char::is_whitespace) {
            return Err(format!("class name `{name}` must not contain whitespace"));
        }
        Ok(Self(interner().get_or_intern(name)))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{name}")
    }
}

impl FromStr for ClassName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
