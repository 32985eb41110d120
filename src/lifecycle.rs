//! Binding lifecycle definitions.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::DiError;

/// Lifecycles controlling instance reuse
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{create_container, BindingOptions, Value};
///
/// let container = create_container();
/// container.factory("config", |_| Value::new(String::from("db")), BindingOptions::new()).unwrap();
/// container
///     .factory("request", |_| Value::new(0u64), BindingOptions::new().lifecycle("transient"))
///     .unwrap();
///
/// // Singleton: same instance every time
/// let a = container.instance("config").unwrap();
/// let b = container.instance("config").unwrap();
/// assert!(a.ptr_eq(&b));
///
/// // Transient: new instance every time
/// let a = container.instance("request").unwrap();
/// let b = container.instance("request").unwrap();
/// assert!(!a.ptr_eq(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
// Deserialized through `FromStr`, so typed config accepts the same names as strings.
#[cfg_attr(feature = "config", serde(rename_all = "lowercase", try_from = "String"))]
pub enum Lifecycle {
    /// Created once per binding, cached after the first non-empty resolution
    #[default]
    Singleton,
    /// Created on every resolution, never cached
    Transient,
}

impl Lifecycle {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Singleton => "singleton",
            Lifecycle::Transient => "transient",
        }
    }

    /// Parses an optional lifecycle name, falling back to the default.
    pub(crate) fn parse_or_default(name: Option<&str>) -> Result<Self, DiError> {
        match name {
            Some(name) => name.parse(),
            None => Ok(Lifecycle::default()),
        }
    }
}

impl FromStr for Lifecycle {
    type Err = DiError;

    /// Case-insensitive; `"default"` is an alias for the default lifecycle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "singleton" => Ok(Lifecycle::Singleton),
            "transient" => Ok(Lifecycle::Transient),
            "default" => Ok(Lifecycle::default()),
            _ => Err(DiError::UnknownLifecycle(s.to_string())),
        }
    }
}

impl TryFrom<String> for Lifecycle {
    type Error = DiError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
