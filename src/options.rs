//! Binding options.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::lifecycle::Lifecycle;
use crate::token::Token;

/// Options accepted by [`Container::bind`](crate::Container::bind) and
/// [`Container::factory`](crate::Container::factory).
///
/// `dependencies` defaults to none; `lifecycle` defaults to singleton. The
/// lifecycle is kept as a name and parsed when the binding is registered.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{BindingOptions, Lifecycle, Token};
///
/// let options = BindingOptions::new()
///     .depends_on(["connection", "logger"])
///     .lifecycle("Transient");
/// assert_eq!(options.dependencies, vec![Token::from("connection"), Token::from("logger")]);
/// assert_eq!(options.resolve_lifecycle().unwrap(), Lifecycle::Transient);
///
/// assert_eq!(BindingOptions::new().resolve_lifecycle().unwrap(), Lifecycle::Singleton);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingOptions {
    /// Tokens resolved and passed to the activator, in order
    pub dependencies: Vec<Token>,
    /// Lifecycle name, `None` for the default
    pub lifecycle: Option<String>,
}

impl BindingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends dependencies in declaration order.
    pub fn depends_on<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.dependencies.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Appends a single dependency.
    pub fn dependency(mut self, token: impl Into<Token>) -> Self {
        self.dependencies.push(token.into());
        self
    }

    /// Sets the lifecycle by name (`"singleton"`, `"transient"`, any case).
    pub fn lifecycle(mut self, name: impl Into<String>) -> Self {
        self.lifecycle = Some(name.into());
        self
    }

    pub fn with_lifecycle(self, lifecycle: Lifecycle) -> Self {
        self.lifecycle(lifecycle.as_str())
    }

    pub fn transient(self) -> Self {
        self.with_lifecycle(Lifecycle::Transient)
    }

    pub fn singleton(self) -> Self {
        self.with_lifecycle(Lifecycle::Singleton)
    }

    /// Parses the configured lifecycle name.
    pub fn resolve_lifecycle(&self) -> DiResult<Lifecycle> {
        Lifecycle::parse_or_default(self.lifecycle.as_deref())
    }
}

/// Serialized form of [`BindingOptions`]; dependencies are token names.
#[cfg(feature = "config")]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingOptionsConfig {
    pub dependencies: Vec<String>,
    pub lifecycle: Option<Lifecycle>,
}

#[cfg(feature = "config")]
impl From<BindingOptionsConfig> for BindingOptions {
    fn from(config: BindingOptionsConfig) -> Self {
        BindingOptions {
            dependencies: config.dependencies.into_iter().map(Token::from).collect(),
            lifecycle: config.lifecycle.map(|l| l.as_str().to_string()),
        }
    }
}

#[cfg(feature = "config")]
impl BindingOptions {
    /// Reads options from an untyped JSON object.
    ///
    /// Each field is checked separately so callers get the precise failure:
    /// malformed shapes are `InvalidArgument`, an unrecognized lifecycle name
    /// is `UnknownLifecycle`.
    ///
    /// ```rust
    /// use ferrous_ioc::{BindingOptions, DiError, Lifecycle};
    /// use serde_json::json;
    ///
    /// let options = BindingOptions::from_json(&json!({
    ///     "dependencies": ["connection", "logger"],
    ///     "lifecycle": "TRANSIENT"
    /// })).unwrap();
    /// assert_eq!(options.dependencies.len(), 2);
    /// assert_eq!(options.resolve_lifecycle().unwrap(), Lifecycle::Transient);
    ///
    /// assert!(matches!(
    ///     BindingOptions::from_json(&json!({ "dependencies": { "0": "logger" } })),
    ///     Err(DiError::InvalidArgument(_))
    /// ));
    /// ```
    pub fn from_json(value: &serde_json::Value) -> DiResult<Self> {
        use serde_json::Value as Json;

        let object = match value {
            Json::Null => return Ok(Self::default()),
            Json::Object(object) => object,
            other => {
                return Err(DiError::invalid(format!(
                    "options must be an object, got {}",
                    json_kind(other)
                )))
            }
        };

        let dependencies = match object.get("dependencies") {
            None | Some(Json::Null) => Vec::new(),
            Some(Json::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Json::String(name) => Ok(Token::from(name.clone())),
                    other => Err(DiError::invalid(format!(
                        "dependency #{} must be a string, got {}",
                        index,
                        json_kind(other)
                    ))),
                })
                .collect::<DiResult<Vec<_>>>()?,
            Some(other) => {
                return Err(DiError::invalid(format!(
                    "dependencies must be an array, got {}",
                    json_kind(other)
                )))
            }
        };

        let lifecycle = match object.get("lifecycle") {
            None | Some(Json::Null) => None,
            Some(Json::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(DiError::invalid(format!(
                    "lifecycle must be a string, got {}",
                    json_kind(other)
                )))
            }
        };

        let options = BindingOptions { dependencies, lifecycle };
        options.resolve_lifecycle()?;
        Ok(options)
    }
}

#[cfg(feature = "config")]
fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value as Json;
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
