//! Binding descriptors for introspection and diagnostics.

use crate::lifecycle::Lifecycle;
use crate::registration::{BindingId, Registration};
use crate::token::Token;

/// Snapshot of one registered binding
///
/// Produced by [`Container::descriptors`](crate::Container::descriptors).
/// Holds no reference to the activator, so inspecting never triggers
/// resolution.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{create_container, BindingOptions, Lifecycle, Token, Value};
///
/// let container = create_container();
/// container
///     .factory("logger", |_| Value::new(()), BindingOptions::new().transient())
///     .unwrap()
///     .factory("service", |_| Value::new(()), BindingOptions::new().dependency("logger"))
///     .unwrap();
///
/// let descriptors = container.descriptors();
/// let service = descriptors.iter().find(|d| d.token == Token::from("service")).unwrap();
/// assert_eq!(service.lifecycle, Lifecycle::Singleton);
/// assert_eq!(service.dependencies, vec![Token::from("logger")]);
/// assert!(service.depends_on(&Token::from("logger")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BindingDescriptor {
    pub token: Token,
    /// Id of the registration, changes on every re-bind
    pub binding_id: BindingId,
    pub lifecycle: Lifecycle,
    /// Declared dependencies in order
    pub dependencies: Vec<Token>,
}

impl BindingDescriptor {
    pub(crate) fn from_registration(token: &Token, registration: &Registration) -> Self {
        Self {
            token: token.clone(),
            binding_id: registration.id,
            lifecycle: registration.lifecycle,
            dependencies: registration.dependencies.to_vec(),
        }
    }

    pub fn depends_on(&self, token: &Token) -> bool {
        self.dependencies.contains(token)
    }

    pub fn is_singleton(&self) -> bool {
        self.lifecycle == Lifecycle::Singleton
    }
}
