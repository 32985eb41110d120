//! Error types for the container.

use thiserror::Error;

/// Container errors
///
/// Every failure surfaced by binding or resolution. Errors propagate
/// synchronously up the resolution stack and are never retried.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{create_container, DiError};
///
/// let container = create_container();
/// match container.instance("missing") {
///     Err(DiError::UnresolvedDependency { token }) => assert_eq!(token, "missing"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_ioc::DiError;
///
/// let circular = DiError::CircularDependency {
///     token: "A".to_string(),
///     binding_id: ":3".to_string(),
///     path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
/// };
/// assert_eq!(
///     circular.to_string(),
///     "Circular dependency detected while resolving A(:3): A -> B -> A"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// Malformed call inputs
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Token has no registered binding
    #[error("Dependency {token} could not be resolved because it has not been registered")]
    UnresolvedDependency { token: String },
    /// Token re-entered while already being resolved (includes path)
    #[error("Circular dependency detected while resolving {token}({binding_id}): {}", path.join(" -> "))]
    CircularDependency {
        token: String,
        binding_id: String,
        path: Vec<String>,
    },
    /// Lifecycle name not recognized
    #[error("Unable to parse {0} as Lifecycle")]
    UnknownLifecycle(String),
    /// Strict resolution produced an empty value
    #[error("{token}({binding_id}) did not return a value in strict mode")]
    StrictModeViolation { token: String, binding_id: String },
    /// Dependency chain deeper than the resolution limit
    #[error("Maximum resolution depth {0} exceeded")]
    DepthExceeded(usize),
    /// Typed access found a value of another type
    #[error("Type mismatch for {token}: expected {expected}")]
    TypeMismatch { token: String, expected: &'static str },
}

impl DiError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DiError::InvalidArgument(message.into())
    }
}

/// Result type for container operations
///
/// ```rust
/// use ferrous_ioc::{DiResult, DiError};
///
/// fn failing() -> DiResult<()> {
///     Err(DiError::UnknownLifecycle("forever".to_string()))
/// }
///
/// assert!(failing().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
