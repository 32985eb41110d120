//! Type-erased resolved values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// A resolved value.
///
/// Either empty (a factory produced nothing) or a shared, type-erased
/// instance. Cloning is cheap and preserves identity.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Value;
///
/// let value = Value::new(42u32);
/// assert_eq!(*value.downcast::<u32>().unwrap(), 42);
/// assert!(value.downcast::<String>().is_none());
/// assert!(value.ptr_eq(&value.clone()));
///
/// assert!(Value::none().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Value(Option<AnyArc>);

impl Value {
    /// Wraps `value` in a new shared instance.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Value(Some(Arc::new(value)))
    }

    /// Wraps an existing `Arc`, keeping its identity.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Value(Some(value as AnyArc))
    }

    /// The empty value.
    pub const fn none() -> Self {
        Value(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    /// Typed view of the value, `None` when empty or of another type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.0.clone().and_then(|any| any.downcast::<T>().ok())
    }

    /// True when the value holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_ref().is_some_and(|any| (**any).is::<T>())
    }

    /// Identity comparison. Two empty values are considered identical.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Any + Send + Sync> From<Arc<T>> for Value {
    fn from(value: Arc<T>) -> Self {
        Value::from_arc(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(any) => write!(f, "Value({:p})", Arc::as_ptr(any)),
            None => f.write_str("Value(none)"),
        }
    }
}
