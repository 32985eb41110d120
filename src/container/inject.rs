//! Constructor-style activators.
//!
//! A constructor is any `Fn(A1, .., An) -> T` (up to eight parameters) whose
//! parameters implement [`Inject`]. Resolved dependency values are passed
//! positionally, in declaration order.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::token::Token;
use crate::value::Value;

/// Conversion from a resolved dependency value into a constructor parameter.
pub trait Inject: Sized {
    /// Returns `None` when the value cannot be injected as `Self`.
    fn inject(value: &Value) -> Option<Self>;

    /// Expected type, for error messages.
    fn expected() -> &'static str;
}

/// Required dependency of type `T`.
impl<T: Any + Send + Sync> Inject for Arc<T> {
    fn inject(value: &Value) -> Option<Self> {
        value.downcast::<T>()
    }

    fn expected() -> &'static str {
        type_name::<T>()
    }
}

/// Optional dependency: an empty value injects `None`.
impl<T: Any + Send + Sync> Inject for Option<Arc<T>> {
    fn inject(value: &Value) -> Option<Self> {
        if value.is_none() {
            return Some(None);
        }
        value.downcast::<T>().map(Some)
    }

    fn expected() -> &'static str {
        type_name::<Option<T>>()
    }
}

/// Untyped dependency, passed through as-is.
impl Inject for Value {
    fn inject(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn expected() -> &'static str {
        "Value"
    }
}

/// Constructor invocable with resolved dependencies.
///
/// Implemented for closures and functions; `Args` is the parameter tuple and
/// only serves to keep the implementations apart.
///
/// ```rust
/// use ferrous_ioc::{create_container, BindingOptions};
/// use std::sync::Arc;
///
/// struct Logger;
/// struct Database {
///     url: Arc<String>,
///     logger: Arc<Logger>,
/// }
///
/// let container = create_container();
/// container
///     .bind("url", || String::from("postgres://localhost"), BindingOptions::new())
///     .unwrap()
///     .bind("logger", || Logger, BindingOptions::new())
///     .unwrap()
///     .bind(
///         "database",
///         |url: Arc<String>, logger: Arc<Logger>| Database { url, logger },
///         BindingOptions::new().depends_on(["url", "logger"]),
///     )
///     .unwrap();
///
/// let database = container.get::<Database>("database").unwrap();
/// assert_eq!(*database.url, "postgres://localhost");
/// ```
pub trait Constructor<Args>: Send + Sync + 'static {
    type Output: Any + Send + Sync;

    /// Number of parameters.
    fn arity(&self) -> usize;

    /// Invokes the constructor; `token` names the binding in errors.
    fn construct(&self, token: &Token, dependencies: &[Value]) -> DiResult<Self::Output>;
}

fn argument<A: Inject>(token: &Token, dependencies: &[Value], index: usize) -> DiResult<A> {
    let value = dependencies.get(index).ok_or_else(|| {
        DiError::invalid(format!(
            "constructor for {} expects dependency #{} but only {} were resolved",
            token,
            index,
            dependencies.len()
        ))
    })?;
    A::inject(value).ok_or_else(|| {
        DiError::invalid(format!(
            "dependency #{} of {} cannot be injected as {}",
            index,
            token,
            A::expected()
        ))
    })
}

macro_rules! impl_constructor {
    ($($arg:ident $index:tt),*) => {
        impl<F, T, $($arg,)*> Constructor<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> T + Send + Sync + 'static,
            T: Any + Send + Sync,
            $($arg: Inject,)*
        {
            type Output = T;

            fn arity(&self) -> usize {
                let params: &[&str] = &[$(stringify!($arg)),*];
                params.len()
            }

            #[allow(unused_variables)]
            fn construct(&self, token: &Token, dependencies: &[Value]) -> DiResult<T> {
                Ok(self($(argument::<$arg>(token, dependencies, $index)?),*))
            }
        }
    };
}

impl_constructor!();
impl_constructor!(A0 0);
impl_constructor!(A0 0, A1 1);
impl_constructor!(A0 0, A1 1, A2 2);
impl_constructor!(A0 0, A1 1, A2 2, A3 3);
impl_constructor!(A0 0, A1 1, A2 2, A3 3, A4 4);
impl_constructor!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_constructor!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_constructor!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);
