//! The container: bindings, resolution and lifecycle dispatch.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::{ReentrantMutex, RwLock};

use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::{ResolutionStack, StackGuard};
use crate::lifecycle::Lifecycle;
use crate::observer::{Observers, ResolutionObserver};
use crate::options::BindingOptions;
use crate::registration::{Activator, BindingId, Registration, Registry};
use crate::token::Token;
use crate::validation::validate_graph;
use crate::value::Value;

mod inject;

pub use inject::{Constructor, Inject};

/// Fixed type-identification string of every container.
pub const CONTAINER_TYPE: &str = "[object Container]";

/// Reserved token every container binds to itself.
pub const CONTAINER_TOKEN: &str = "@@container";

/// Inversion-of-control container.
///
/// Maps [`Token`]s to activators (constructors or factories) together with
/// their declared dependencies and [`Lifecycle`]. Resolution is depth-first:
/// every dependency is fully resolved, in declaration order, before the
/// activator that needs it runs.
///
/// `Container` is a handle; clones share the same bindings and singletons.
///
/// # Thread Safety
///
/// Bindings and realized singletons sit behind a read-write lock that is
/// never held while an activator runs. Resolutions are serialized by a
/// re-entrant lock, so a factory may call back into the container on the
/// same thread while other threads wait their turn. The lock is held for
/// the whole resolution, so a factory must not block on another thread
/// that resolves from the same container: that deadlocks.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{create_container, BindingOptions, Value};
/// use std::sync::Arc;
///
/// struct Logger;
/// struct Database {
///     logger: Arc<Logger>,
/// }
/// struct Service {
///     database: Arc<Database>,
///     logger: Arc<Logger>,
/// }
///
/// let container = create_container();
/// container
///     .bind("logger", || Logger, BindingOptions::new())?
///     .bind(
///         "database",
///         |logger: Arc<Logger>| Database { logger },
///         BindingOptions::new().dependency("logger"),
///     )?
///     .bind(
///         "service",
///         |database: Arc<Database>, logger: Arc<Logger>| Service { database, logger },
///         BindingOptions::new().depends_on(["database", "logger"]),
///     )?;
///
/// let service = container.get::<Service>("service")?;
/// assert!(Arc::ptr_eq(&service.logger, &service.database.logger));
/// # Ok::<(), ferrous_ioc::DiError>(())
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: RwLock<Registry>,
    resolution: ReentrantMutex<RefCell<ResolutionStack>>,
    observers: RwLock<Observers>,
}

impl ContainerInner {
    fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            resolution: ReentrantMutex::new(RefCell::new(ResolutionStack::default())),
            observers: RwLock::new(Observers::default()),
        }
    }
}

/// What resolution needs from a binding, copied out of the registry lock.
struct Snapshot {
    id: BindingId,
    activator: Activator,
    dependencies: Arc<[Token]>,
    lifecycle: Lifecycle,
    cached: Option<Value>,
}

impl Container {
    /// Creates an empty container with the self-binding under
    /// [`CONTAINER_TOKEN`].
    pub fn new() -> Self {
        let container = Container {
            inner: Arc::new(ContainerInner::new()),
        };
        container.bind_self();
        container
    }

    // Transient over a weak reference, so the registry never owns its container.
    fn bind_self(&self) {
        let weak: Weak<ContainerInner> = Arc::downgrade(&self.inner);
        let activator: Activator = Arc::new(move |_: &[Value]| {
            Ok::<_, DiError>(match weak.upgrade() {
                Some(inner) => Value::new(Container { inner }),
                None => Value::none(),
            })
        });
        self.insert(Token::from(CONTAINER_TOKEN), activator, Vec::new(), Lifecycle::Transient);
    }

    /// Binds `token` to a constructor.
    ///
    /// The constructor receives the resolved values of
    /// `options.dependencies` positionally, in declaration order, and its
    /// return value becomes the bound value.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the number of declared dependencies differs
    ///   from the constructor's parameter count
    /// - `UnknownLifecycle` if the lifecycle name is not recognized
    pub fn bind<C, Args>(
        &self,
        token: impl Into<Token>,
        constructor: C,
        options: BindingOptions,
    ) -> DiResult<&Self>
    where
        C: Constructor<Args>,
    {
        let token = token.into();
        let arity = constructor.arity();
        if options.dependencies.len() != arity {
            return Err(DiError::invalid(format!(
                "constructor for {} takes {} arguments but {} dependencies were declared",
                token,
                arity,
                options.dependencies.len()
            )));
        }

        let name = token.clone();
        self.try_factory(
            token,
            move |dependencies: &[Value]| constructor.construct(&name, dependencies).map(Value::new),
            options,
        )
    }

    /// Binds `token` to a factory receiving the resolved dependency values.
    ///
    /// # Errors
    ///
    /// `UnknownLifecycle` if the lifecycle name is not recognized.
    ///
    /// ```
    /// use ferrous_ioc::{create_container, BindingOptions, Value};
    ///
    /// let container = create_container();
    /// container
    ///     .factory("password", |_| Value::new("hunter2"), BindingOptions::new())?
    ///     .factory(
    ///         "masked",
    ///         |deps| {
    ///             let password = deps[0].downcast::<&'static str>().unwrap();
    ///             Value::new("*".repeat(password.len()))
    ///         },
    ///         BindingOptions::new().dependency("password"),
    ///     )?;
    ///
    /// assert_eq!(*container.get::<String>("masked")?, "*******");
    /// # Ok::<(), ferrous_ioc::DiError>(())
    /// ```
    pub fn factory<F>(&self, token: impl Into<Token>, factory: F, options: BindingOptions) -> DiResult<&Self>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.try_factory(token, move |dependencies: &[Value]| Ok(factory(dependencies)), options)
    }

    /// Like [`factory`](Self::factory), for factories that can fail. The
    /// factory's error is propagated unchanged.
    pub fn try_factory<F>(&self, token: impl Into<Token>, factory: F, options: BindingOptions) -> DiResult<&Self>
    where
        F: Fn(&[Value]) -> DiResult<Value> + Send + Sync + 'static,
    {
        let lifecycle = options.resolve_lifecycle()?;
        self.insert(token.into(), Arc::new(factory), options.dependencies, lifecycle);
        Ok(self)
    }

    fn insert(&self, token: Token, activator: Activator, dependencies: Vec<Token>, lifecycle: Lifecycle) {
        let registration = Registration::new(activator, dependencies, lifecycle);
        let id = registration.id;
        let replaced = self.inner.registry.write().insert(token.clone(), registration);
        match replaced {
            Some(previous) => tracing::debug!(%token, binding_id = %id, %previous, %lifecycle, "binding replaced"),
            None => tracing::debug!(%token, binding_id = %id, %lifecycle, "binding registered"),
        }
    }

    /// Resolves the value bound to `token`.
    ///
    /// # Errors
    ///
    /// - `UnresolvedDependency` if `token` or any transitive dependency is unbound
    /// - `CircularDependency` if resolution re-enters a token already in progress
    /// - whatever a failing factory returns
    pub fn instance(&self, token: impl Into<Token>) -> DiResult<Value> {
        let token = token.into();
        self.resolve_root(&token).map(|(value, _)| value)
    }

    /// Resolves `token` and rejects an empty result with
    /// `StrictModeViolation`.
    pub fn instance_strict(&self, token: impl Into<Token>) -> DiResult<Value> {
        let token = token.into();
        let (value, id) = self.resolve_root(&token)?;
        if value.is_none() {
            return Err(DiError::StrictModeViolation {
                token: token.to_string(),
                binding_id: id.to_string(),
            });
        }
        Ok(value)
    }

    /// Strictly resolves `token` as a `T`.
    ///
    /// # Errors
    ///
    /// Everything [`instance_strict`](Self::instance_strict) returns, plus
    /// `TypeMismatch` if the value is not a `T`.
    pub fn get<T>(&self, token: impl Into<Token>) -> DiResult<Arc<T>>
    where
        T: std::any::Any + Send + Sync,
    {
        let token = token.into();
        self.instance_strict(token.clone())?
            .downcast::<T>()
            .ok_or_else(|| DiError::TypeMismatch {
                token: token.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    fn resolve_root(&self, token: &Token) -> DiResult<(Value, BindingId)> {
        let stack = self.inner.resolution.lock();
        self.resolve(token, &stack)
    }

    fn resolve(&self, token: &Token, stack: &RefCell<ResolutionStack>) -> DiResult<(Value, BindingId)> {
        let snapshot = self.snapshot(token)?;
        let _guard = StackGuard::enter(stack, token, snapshot.id).inspect_err(|error| {
            tracing::warn!(%token, %error, "resolution rejected");
        })?;

        if let Some(value) = snapshot.cached {
            tracing::trace!(%token, "singleton cache hit");
            return Ok((value, snapshot.id));
        }

        let observers = self.inner.observers.read().clone();
        if !observers.is_empty() {
            observers.resolving(token);
        }
        let started = Instant::now();

        match self.activate(&snapshot, stack) {
            Ok(value) => {
                if !observers.is_empty() {
                    observers.resolved(token, started.elapsed());
                }
                if snapshot.lifecycle == Lifecycle::Singleton && value.is_some() {
                    self.inner
                        .registry
                        .write()
                        .store_singleton(token, snapshot.id, value.clone());
                }
                Ok((value, snapshot.id))
            }
            Err(error) => {
                if !observers.is_empty() {
                    observers.failed(token, &error);
                }
                Err(error)
            }
        }
    }

    fn snapshot(&self, token: &Token) -> DiResult<Snapshot> {
        let registry = self.inner.registry.read();
        let registration = registry.get(token).ok_or_else(|| DiError::UnresolvedDependency {
            token: token.to_string(),
        })?;
        let cached = match registration.lifecycle {
            Lifecycle::Singleton => registry.singleton(token, registration.id),
            Lifecycle::Transient => None,
        };
        Ok(Snapshot {
            id: registration.id,
            activator: registration.activator.clone(),
            dependencies: registration.dependencies.clone(),
            lifecycle: registration.lifecycle,
            cached,
        })
    }

    fn activate(&self, snapshot: &Snapshot, stack: &RefCell<ResolutionStack>) -> DiResult<Value> {
        let dependencies = snapshot
            .dependencies
            .iter()
            .map(|dependency| self.resolve(dependency, stack).map(|(value, _)| value))
            .collect::<DiResult<Vec<_>>>()?;

        tracing::debug!(
            binding_id = %snapshot.id,
            dependencies = dependencies.len(),
            depth = stack.borrow().depth(),
            "activating"
        );
        (snapshot.activator)(&dependencies)
    }

    /// Registers an observer notified of every activation.
    pub fn add_observer(&self, observer: Arc<dyn ResolutionObserver>) -> &Self {
        self.inner.observers.write().add(observer);
        self
    }

    /// Checks the declared dependency graph without running any activator.
    ///
    /// # Errors
    ///
    /// The first `UnresolvedDependency` or `CircularDependency` found, in
    /// registration order.
    pub fn validate(&self) -> DiResult<()> {
        validate_graph(&self.inner.registry.read())
    }

    /// Bound tokens in first-registration order, self-binding included.
    pub fn keys(&self) -> Vec<Token> {
        self.inner.registry.read().iter().map(|(token, _)| token.clone()).collect()
    }

    /// Number of bound tokens, self-binding included.
    pub fn len(&self) -> usize {
        self.inner.registry.read().len()
    }

    /// True when nothing but the self-binding is registered.
    pub fn is_empty(&self) -> bool {
        let registry = self.inner.registry.read();
        registry.len() == usize::from(registry.contains_key(&Token::from(CONTAINER_TOKEN)))
    }

    pub fn contains(&self, token: impl Into<Token>) -> bool {
        self.inner.registry.read().contains_key(&token.into())
    }

    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.inner
            .registry
            .read()
            .iter()
            .map(|(token, registration)| BindingDescriptor::from_registration(token, registration))
            .collect()
    }

    /// Number of realized singletons currently cached.
    pub fn cached_singletons(&self) -> usize {
        self.inner.registry.read().cached_len()
    }

    /// True when both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(CONTAINER_TYPE)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.len())
            .field("cached_singletons", &self.cached_singletons())
            .finish()
    }
}

/// Container factory handed to enhancers.
pub type ContainerFactory = fn() -> Container;

/// Creates a new container.
pub fn create_container() -> Container {
    Container::new()
}

/// Creates a container through `enhancer`.
///
/// The enhancer receives the plain container factory and returns a
/// zero-argument closure producing the final container, which lets callers
/// pre-register bindings or wrap construction.
///
/// ```
/// use ferrous_ioc::{create_container_with, BindingOptions, Value};
///
/// let container = create_container_with(|create| {
///     move || {
///         let container = create();
///         container
///             .factory("env", |_| Value::new("test"), BindingOptions::new())
///             .expect("valid lifecycle");
///         container
///     }
/// });
/// assert!(container.contains("env"));
/// ```
pub fn create_container_with<E, F>(enhancer: E) -> Container
where
    E: FnOnce(ContainerFactory) -> F,
    F: FnOnce() -> Container,
{
    enhancer(create_container)()
}

/// True when `value` holds a container handle.
pub fn is_container(value: &Value) -> bool {
    value.is::<Container>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_binding_resolves_to_same_container() {
        let container = Container::new();
        let resolved = container.get::<Container>(CONTAINER_TOKEN).unwrap();
        assert!(resolved.ptr_eq(&container));
        assert!(container.is_empty());
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn self_binding_does_not_keep_container_alive() {
        let container = Container::new();
        let weak = Arc::downgrade(&container.inner);
        container.instance(CONTAINER_TOKEN).unwrap();
        drop(container);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn resolution_stack_is_empty_after_errors() {
        let container = Container::new();
        container
            .factory("a", |_| Value::none(), BindingOptions::new().dependency("missing"))
            .unwrap();
        assert!(container.instance("a").is_err());
        assert_eq!(container.inner.resolution.lock().borrow().depth(), 0);
    }

    #[test]
    fn display_is_fixed_literal() {
        assert_eq!(Container::new().to_string(), "[object Container]");
    }
}
