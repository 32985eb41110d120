//! Binding registration types.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::DiResult;
use crate::lifecycle::Lifecycle;
use crate::token::Token;
use crate::value::Value;

static NEXT_BINDING_ID: AtomicU64 = AtomicU64::new(0);

/// Underlying callable producing a value from resolved dependencies.
pub(crate) type Activator = Arc<dyn Fn(&[Value]) -> DiResult<Value> + Send + Sync>;

/// Process-unique id of one registration, rendered as `:<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

impl BindingId {
    pub(crate) fn next() -> Self {
        BindingId(NEXT_BINDING_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Binding with lifecycle, activator and declared dependencies
#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) id: BindingId,
    pub(crate) activator: Activator,
    pub(crate) dependencies: Arc<[Token]>,
    pub(crate) lifecycle: Lifecycle,
}

impl Registration {
    pub(crate) fn new(activator: Activator, dependencies: Vec<Token>, lifecycle: Lifecycle) -> Self {
        Self {
            id: BindingId::next(),
            activator,
            dependencies: dependencies.into(),
            lifecycle,
        }
    }
}

/// Registry holding all bindings and realized singletons
#[derive(Default)]
pub(crate) struct Registry {
    bindings: HashMap<Token, Registration>,
    /// First-registration order, for stable introspection
    order: Vec<Token>,
    /// Realized singletons, tagged with the binding that produced them
    singletons: HashMap<Token, (BindingId, Value)>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the binding for `token`, dropping any singleton
    /// realized by the previous binding. Returns the replaced binding id.
    pub(crate) fn insert(&mut self, token: Token, registration: Registration) -> Option<BindingId> {
        self.singletons.remove(&token);
        match self.bindings.insert(token.clone(), registration) {
            Some(previous) => Some(previous.id),
            None => {
                self.order.push(token);
                None
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, token: &Token) -> Option<&Registration> {
        self.bindings.get(token)
    }

    pub(crate) fn contains_key(&self, token: &Token) -> bool {
        self.bindings.contains_key(token)
    }

    /// Cached singleton for `token`, if produced by binding `id`.
    pub(crate) fn singleton(&self, token: &Token, id: BindingId) -> Option<Value> {
        match self.singletons.get(token) {
            Some((cached_id, value)) if *cached_id == id => Some(value.clone()),
            _ => None,
        }
    }

    /// Caches `value` unless the binding was replaced while it was being built.
    pub(crate) fn store_singleton(&mut self, token: &Token, id: BindingId, value: Value) -> bool {
        match self.bindings.get(token) {
            Some(current) if current.id == id && current.lifecycle == Lifecycle::Singleton => {
                self.singletons.insert(token.clone(), (id, value));
                true
            }
            _ => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn cached_len(&self) -> usize {
        self.singletons.len()
    }

    /// Iterator over bindings in first-registration order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Token, &Registration)> {
        self.order
            .iter()
            .filter_map(move |token| self.bindings.get(token).map(|reg| (token, reg)))
    }
}
