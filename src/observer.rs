//! Resolution observers.
//!
//! Hooks for watching activations: which tokens are built, how long the
//! activators take, and which resolutions fail. Cache hits are not reported.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::token::Token;

/// Observer trait for resolution events.
///
/// Observer calls are made synchronously during resolution, so keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{create_container, BindingOptions, ResolutionObserver, Token, Value};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     built: Mutex<Vec<String>>,
/// }
///
/// impl ResolutionObserver for Recorder {
///     fn resolving(&self, _token: &Token) {}
///
///     fn resolved(&self, token: &Token, _duration: Duration) {
///         self.built.lock().unwrap().push(token.to_string());
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let container = create_container();
/// container.add_observer(recorder.clone());
/// container.factory("answer", |_| Value::new(42u32), BindingOptions::new()).unwrap();
///
/// container.instance("answer").unwrap();
/// container.instance("answer").unwrap(); // cached, not reported
/// assert_eq!(*recorder.built.lock().unwrap(), vec!["answer".to_string()]);
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Called before a token's dependencies are resolved and its activator runs.
    fn resolving(&self, token: &Token);

    /// Called after the activator returned successfully.
    fn resolved(&self, token: &Token, duration: Duration);

    /// Called when a started activation fails, including failures of its
    /// dependencies.
    fn failed(&self, token: &Token, error: &DiError) {
        let _ = (token, error);
    }
}

/// Observer that forwards resolution events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl ResolutionObserver for LoggingObserver {
    fn resolving(&self, token: &Token) {
        tracing::debug!(%token, "resolving");
    }

    fn resolved(&self, token: &Token, duration: Duration) {
        tracing::debug!(%token, ?duration, "resolved");
    }

    fn failed(&self, token: &Token, error: &DiError) {
        tracing::warn!(%token, %error, "resolution failed");
    }
}

/// Container for registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, token: &Token) {
        for observer in &self.observers {
            observer.resolving(token);
        }
    }

    pub(crate) fn resolved(&self, token: &Token, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(token, duration);
        }
    }

    pub(crate) fn failed(&self, token: &Token, error: &DiError) {
        for observer in &self.observers {
            observer.failed(token, error);
        }
    }
}
