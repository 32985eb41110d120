//! # ferrous-ioc
//!
//! A minimal inversion-of-control container for manual dependency wiring.
//!
//! ## Features
//!
//! - **Token bindings**: bind names, types or unique symbols to constructors and factories
//! - **Depth-first resolution**: declared dependencies are resolved in order and injected positionally
//! - **Lifecycles**: singleton (cached) and transient (rebuilt every time)
//! - **Circular dependency detection**: re-entrant resolution fails with the full path
//! - **Strict resolution**: reject factories that produce nothing
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_ioc::{create_container, BindingOptions, Value};
//! use std::sync::Arc;
//!
//! struct Logger;
//!
//! struct Database {
//!     connection: Arc<String>,
//!     logger: Arc<Logger>,
//! }
//!
//! struct Service {
//!     password: Arc<&'static str>,
//!     database: Arc<Database>,
//!     logger: Arc<Logger>,
//! }
//!
//! let container = create_container();
//! container
//!     .bind(
//!         "service",
//!         |password: Arc<&'static str>, database: Arc<Database>, logger: Arc<Logger>| {
//!             Service { password, database, logger }
//!         },
//!         BindingOptions::new().depends_on(["password", "database", "logger"]),
//!     )?
//!     .bind(
//!         "database",
//!         |connection: Arc<String>, logger: Arc<Logger>| Database { connection, logger },
//!         BindingOptions::new().depends_on(["connection", "logger"]),
//!     )?
//!     .factory("connection", |_| Value::new(String::from("postgres://localhost")), BindingOptions::new())?
//!     .factory("password", |_| Value::new("password"), BindingOptions::new())?
//!     .bind("logger", || Logger, BindingOptions::new())?;
//!
//! let service = container.get::<Service>("service")?;
//! assert_eq!(*service.password, "password");
//! assert_eq!(*service.database.connection, "postgres://localhost");
//! // the singleton logger is shared across branches
//! assert!(Arc::ptr_eq(&service.logger, &service.database.logger));
//! # Ok::<(), ferrous_ioc::DiError>(())
//! ```
//!
//! ## Lifecycles
//!
//! - **Singleton** (default): built on first resolution, then reused until re-bound
//! - **Transient**: built on every resolution
//!
//! ```rust
//! use ferrous_ioc::{create_container, BindingOptions, Value};
//!
//! let container = create_container();
//! container.factory("request", |_| Value::new(Vec::<u8>::new()), BindingOptions::new().lifecycle("transient"))?;
//!
//! let a = container.instance("request")?;
//! let b = container.instance("request")?;
//! assert!(!a.ptr_eq(&b));
//! # Ok::<(), ferrous_ioc::DiError>(())
//! ```
//!
//! ## The container token
//!
//! Every container binds itself under [`CONTAINER_TOKEN`], so a factory that
//! needs to resolve lazily declares it as a dependency instead of capturing
//! the container.
//!
//! ```rust
//! use ferrous_ioc::{create_container, BindingOptions, Container, Value, CONTAINER_TOKEN};
//!
//! let container = create_container();
//! container.factory("greeting", |_| Value::new("hello"), BindingOptions::new())?;
//! container.try_factory(
//!     "lazy",
//!     |deps| {
//!         let container = deps[0].downcast::<Container>().expect("container");
//!         container.instance("greeting")
//!     },
//!     BindingOptions::new().dependency(CONTAINER_TOKEN),
//! )?;
//!
//! assert_eq!(*container.get::<&'static str>("lazy")?, "hello");
//! # Ok::<(), ferrous_ioc::DiError>(())
//! ```

// Module declarations
pub mod container;
pub mod descriptors;
pub mod error;
pub mod lifecycle;
pub mod observer;
pub mod options;
pub mod token;
pub mod value;

// Internal modules
mod internal;
mod registration;
mod validation;

// Re-export core types
pub use container::{
    create_container, create_container_with, is_container, Constructor, Container, ContainerFactory, Inject,
    CONTAINER_TOKEN, CONTAINER_TYPE,
};
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult};
pub use lifecycle::Lifecycle;
pub use observer::{LoggingObserver, ResolutionObserver};
pub use options::BindingOptions;
#[cfg(feature = "config")]
pub use options::BindingOptionsConfig;
pub use registration::BindingId;
pub use token::Token;
pub use value::Value;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
