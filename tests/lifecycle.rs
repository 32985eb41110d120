use ferrous_ioc::{create_container, BindingOptions, Container, DiError, Lifecycle, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Container with a constructor binding and a factory binding, both using `lifecycle`.
fn with_lifecycle(lifecycle: &str) -> Container {
    #[derive(Debug)]
    struct Instance;

    let container = create_container();
    container
        .bind("instance", || Instance, BindingOptions::new().lifecycle(lifecycle))
        .unwrap()
        .factory("factory", |_| Value::new(Vec::<u8>::new()), BindingOptions::new().lifecycle(lifecycle))
        .unwrap();
    container
}

#[test]
fn test_transient_creates_new_instances() {
    let container = with_lifecycle("transient");

    let a = container.instance("factory").unwrap();
    let b = container.instance("factory").unwrap();
    assert!(!a.ptr_eq(&b));

    let a = container.instance("instance").unwrap();
    let b = container.instance("instance").unwrap();
    assert!(!a.ptr_eq(&b));
    assert_eq!(container.cached_singletons(), 0);
}

#[test]
fn test_singleton_returns_same_instance() {
    let container = with_lifecycle("singleton");

    let a = container.instance("factory").unwrap();
    let b = container.instance("factory").unwrap();
    assert!(a.ptr_eq(&b));

    let a = container.instance("instance").unwrap();
    let b = container.instance("instance").unwrap();
    assert!(a.ptr_eq(&b));
    assert_eq!(container.cached_singletons(), 2);
}

#[test]
fn test_default_lifecycle_is_singleton() {
    for name in ["default", "DEFAULT", "Singleton"] {
        let container = with_lifecycle(name);
        let a = container.instance("factory").unwrap();
        let b = container.instance("factory").unwrap();
        assert!(a.ptr_eq(&b), "lifecycle {name} should cache");
    }

    let container = create_container();
    container.factory("implicit", |_| Value::new(1u8), BindingOptions::new()).unwrap();
    let a = container.instance("implicit").unwrap();
    assert!(a.ptr_eq(&container.instance("implicit").unwrap()));
}

#[test]
fn test_transient_activator_runs_every_time() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    let container = create_container();
    container
        .factory(
            "counter",
            move |_| Value::new(counter.fetch_add(1, Ordering::SeqCst) + 1),
            BindingOptions::new().transient(),
        )
        .unwrap();

    let values: Vec<u32> = (0..3).map(|_| *container.get::<u32>("counter").unwrap()).collect();
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_singleton_activator_runs_once() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    let container = create_container();
    container
        .factory(
            "config",
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Value::new(String::from("config"))
            },
            BindingOptions::new(),
        )
        .unwrap();

    for _ in 0..5 {
        container.instance("config").unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_singleton_is_not_cached() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    let container = create_container();
    container
        .factory(
            "nothing",
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Value::none()
            },
            BindingOptions::new(),
        )
        .unwrap();

    container.instance("nothing").unwrap();
    container.instance("nothing").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(container.cached_singletons(), 0);
}

#[test]
fn test_rebinding_invalidates_cached_singleton() {
    let container = create_container();
    container.factory("value", |_| Value::new(1u32), BindingOptions::new()).unwrap();
    assert_eq!(*container.get::<u32>("value").unwrap(), 1);
    assert_eq!(container.cached_singletons(), 1);

    container.factory("value", |_| Value::new(2u32), BindingOptions::new()).unwrap();
    assert_eq!(container.cached_singletons(), 0);
    assert_eq!(*container.get::<u32>("value").unwrap(), 2);
}

#[test]
fn test_rebinding_changes_lifecycle() {
    let container = create_container();
    container.factory("value", |_| Value::new(1u32), BindingOptions::new()).unwrap();
    container.instance("value").unwrap();

    container
        .factory("value", |_| Value::new(1u32), BindingOptions::new().with_lifecycle(Lifecycle::Transient))
        .unwrap();
    let a = container.instance("value").unwrap();
    let b = container.instance("value").unwrap();
    assert!(!a.ptr_eq(&b));
}

#[test]
fn test_singleton_dependents_keep_their_snapshot() {
    let container = create_container();
    container
        .factory("dep", |_| Value::new(1u32), BindingOptions::new())
        .unwrap()
        .bind("holder", |dep: Arc<u32>| *dep, BindingOptions::new().dependency("dep"))
        .unwrap();
    assert_eq!(*container.get::<u32>("holder").unwrap(), 1);

    // only the re-bound token is invalidated
    container.factory("dep", |_| Value::new(2u32), BindingOptions::new()).unwrap();
    assert_eq!(*container.get::<u32>("holder").unwrap(), 1);
    assert_eq!(*container.get::<u32>("dep").unwrap(), 2);
}

#[test]
fn test_unknown_lifecycle_is_rejected() {
    let container = create_container();

    let result = container.factory("type", |_| Value::none(), BindingOptions::new().lifecycle("invalid lifecycle"));
    assert_eq!(
        result.unwrap_err(),
        DiError::UnknownLifecycle("invalid lifecycle".to_string())
    );

    let result = container.bind("type", || 1u8, BindingOptions::new().lifecycle("scoped"));
    assert!(matches!(result, Err(DiError::UnknownLifecycle(_))));
    assert!(!container.contains("type"));
}

#[test]
fn test_lifecycle_names_are_case_insensitive() {
    let container = create_container();
    container
        .factory("a", |_| Value::new(()), BindingOptions::new().lifecycle("Transient"))
        .unwrap()
        .factory("b", |_| Value::new(()), BindingOptions::new().lifecycle("SINGLETON"))
        .unwrap();

    let descriptors = container.descriptors();
    let lifecycle_of = |name: &str| {
        descriptors
            .iter()
            .find(|d| d.token.to_string() == name)
            .map(|d| d.lifecycle)
            .unwrap()
    };
    assert_eq!(lifecycle_of("a"), Lifecycle::Transient);
    assert_eq!(lifecycle_of("b"), Lifecycle::Singleton);
}

#[test]
fn test_rebinding_from_inside_factory_is_not_cached_as_stale() {
    let container = create_container();
    container
        .try_factory(
            "self_replacing",
            |deps| {
                let container = deps[0].downcast::<Container>().expect("container");
                container.factory("self_replacing", |_| Value::new("new"), BindingOptions::new())?;
                Ok(Value::new("old"))
            },
            BindingOptions::new().dependency(ferrous_ioc::CONTAINER_TOKEN),
        )
        .unwrap();

    assert_eq!(*container.get::<&'static str>("self_replacing").unwrap(), "old");
    assert_eq!(*container.get::<&'static str>("self_replacing").unwrap(), "new");
}
