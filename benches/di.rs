use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_ioc::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let container = create_container();
    container.factory("answer", |_| Value::new(42u64), BindingOptions::new()).unwrap();

    // Prime the singleton
    let _ = container.instance("answer").unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.instance("answer").unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = create_container();
                container
                    .bind("expensive", || ExpensiveToCreate { data: (0..1000).collect() }, BindingOptions::new())
                    .unwrap();
                container
            },
            |container| {
                let v = container.get::<ExpensiveToCreate>("expensive").unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_singleton_vs_transient(c: &mut Criterion) {
    #[derive(Clone)]
    struct Service {
        data: [u8; 64],
    }

    let mut group = c.benchmark_group("singleton_vs_transient");

    let container = create_container();
    container
        .bind("singleton", || Service { data: [0; 64] }, BindingOptions::new())
        .unwrap()
        .bind("transient", || Service { data: [0; 64] }, BindingOptions::new().transient())
        .unwrap();

    group.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = container.get::<Service>("singleton").unwrap();
            black_box(&v.data);
        })
    });

    group.bench_function("transient", |b| {
        b.iter(|| {
            let v = container.get::<Service>("transient").unwrap();
            black_box(&v.data);
        })
    });

    group.finish();
}

fn bench_token_kinds(c: &mut Criterion) {
    struct Marker;

    let mut group = c.benchmark_group("token_kinds");
    let symbol = Token::symbol("marker");

    let container = create_container();
    container
        .factory("marker", |_| Value::new(1u8), BindingOptions::new())
        .unwrap()
        .factory(Token::of::<Marker>(), |_| Value::new(1u8), BindingOptions::new())
        .unwrap()
        .factory(symbol.clone(), |_| Value::new(1u8), BindingOptions::new())
        .unwrap();

    group.bench_function("name", |b| b.iter(|| black_box(container.instance("marker").unwrap())));
    group.bench_function("type", |b| {
        b.iter(|| black_box(container.instance(Token::of::<Marker>()).unwrap()))
    });
    group.bench_function("symbol", |b| b.iter(|| black_box(container.instance(&symbol).unwrap())));

    group.finish();
}

fn bench_transient_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("transient_chain");

    for &depth in &[1usize, 8, 32] {
        let container = create_container();
        for i in 0..depth {
            let options = if i + 1 < depth {
                BindingOptions::new().transient().dependency(format!("s{}", i + 1))
            } else {
                BindingOptions::new().transient()
            };
            container.factory(format!("s{}", i), move |_| Value::new(i), options).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter(|| {
                let v = container.instance("s0").unwrap();
                black_box(v);
            })
        });
    }

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    let container = create_container();
    container.factory("answer", |_| Value::new(42u64), BindingOptions::new()).unwrap();

    // Prime the singleton
    let _ = container.instance("answer").unwrap();

    for &thread_count in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("singleton_threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let start = std::time::Instant::now();
                    crossbeam_utils::thread::scope(|s| {
                        for _ in 0..threads {
                            let container = &container;
                            s.spawn(move |_| {
                                for _ in 0..iters / threads as u64 {
                                    let v = container.instance("answer").unwrap();
                                    black_box(v);
                                }
                            });
                        }
                    })
                    .unwrap();
                    start.elapsed()
                })
            },
        );
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_large_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_registry");

    for &binding_count in &[10, 100, 1000] {
        let container = create_container();
        container.factory("baseline", |_| Value::new(42u64), BindingOptions::new()).unwrap();
        for i in 0..binding_count {
            container
                .factory(format!("filler{}", i), move |_| Value::new(i), BindingOptions::new())
                .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("resolve_from_large_registry", binding_count),
            &binding_count,
            |b, _| {
                b.iter(|| {
                    let v = container.instance("baseline").unwrap();
                    black_box(v);
                })
            },
        );
    }

    group.finish();
}

fn bench_service_graph(c: &mut Criterion) {
    struct Logger;
    struct Database {
        _logger: Arc<Logger>,
    }
    struct Service {
        _database: Arc<Database>,
        _logger: Arc<Logger>,
    }

    c.bench_function("service_graph_cold", |b| {
        b.iter_batched(
            || {
                let container = create_container();
                container
                    .bind("logger", || Logger, BindingOptions::new())
                    .unwrap()
                    .bind(
                        "database",
                        |logger: Arc<Logger>| Database { _logger: logger },
                        BindingOptions::new().dependency("logger"),
                    )
                    .unwrap()
                    .bind(
                        "service",
                        |database: Arc<Database>, logger: Arc<Logger>| Service {
                            _database: database,
                            _logger: logger,
                        },
                        BindingOptions::new().depends_on(["database", "logger"]),
                    )
                    .unwrap();
                container
            },
            |container| {
                let v = container.get::<Service>("service").unwrap();
                black_box(v);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_singleton_vs_transient,
    bench_token_kinds,
    bench_transient_chain_depth,
    bench_contention
);

criterion_group!(macro_benches, bench_large_registry, bench_service_graph);

criterion_main!(micro_benches, macro_benches);
