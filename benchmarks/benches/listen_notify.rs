//! LISTEN/NOTIFY benchmarks against the server named by `PG_HOST`, `PG_PORT`, `PG_USER`,
//! `PG_PASSWORD` and `PG_DATABASE`.

use criterion::{Criterion, criterion_group, criterion_main};
use notify_bench::scenarios::{
    MultipleInsertWithNotify, ParallelListenNotify, Scenario, SequentialListenNotify, SingleInsertWithTriggeredNotify,
    SingleInsertWithoutNotify,
};
use notify_bench::{ConnConfig, ScenarioConfig};
use std::time::Instant;

fn bench_scenario<S: Scenario>(c: &mut Criterion) {
    let config = ScenarioConfig::builder(ConnConfig::from_env().unwrap()).build();

    c.bench_function(S::NAME, |b| {
        b.iter_custom(|iters| {
            // Setup: connections, schema and prepared statements (not measured)
            let mut scenario = S::setup(&config).unwrap();

            let start = Instant::now();
            scenario.run(iters).unwrap();
            start.elapsed()
        });
    });
}

fn sequential_listen_notify(c: &mut Criterion) { bench_scenario::<SequentialListenNotify>(c) }

fn parallel_listen_notify(c: &mut Criterion) { bench_scenario::<ParallelListenNotify>(c) }

fn single_insert_without_notify(c: &mut Criterion) { bench_scenario::<SingleInsertWithoutNotify>(c) }

fn single_insert_with_triggered_notify(c: &mut Criterion) { bench_scenario::<SingleInsertWithTriggeredNotify>(c) }

fn multiple_insert_with_notify(c: &mut Criterion) { bench_scenario::<MultipleInsertWithNotify>(c) }

criterion_group!(
    benches,
    sequential_listen_notify,
    parallel_listen_notify,
    single_insert_without_notify,
    single_insert_with_triggered_notify,
    multiple_insert_with_notify
);
criterion_main!(benches);
