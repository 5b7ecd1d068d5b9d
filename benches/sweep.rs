//! Benchmarks for sweep enumeration and partial-sum evaluation.

use afinar::prelude::*;
use afinar::sampler::partial_sum::log_likelihood;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

struct NullEngine;

impl FitEngine for NullEngine {
    fn fit(
        &self,
        _spec: &ModelSpec,
        _sampling: &SamplerConfig,
        _threading: &ThreadConfig,
    ) -> afinar::Result<FittedModel> {
        FittedModel::new(vec![], vec![], 0.0)
    }
}

fn bench_grid_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_enumeration");

    for size in [4, 16, 64].iter() {
        let axis: Vec<usize> = (1..=*size).collect();
        let grid = SweepGrid::new(axis.clone(), axis.clone(), axis).expect("valid grid");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(grid.combinations()));
        });
    }

    group.finish();
}

fn bench_harness_overhead(c: &mut Criterion) {
    let spec = ModelSpec::new(simulate_poisson(500, 3.0, 7), Family::Poisson);
    let grid = SweepGrid::new(vec![1, 2, 4], vec![100, 50], vec![25]).expect("valid grid");
    let options = SweepOptions::default();

    c.bench_function("harness_null_engine_6_points", |b| {
        b.iter(|| {
            let bench = ThreadingBenchmark::new(NullEngine);
            black_box(bench.run(&spec, &grid, &options).expect("sweep succeeds"))
        });
    });
}

fn bench_partial_sum_grainsizes(c: &mut Criterion) {
    let spec = ModelSpec::new(simulate_poisson(100_000, 4.0, 13), Family::Poisson);
    let params = [1.4];
    let mut group = c.benchmark_group("partial_sum_log_likelihood");

    for grainsize in [25_000, 6_250, 1_562, 390].iter() {
        let config = ThreadConfig::new(4, *grainsize)
            .expect("valid config")
            .with_static_schedule(true);
        group.bench_with_input(
            BenchmarkId::from_parameter(grainsize),
            grainsize,
            |b, _| {
                b.iter(|| {
                    black_box(log_likelihood(&spec, &params, &config).expect("feasible"))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_grid_enumeration,
    bench_harness_overhead,
    bench_partial_sum_grainsizes
);
criterion_main!(benches);
