//! Criterion benchmarks for u-tabu search drivers and indicators.
//!
//! Uses synthetic routing instances (points on a jittered grid) to measure
//! move evaluation and archive maintenance.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tabu::pareto::{hypervolume, ParetoConfig, ParetoFront, ParetoRunner};
use u_tabu::routing::{DistanceMatrix, MultiTourProblem, RoutingInstance, TourProblem};
use u_tabu::tabu::{Objectives, TabuConfig, TabuRunner};

// ===========================================================================
// Instances
// ===========================================================================

fn grid_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let x = (i % side) as f64 + rng.random_range(-0.3..0.3);
            let y = (i / side) as f64 + rng.random_range(-0.3..0.3);
            (x, y)
        })
        .collect()
}

fn single_instance(n: usize) -> Arc<RoutingInstance> {
    let matrix = DistanceMatrix::euclidean("grid", &grid_points(n, 42)).unwrap();
    Arc::new(RoutingInstance::new("grid", vec![matrix]).unwrap())
}

fn bi_instance(n: usize) -> Arc<RoutingInstance> {
    let distance = DistanceMatrix::euclidean("grid", &grid_points(n, 42)).unwrap();
    let time = DistanceMatrix::euclidean("grid", &grid_points(n, 7)).unwrap();
    Arc::new(RoutingInstance::new("grid", vec![distance, time]).unwrap())
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_tour_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour_search");
    group.sample_size(10);

    for (n, workers) in [(20usize, 1usize), (50, 1), (50, 4), (100, 4)] {
        let problem = TourProblem::new(single_instance(n));
        let config = TabuConfig::default()
            .with_max_iterations(50)
            .with_pool_size(workers)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_w{}", n, workers), n),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = TabuRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_pareto_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("pareto_search");
    group.sample_size(10);

    for &n in &[10, 20] {
        let problem = MultiTourProblem::new(bi_instance(n));
        let config = ParetoConfig::default()
            .with_max_iterations(10)
            .with_pool_size(4)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(problem, config), |b, (p, c)| {
            b.iter(|| {
                let result = ParetoRunner::run(black_box(p), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_front_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_admission");

    for &n in &[100, 1000] {
        let mut rng = StdRng::seed_from_u64(42);
        let costs: Vec<Objectives> = (0..n)
            .map(|_| Objectives::from([rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)]))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &costs, |b, costs| {
            b.iter(|| {
                let mut front = ParetoFront::new();
                for (i, cost) in costs.iter().enumerate() {
                    front.admit_with(cost.clone(), i);
                }
                black_box(front.len())
            })
        });
    }
    group.finish();
}

fn bench_hypervolume(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume");

    for &n in &[100, 10_000] {
        let front: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let x = i as f64 / n as f64;
                (x, 1.0 - x)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &front, |b, front| {
            b.iter(|| black_box(hypervolume(black_box(front), (1.1, 1.1))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tour_search,
    bench_pareto_search,
    bench_front_admission,
    bench_hypervolume
);
criterion_main!(benches);
